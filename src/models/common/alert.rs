use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 告警严重级别，对应前端的 bootstrap 颜色类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/alert.ts")]
pub enum AlertColor {
    Danger,
    Primary,
    Success,
    Warning,
    Secondary,
}

/// 进程级告警条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/alert.ts")]
pub struct Alert {
    pub id: u64,
    pub text: String,
    pub color: AlertColor,
}

static NEXT_ALERT_ID: AtomicU64 = AtomicU64::new(1);

impl Alert {
    pub fn new(text: impl Into<String>, color: AlertColor) -> Self {
        Self {
            id: NEXT_ALERT_ID.fetch_add(1, Ordering::Relaxed),
            text: text.into(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_ids_monotonic() {
        let a = Alert::new("first", AlertColor::Danger);
        let b = Alert::new("second", AlertColor::Success);
        assert!(b.id > a.id);
    }
}
