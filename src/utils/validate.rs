use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::courses::entities::Group;

static GROUP_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("Invalid group name regex"));

pub fn validate_group_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("Group name cannot be empty");
    }
    if name.len() > 20 {
        return Err("Group name cannot be longer than 20 characters");
    }
    if name.contains(' ') {
        return Err("Group name cannot contain spaces");
    }
    if !GROUP_NAME_RE.is_match(name) {
        return Err(
            "Group name can only contain letters (a-z, A-Z), numbers, underscores and dashes",
        );
    }
    Ok(())
}

/// 校验小组草稿：名称合法且至少一名成员
pub fn validate_group(group: &Group) -> Result<(), &'static str> {
    validate_group_name(&group.name)?;
    if group.users.is_empty() {
        return Err("Group must have at least one user");
    }
    Ok(())
}

/// 批量发布的最低分必须落在 [0, 100]
pub fn validate_minimum_score(minimum_score: i64) -> Result<(), &'static str> {
    if !(0..=100).contains(&minimum_score) {
        return Err("Minimum score must be in range [0, 100]");
    }
    Ok(())
}
