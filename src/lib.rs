//! LabGrade - 提交归属与人工评审共识引擎
//!
//! 实验作业评分平台的核心引擎：解析提交归属（个人/小组）、
//! 聚合成员评定状态、驱动基准/评分项的人工评审状态机。
//!
//! # 架构
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 会话生命周期管理
//! - `services`: 业务逻辑层
//! - `state`: 会话状态与提交索引
//! - `transport`: 远端协作方接口（可插拔后端）
//! - `utils`: 工具函数

pub mod config;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod state;
pub mod transport;
pub mod utils;
