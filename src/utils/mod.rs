//! 工具模块
//! 
//! 包含配置、日志和系统检查等辅助功能

pub mod config;
pub mod logger;
pub mod system;
