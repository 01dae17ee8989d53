//! 核心业务逻辑模块
//! 
//! 包含动作分发表、确认对话框、进度动画、命令执行和面板状态机

pub mod actions;
pub mod dialog;
pub mod executor;
pub mod panel;
pub mod progress;
pub mod types;
