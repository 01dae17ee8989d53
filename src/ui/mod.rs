//! 用户界面模块
//! 
//! 包含控制面板窗口、组件构建和样式

pub mod components;
pub mod manager;
pub mod theme;
