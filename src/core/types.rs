//! 核心数据类型定义
//!
//! 定义控制面板使用的动作、按钮状态、对话框应答和执行结果

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// 系统动作枚举
///
/// 面板上的每个按钮对应一个动作，顺序即按钮的显示顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    /// 关机
    Shutdown,
    /// 重启
    Reboot,
    /// 更新软件源
    Update,
    /// 升级系统
    Upgrade,
}

impl PowerAction {
    /// 所有动作，按显示顺序排列
    pub const ALL: [PowerAction; 4] = [
        PowerAction::Shutdown,
        PowerAction::Reboot,
        PowerAction::Update,
        PowerAction::Upgrade,
    ];

    /// 图标文件名的基础部分
    pub fn slug(&self) -> &'static str {
        match self {
            PowerAction::Shutdown => "shutdown",
            PowerAction::Reboot => "reboot",
            PowerAction::Update => "update",
            PowerAction::Upgrade => "upgrade",
        }
    }
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerAction::Shutdown => write!(f, "Shutdown"),
            PowerAction::Reboot => write!(f, "Reboot"),
            PowerAction::Update => write!(f, "Update"),
            PowerAction::Upgrade => write!(f, "Upgrade"),
        }
    }
}

/// 动作描述
///
/// 分发表中的一行：按钮文本、图标、确认提示以及要执行的参数向量
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSpec {
    /// 对应的动作
    pub action: PowerAction,
    /// 按钮文本
    pub label: String,
    /// 图标路径，文件不存在时为 None
    pub icon: Option<PathBuf>,
    /// 确认对话框标题
    pub title: String,
    /// 确认对话框内容
    pub message: String,
    /// 参数向量（程序名加参数）
    pub argv: Vec<String>,
    /// 是否显示进度条
    pub with_progress: bool,
}

/// 按钮状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// 空闲
    #[default]
    Idle,
    /// 等待用户确认
    AwaitingConfirmation,
    /// 命令执行中
    Executing,
}

/// 确认对话框的应答
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResponse {
    /// 点击"Yes"
    Yes,
    /// 点击"No"
    No,
    /// 按下回车，激活默认按钮
    Default,
    /// 按下Esc或关闭对话框
    Dismissed,
}

/// 进程退出信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitReport {
    /// 退出码，被信号终止时为None
    pub code: Option<i32>,
}

impl ExitReport {
    /// 是否成功退出
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// 命令执行错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    /// 参数向量为空
    #[error("empty command")]
    EmptyCommand,
    /// 进程无法启动
    #[error("could not start {program}: {reason}")]
    Spawn { program: String, reason: String },
    /// 等待进程退出失败
    #[error("lost track of {program}: {reason}")]
    Wait { program: String, reason: String },
}

/// 一次已确认的执行
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// 执行ID，用于匹配完成消息
    pub id: Uuid,
    /// 对应的动作
    pub action: PowerAction,
    /// 参数向量
    pub argv: Vec<String>,
    /// 是否伴随进度条
    pub with_progress: bool,
}

impl Execution {
    /// 根据动作描述创建一次执行
    pub fn from_spec(spec: &ActionSpec) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: spec.action,
            argv: spec.argv.clone(),
            with_progress: spec.with_progress,
        }
    }
}

/// 执行完成消息
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// 执行ID
    pub id: Uuid,
    /// 对应的动作
    pub action: PowerAction,
    /// 执行结果
    pub result: Result<ExitReport, ExecError>,
    /// 耗时
    pub elapsed: Duration,
}

impl Completion {
    /// 生成状态栏文本
    pub fn summary(&self) -> String {
        match &self.result {
            Ok(report) if report.success() => format!("{} finished", self.action),
            Ok(ExitReport { code: Some(code) }) => {
                format!("{} exited with code {}", self.action, code)
            },
            Ok(ExitReport { code: None }) => format!("{} was terminated by a signal", self.action),
            Err(e) => format!("{} failed: {}", self.action, e),
        }
    }
}
