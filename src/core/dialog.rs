//! 确认对话框模块
//!
//! Yes/No 模态确认，默认按钮为 No

use crate::core::types::{ActionSpec, DialogResponse};

/// 确认对话框
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    /// 标题
    pub title: String,
    /// 提示内容
    pub message: String,
}

impl ConfirmDialog {
    /// 默认按钮对应的应答
    pub const DEFAULT_RESPONSE: DialogResponse = DialogResponse::No;

    /// 创建新的确认对话框
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// 为动作创建确认对话框
    pub fn for_action(spec: &ActionSpec) -> Self {
        Self::new(spec.title.clone(), spec.message.clone())
    }

    /// 解析用户应答
    ///
    /// 仅当用户明确选择 Yes 时返回 true；回车落到默认按钮，关闭视为 No
    pub fn resolve(&self, response: DialogResponse) -> bool {
        let effective = match response {
            DialogResponse::Default | DialogResponse::Dismissed => Self::DEFAULT_RESPONSE,
            other => other,
        };
        effective == DialogResponse::Yes
    }
}
