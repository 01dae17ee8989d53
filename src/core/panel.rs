//! 控制面板状态模块
//!
//! 维护每个按钮的状态机（空闲 → 等待确认 → 执行中 → 空闲），
//! 以及确认对话框、进度条和最近一次执行结果

use log::{info, warn};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

use crate::core::actions::ActionTable;
use crate::core::dialog::ConfirmDialog;
use crate::core::progress::ProgressAnimation;
use crate::core::types::{ButtonState, Completion, DialogResponse, Execution, PowerAction};

/// 面板操作错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    /// 已有动作在等待确认或执行中
    #[error("{current} is still in progress")]
    Busy { current: PowerAction },
    /// 没有待确认的对话框
    #[error("no confirmation is pending")]
    NoPendingConfirmation,
    /// 完成消息与当前执行不匹配
    #[error("unexpected completion {0}")]
    UnknownExecution(Uuid),
}

/// 待确认的动作
#[derive(Debug, Clone)]
struct PendingConfirmation {
    action: PowerAction,
    dialog: ConfirmDialog,
}

/// 控制面板状态
#[derive(Debug)]
pub struct ControlPanel {
    /// 动作分发表
    table: ActionTable,
    /// 各按钮状态
    states: BTreeMap<PowerAction, ButtonState>,
    /// 当前确认对话框
    pending: Option<PendingConfirmation>,
    /// 正在执行的动作
    running: Option<Execution>,
    /// 进度条动画，None表示隐藏
    progress: Option<ProgressAnimation>,
    /// 进度条动画时长
    progress_duration: Duration,
    /// 最近一次执行结果
    last_completion: Option<Completion>,
}

impl ControlPanel {
    /// 创建新的控制面板
    pub fn new(table: ActionTable, progress_duration: Duration) -> Self {
        let states = PowerAction::ALL
            .iter()
            .map(|&action| (action, ButtonState::Idle))
            .collect();

        Self {
            table,
            states,
            pending: None,
            running: None,
            progress: None,
            progress_duration,
            last_completion: None,
        }
    }

    /// 动作分发表
    pub fn table(&self) -> &ActionTable {
        &self.table
    }

    /// 按钮状态
    pub fn state(&self, action: PowerAction) -> ButtonState {
        self.states.get(&action).copied().unwrap_or_default()
    }

    /// 当前占用面板的动作
    fn current(&self) -> Option<PowerAction> {
        self.pending
            .as_ref()
            .map(|p| p.action)
            .or_else(|| self.running.as_ref().map(|r| r.action))
    }

    /// 是否有动作在等待确认或执行中
    pub fn is_busy(&self) -> bool {
        self.current().is_some()
    }

    /// 用户点击按钮：空闲 → 等待确认
    pub fn request(&mut self, action: PowerAction) -> Result<&ConfirmDialog, PanelError> {
        if let Some(current) = self.current() {
            warn!("忽略点击 {}: {} 尚未结束", action, current);
            return Err(PanelError::Busy { current });
        }

        let dialog = ConfirmDialog::for_action(self.table.get(action));
        info!("显示确认对话框: {}", dialog.title);

        self.states.insert(action, ButtonState::AwaitingConfirmation);
        let pending = self.pending.insert(PendingConfirmation { action, dialog });
        Ok(&pending.dialog)
    }

    /// 当前确认对话框
    pub fn dialog(&self) -> Option<&ConfirmDialog> {
        self.pending.as_ref().map(|p| &p.dialog)
    }

    /// 用户应答对话框
    ///
    /// 确认时进入执行中并返回待执行的命令；需要进度条的动作在此刻开始动画
    pub fn answer(
        &mut self,
        response: DialogResponse,
        now: Instant,
    ) -> Result<Option<Execution>, PanelError> {
        let pending = self.pending.take().ok_or(PanelError::NoPendingConfirmation)?;

        if !pending.dialog.resolve(response) {
            info!("用户取消 {} ({:?})", pending.action, response);
            self.states.insert(pending.action, ButtonState::Idle);
            return Ok(None);
        }

        let execution = Execution::from_spec(self.table.get(pending.action));
        info!("用户确认 {}，执行ID: {}", pending.action, execution.id);

        if execution.with_progress {
            self.progress = Some(ProgressAnimation::start(now, self.progress_duration));
        }
        self.states.insert(pending.action, ButtonState::Executing);
        self.running = Some(execution.clone());

        Ok(Some(execution))
    }

    /// 推进进度动画
    pub fn tick(&mut self, now: Instant) {
        if let Some(progress) = self.progress.as_mut() {
            progress.advance(now);
        }
    }

    /// 进度条是否可见
    pub fn progress_visible(&self) -> bool {
        self.progress.is_some()
    }

    /// 进度动画是否仍需刷新
    pub fn progress_animating(&self) -> bool {
        self.progress.map_or(false, |p| !p.is_finished())
    }

    /// 当前进度值，隐藏时为None
    pub fn progress_value(&self) -> Option<f32> {
        self.progress.map(|p| p.value())
    }

    /// 命令返回：执行中 → 空闲，并隐藏进度条
    pub fn complete(&mut self, completion: Completion) -> Result<(), PanelError> {
        match &self.running {
            Some(running) if running.id == completion.id => {},
            _ => {
                warn!("收到未知的完成消息: {} [{}]", completion.action, completion.id);
                return Err(PanelError::UnknownExecution(completion.id));
            },
        }

        info!("{}，耗时 {:?}", completion.summary(), completion.elapsed);

        self.running = None;
        self.progress = None;
        self.states.insert(completion.action, ButtonState::Idle);
        self.last_completion = Some(completion);
        Ok(())
    }

    /// 正在执行的命令
    pub fn running(&self) -> Option<&Execution> {
        self.running.as_ref()
    }

    /// 最近一次执行结果
    pub fn last_completion(&self) -> Option<&Completion> {
        self.last_completion.as_ref()
    }
}
