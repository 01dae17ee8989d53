//! UI管理器模块
//!
//! 使用iced框架实现控制面板窗口：按钮点击、确认对话框、进度条刷新和命令完成消息

use std::sync::Arc;
use std::time::{Duration, Instant};

use iced::{
    executor, keyboard, time, window, Application, Command, Element, Font, Pixels, Settings, Size,
    Subscription, Theme as IcedTheme,
};
use log::{info, warn};

use crate::core::actions::ActionTable;
use crate::core::executor::{self as command_executor, CommandRunner};
use crate::core::panel::ControlPanel;
use crate::core::types::{Completion, DialogResponse, PowerAction};
use crate::ui::components;
use crate::utils::config::WindowSettings;

/// 进度条刷新间隔
const PROGRESS_FRAME: Duration = Duration::from_millis(16);

/// 应用程序消息类型
#[derive(Debug, Clone)]
pub enum Message {
    /// 点击动作按钮
    ActionClicked(PowerAction),
    /// 确认对话框应答
    DialogAnswered(DialogResponse),
    /// 命令执行完成
    CommandFinished(Completion),
    /// 进度条动画帧
    ProgressTick(Instant),
}

/// UI启动参数
#[derive(Debug, Clone)]
pub struct UIFlags {
    /// 动作分发表
    pub table: ActionTable,
    /// 命令运行器
    pub runner: Arc<dyn CommandRunner>,
    /// 进度条动画时长
    pub progress_duration: Duration,
}

/// UI管理器应用程序状态
#[derive(Debug)]
pub struct UIManager {
    /// 面板状态
    panel: ControlPanel,
    /// 命令运行器
    runner: Arc<dyn CommandRunner>,
}

/// 运行UI应用程序
///
/// # 参数
///
/// * `flags` - 启动参数
/// * `window_settings` - 窗口尺寸
pub fn run_with_params(flags: UIFlags, window_settings: WindowSettings) -> iced::Result {
    let settings = Settings {
        id: None,
        window: window::Settings {
            size: Size::new(window_settings.width, window_settings.height),
            ..Default::default()
        },
        flags,
        fonts: vec![],
        default_font: Font::default(),
        default_text_size: Pixels(16.0),
        antialiasing: false,
    };
    UIManager::run(settings)
}

/// 对话框快捷键：回车选择默认按钮，Esc关闭
fn dialog_shortcut(key: keyboard::Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key {
        keyboard::Key::Named(keyboard::key::Named::Enter) => {
            Some(Message::DialogAnswered(DialogResponse::Default))
        },
        keyboard::Key::Named(keyboard::key::Named::Escape) => {
            Some(Message::DialogAnswered(DialogResponse::Dismissed))
        },
        _ => None,
    }
}

impl Application for UIManager {
    type Message = Message;
    type Theme = IcedTheme;
    type Executor = executor::Default;
    type Flags = UIFlags;

    fn new(flags: Self::Flags) -> (Self, Command<Self::Message>) {
        info!("创建UIManager实例，进度条时长: {:?}", flags.progress_duration);

        let ui_manager = Self {
            panel: ControlPanel::new(flags.table, flags.progress_duration),
            runner: flags.runner,
        };

        (ui_manager, Command::none())
    }

    fn title(&self) -> String {
        "System Control".to_string()
    }

    fn update(&mut self, message: Self::Message) -> Command<Self::Message> {
        match message {
            Message::ActionClicked(action) => {
                info!("用户点击: {}", action);
                if let Err(e) = self.panel.request(action) {
                    warn!("点击被忽略: {}", e);
                }
                Command::none()
            },
            Message::DialogAnswered(response) => {
                match self.panel.answer(response, Instant::now()) {
                    Ok(Some(execution)) => {
                        let runner = Arc::clone(&self.runner);
                        Command::perform(command_executor::execute(execution, runner), Message::CommandFinished)
                    },
                    Ok(None) => Command::none(),
                    Err(e) => {
                        warn!("应答被忽略: {}", e);
                        Command::none()
                    },
                }
            },
            Message::CommandFinished(completion) => {
                if let Err(e) = self.panel.complete(completion) {
                    warn!("完成消息被忽略: {}", e);
                }
                Command::none()
            },
            Message::ProgressTick(now) => {
                self.panel.tick(now);
                Command::none()
            },
        }
    }

    /// 进度条动画和对话框快捷键只在需要时订阅
    fn subscription(&self) -> Subscription<Self::Message> {
        let mut subscriptions = Vec::new();

        if self.panel.progress_animating() {
            subscriptions.push(time::every(PROGRESS_FRAME).map(Message::ProgressTick));
        }
        if self.panel.dialog().is_some() {
            subscriptions.push(keyboard::on_key_press(dialog_shortcut));
        }

        Subscription::batch(subscriptions)
    }

    fn view(&self) -> Element<Self::Message> {
        match self.panel.dialog() {
            Some(dialog) => components::confirm_dialog(dialog),
            None => components::control_panel(&self.panel),
        }
    }

    fn theme(&self) -> Self::Theme {
        IcedTheme::Light
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::executor::testing::RecordingRunner;
    use crate::core::progress::DEFAULT_PROGRESS_DURATION;
    use crate::core::types::ButtonState;

    fn manager(runner: Arc<RecordingRunner>) -> UIManager {
        let flags = UIFlags {
            table: ActionTable::default(),
            runner,
            progress_duration: DEFAULT_PROGRESS_DURATION,
        };
        let (manager, _command) = UIManager::new(flags);
        manager
    }

    /// 模拟iced运行时执行update返回的命令
    async fn finish_running(ui: &mut UIManager, runner: Arc<RecordingRunner>) {
        let execution = ui.panel.running().cloned().expect("no command in flight");
        let completion = command_executor::execute(execution, runner).await;
        let _ = ui.update(Message::CommandFinished(completion));
    }

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_reboot_declined_then_confirmed() {
        let runner = Arc::new(RecordingRunner::new());
        let mut ui = manager(runner.clone());

        let _ = ui.update(Message::ActionClicked(PowerAction::Reboot));
        assert!(ui.panel.dialog().unwrap().message.contains("reboot"));

        let _ = ui.update(Message::DialogAnswered(DialogResponse::No));
        assert!(ui.panel.dialog().is_none());
        assert!(ui.panel.running().is_none());
        assert!(runner.calls().is_empty());

        let _ = ui.update(Message::ActionClicked(PowerAction::Reboot));
        let _ = ui.update(Message::DialogAnswered(DialogResponse::Yes));
        assert_eq!(ui.panel.state(PowerAction::Reboot), ButtonState::Executing);

        finish_running(&mut ui, runner.clone()).await;
        assert_eq!(runner.calls(), vec![argv(&["sudo", "reboot"])]);
        assert_eq!(ui.panel.state(PowerAction::Reboot), ButtonState::Idle);
    }

    #[tokio::test]
    async fn test_update_shows_then_hides_progress() {
        let runner = Arc::new(RecordingRunner::new());
        let mut ui = manager(runner.clone());

        let _ = ui.update(Message::ActionClicked(PowerAction::Update));
        let _ = ui.update(Message::DialogAnswered(DialogResponse::Yes));
        assert!(ui.panel.progress_visible());

        let _ = ui.update(Message::ProgressTick(Instant::now() + Duration::from_millis(1500)));
        assert!(ui.panel.progress_value().unwrap() > 0.0);

        finish_running(&mut ui, runner.clone()).await;
        assert_eq!(runner.calls(), vec![argv(&["sudo", "apt", "update"])]);
        assert!(!ui.panel.progress_visible());
        assert_eq!(ui.panel.last_completion().unwrap().summary(), "Update finished");
    }

    #[test]
    fn test_dismissing_dialog_runs_nothing() {
        let runner = Arc::new(RecordingRunner::new());
        let mut ui = manager(runner.clone());

        for response in [DialogResponse::Default, DialogResponse::Dismissed] {
            let _ = ui.update(Message::ActionClicked(PowerAction::Shutdown));
            let _ = ui.update(Message::DialogAnswered(response));
            assert!(ui.panel.running().is_none());
        }
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_clicks_ignored_while_executing() {
        let runner = Arc::new(RecordingRunner::new());
        let mut ui = manager(runner);

        let _ = ui.update(Message::ActionClicked(PowerAction::Upgrade));
        let _ = ui.update(Message::DialogAnswered(DialogResponse::Yes));
        let _ = ui.update(Message::ActionClicked(PowerAction::Shutdown));

        assert!(ui.panel.dialog().is_none());
        assert_eq!(ui.panel.state(PowerAction::Shutdown), ButtonState::Idle);
    }

    #[test]
    fn test_dialog_shortcuts() {
        use keyboard::key::Named;

        let enter = dialog_shortcut(keyboard::Key::Named(Named::Enter), keyboard::Modifiers::default());
        assert!(matches!(enter, Some(Message::DialogAnswered(DialogResponse::Default))));

        let escape = dialog_shortcut(keyboard::Key::Named(Named::Escape), keyboard::Modifiers::default());
        assert!(matches!(escape, Some(Message::DialogAnswered(DialogResponse::Dismissed))));

        assert!(dialog_shortcut(keyboard::Key::Named(Named::Tab), keyboard::Modifiers::default()).is_none());
    }
}
