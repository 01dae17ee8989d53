//! UI组件模块
//!
//! 构建面板的各个部分：动作按钮列、确认对话框、进度条和状态栏

use iced::widget::{button, column, container, image, progress_bar, row, text, Space};
use iced::{alignment, theme, Alignment, Element, Length};

use crate::core::dialog::ConfirmDialog;
use crate::core::panel::ControlPanel;
use crate::core::progress::PROGRESS_MAX;
use crate::core::types::{ActionSpec, ButtonState, Completion, DialogResponse};
use crate::ui::manager::Message;
use crate::ui::theme::{
    ActionButtonStyle, Backdrop, DialogButtonStyle, DialogCard, PanelBackground, BUTTON_PADDING,
    BUTTON_TEXT_SIZE, ERROR_TEXT, ICON_SIZE, STATUS_TEXT,
};

/// 构建单个动作按钮
///
/// 图标文件缺失时只显示文字；`enabled` 为 false 时按钮不可点击
pub fn action_button(spec: &ActionSpec, enabled: bool) -> Element<'static, Message> {
    let mut content = row![].spacing(10).align_items(Alignment::Center);

    if let Some(icon) = &spec.icon {
        content = content.push(
            image(image::Handle::from_path(icon))
                .width(Length::Fixed(ICON_SIZE))
                .height(Length::Fixed(ICON_SIZE)),
        );
    }
    content = content.push(text(&spec.label).size(BUTTON_TEXT_SIZE));

    let mut action_button = button(container(content).width(Length::Fill).center_x())
        .width(Length::Fill)
        .padding(BUTTON_PADDING)
        .style(theme::Button::custom(ActionButtonStyle));

    if enabled {
        action_button = action_button.on_press(Message::ActionClicked(spec.action));
    }

    action_button.into()
}

/// 构建主面板：四个按钮、进度条和状态栏
pub fn control_panel(panel: &ControlPanel) -> Element<'static, Message> {
    let busy = panel.is_busy();

    let buttons = panel
        .table()
        .iter()
        .map(|spec| {
            let enabled = !busy && panel.state(spec.action) == ButtonState::Idle;
            action_button(spec, enabled)
        })
        .collect::<Vec<_>>();

    let mut content = iced::widget::Column::with_children(buttons).spacing(10);

    if let Some(value) = panel.progress_value() {
        content = content.push(progress_indicator(value));
    }

    if let Some(running) = panel.running() {
        content = content.push(text(format!("Running {}...", running.action)).size(14).style(STATUS_TEXT));
    } else if let Some(completion) = panel.last_completion() {
        content = content.push(status_line(completion));
    }

    container(content.padding(10))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(theme::Container::Custom(Box::new(PanelBackground)))
        .into()
}

/// 进度条
pub fn progress_indicator(value: f32) -> Element<'static, Message> {
    progress_bar(0.0..=PROGRESS_MAX, value)
        .height(Length::Fixed(25.0))
        .style(theme::ProgressBar::Success)
        .into()
}

/// 最近一次执行结果
pub fn status_line(completion: &Completion) -> Element<'static, Message> {
    let succeeded = matches!(&completion.result, Ok(report) if report.success());
    let color = if succeeded { STATUS_TEXT } else { ERROR_TEXT };

    text(completion.summary()).size(14).style(color).into()
}

/// 确认对话框
///
/// Yes / No 两个按钮，No 为默认按钮；右上角的关闭按钮等同于取消
pub fn confirm_dialog(dialog: &ConfirmDialog) -> Element<'static, Message> {
    let close = button(text("×").size(16))
        .on_press(Message::DialogAnswered(DialogResponse::Dismissed))
        .padding([0, 6])
        .style(theme::Button::Text);

    let header = row![
        text(&dialog.title).size(18).width(Length::Fill),
        close,
    ]
    .align_items(Alignment::Center);

    let choices = row![
        Space::with_width(Length::Fill),
        dialog_button("Yes", DialogResponse::Yes, false),
        dialog_button("No", DialogResponse::No, true),
    ]
    .spacing(10);

    let card = container(
        column![
            header,
            text(&dialog.message).size(14),
            Space::with_height(Length::Fixed(10.0)),
            choices,
        ]
        .spacing(10)
        .padding(15),
    )
    .width(Length::Fixed(260.0))
    .style(theme::Container::Custom(Box::new(DialogCard)));

    container(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .style(theme::Container::Custom(Box::new(Backdrop)))
        .into()
}

/// 对话框按钮
fn dialog_button(label: &str, response: DialogResponse, is_default: bool) -> Element<'static, Message> {
    button(
        text(label)
            .size(14)
            .horizontal_alignment(alignment::Horizontal::Center),
    )
    .on_press(Message::DialogAnswered(response))
    .width(Length::Fixed(70.0))
    .padding([6, 10])
    .style(theme::Button::custom(DialogButtonStyle { is_default }))
    .into()
}
