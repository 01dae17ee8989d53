//! UI主题模块
//!
//! 定义面板的配色以及按钮、容器的样式表

use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme as IcedTheme, Vector};

/// 窗口背景色 #f0f0f0
pub const BACKGROUND: Color = Color::from_rgb(240.0 / 255.0, 240.0 / 255.0, 240.0 / 255.0);
/// 按钮颜色 #4CAF50
pub const BUTTON: Color = Color::from_rgb(76.0 / 255.0, 175.0 / 255.0, 80.0 / 255.0);
/// 悬停颜色 #45a049
pub const BUTTON_HOVER: Color = Color::from_rgb(69.0 / 255.0, 160.0 / 255.0, 73.0 / 255.0);
/// 按下颜色
pub const BUTTON_PRESSED: Color = Color::from_rgb(67.0 / 255.0, 160.0 / 255.0, 71.0 / 255.0);
/// 状态栏文本色
pub const STATUS_TEXT: Color = Color::from_rgb(108.0 / 255.0, 117.0 / 255.0, 125.0 / 255.0);
/// 错误文本色
pub const ERROR_TEXT: Color = Color::from_rgb(220.0 / 255.0, 53.0 / 255.0, 69.0 / 255.0);

/// 按钮圆角
pub const BUTTON_RADIUS: f32 = 10.0;
/// 按钮内边距
pub const BUTTON_PADDING: u16 = 10;
/// 按钮字体大小
pub const BUTTON_TEXT_SIZE: u16 = 16;
/// 图标尺寸
pub const ICON_SIZE: f32 = 30.0;

/// 动作按钮样式
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionButtonStyle;

impl ActionButtonStyle {
    fn with_background(color: Color) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(color)),
            text_color: Color::WHITE,
            border: Border {
                radius: BUTTON_RADIUS.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl button::StyleSheet for ActionButtonStyle {
    type Style = IcedTheme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        Self::with_background(BUTTON)
    }

    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        Self::with_background(BUTTON_HOVER)
    }

    fn pressed(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            shadow_offset: Vector::new(0.0, 1.0),
            ..Self::with_background(BUTTON_PRESSED)
        }
    }

    fn disabled(&self, _style: &Self::Style) -> button::Appearance {
        Self::with_background(Color { a: 0.5, ..BUTTON })
    }
}

/// 对话框按钮样式，默认按钮使用强调色
#[derive(Debug, Clone, Copy)]
pub struct DialogButtonStyle {
    /// 是否为默认按钮
    pub is_default: bool,
}

impl button::StyleSheet for DialogButtonStyle {
    type Style = IcedTheme;

    fn active(&self, style: &Self::Style) -> button::Appearance {
        let palette = style.extended_palette();
        let (background, text_color) = if self.is_default {
            (palette.primary.strong.color, palette.primary.strong.text)
        } else {
            (palette.background.weak.color, palette.background.weak.text)
        };

        button::Appearance {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let palette = style.extended_palette();
        let background = if self.is_default {
            palette.primary.base.color
        } else {
            palette.background.strong.color
        };

        button::Appearance {
            background: Some(Background::Color(background)),
            ..button::StyleSheet::active(self, style)
        }
    }
}

/// 窗口背景
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelBackground;

impl container::StyleSheet for PanelBackground {
    type Style = IcedTheme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(BACKGROUND)),
            ..Default::default()
        }
    }
}

/// 确认对话框卡片
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogCard;

impl container::StyleSheet for DialogCard {
    type Style = IcedTheme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color::WHITE)),
            text_color: Some(Color::BLACK),
            border: Border {
                color: Color::from_rgb8(200, 200, 200),
                width: 1.0,
                radius: 8.0.into(),
            },
            shadow: Shadow {
                color: Color { a: 0.2, ..Color::BLACK },
                offset: Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
        }
    }
}

/// 对话框遮罩
#[derive(Debug, Clone, Copy, Default)]
pub struct Backdrop;

impl container::StyleSheet for Backdrop {
    type Style = IcedTheme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color { a: 0.35, ..Color::BLACK })),
            ..Default::default()
        }
    }
}
