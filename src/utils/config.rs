//! 配置管理模块
//!
//! 负责应用程序配置的加载、保存和校验

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use dirs::config_dir;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::actions::DEFAULT_ICON_DIR;
use crate::core::progress::DEFAULT_PROGRESS_DURATION;
use crate::core::types::PowerAction;

/// 配置目录名
const APP_DIR_NAME: &str = "SysPanel";

/// 应用程序配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 窗口设置
    pub window: WindowSettings,
    /// 进度条动画时长（毫秒）
    pub progress_duration_ms: u64,
    /// 图标目录
    pub icon_dir: PathBuf,
    /// 日志级别
    pub log_level: String,
    /// 是否写入日志文件
    pub file_logging: bool,
    /// 命令覆盖
    pub commands: BTreeMap<PowerAction, Vec<String>>,
}

/// 窗口设置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// 宽度
    pub width: f32,
    /// 高度
    pub height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            progress_duration_ms: DEFAULT_PROGRESS_DURATION.as_millis() as u64,
            icon_dir: PathBuf::from(DEFAULT_ICON_DIR),
            log_level: "info".to_string(),
            file_logging: false,
            commands: BTreeMap::new(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 330.0,
        }
    }
}

impl AppConfig {
    /// 进度条动画时长
    pub fn progress_duration(&self) -> Duration {
        Duration::from_millis(self.progress_duration_ms)
    }

    /// 校验配置，把无效字段恢复为默认值
    ///
    /// # 返回值
    ///
    /// 被修正字段的错误信息
    pub fn sanitize(&mut self) -> Vec<String> {
        let defaults = AppConfig::default();
        let mut errors = Vec::new();

        let (valid, mut window_errors) = ConfigValidator::validate_window(&self.window);
        if !valid {
            self.window = defaults.window;
            errors.append(&mut window_errors);
        }

        if let Err(e) = ConfigValidator::validate_progress_duration(self.progress_duration_ms) {
            self.progress_duration_ms = defaults.progress_duration_ms;
            errors.push(e);
        }

        if let Err(e) = ConfigValidator::validate_log_level(&self.log_level) {
            self.log_level = defaults.log_level;
            errors.push(e);
        }

        self.commands.retain(|action, argv| match ConfigValidator::validate_command(argv) {
            Ok(()) => true,
            Err(e) => {
                errors.push(format!("{}: {}", action, e));
                false
            },
        });

        errors
    }
}

/// 配置管理器
///
/// 负责配置文件的加载与保存
#[derive(Debug)]
pub struct ConfigManager {
    /// 配置文件路径
    config_path: PathBuf,
    /// 当前配置
    config: AppConfig,
}

impl ConfigManager {
    /// 从默认位置创建配置管理器
    pub fn new() -> Result<Self> {
        let base = config_dir().ok_or_else(|| anyhow!("无法获取配置目录"))?;
        Self::with_dir(base.join(APP_DIR_NAME))
    }

    /// 使用指定目录创建配置管理器
    ///
    /// # 参数
    ///
    /// * `dir` - 配置目录
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir).with_context(|| format!("创建配置目录失败: {:?}", dir))?;
            info!("创建配置目录: {:?}", dir);
        }

        let config_path = dir.join("config.json");
        let config = Self::load_config(&config_path)?;

        Ok(Self { config_path, config })
    }

    /// 加载配置文件
    ///
    /// 文件不存在时写入默认配置；格式错误时备份原文件并使用默认配置
    fn load_config(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            info!("配置文件不存在，使用默认配置: {:?}", path);
            let default_config = AppConfig::default();
            Self::save_config_to_file(&default_config, path)?;
            return Ok(default_config);
        }

        info!("加载配置文件: {:?}", path);
        let content = fs::read_to_string(path).with_context(|| format!("读取配置文件失败: {:?}", path))?;

        let mut config = match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("配置文件格式错误: {}, 使用默认配置", e);

                // 备份损坏的配置文件
                let backup_path = path.with_extension("json.backup");
                if let Err(backup_err) = fs::copy(path, &backup_path) {
                    warn!("备份损坏的配置文件失败: {}", backup_err);
                }

                let default_config = AppConfig::default();
                Self::save_config_to_file(&default_config, path)?;
                return Ok(default_config);
            },
        };

        for error in config.sanitize() {
            warn!("配置项无效，已使用默认值: {}", error);
        }

        Ok(config)
    }

    /// 保存配置到文件
    fn save_config_to_file(config: &AppConfig, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        fs::write(path, json).with_context(|| format!("写入配置文件失败: {:?}", path))?;
        info!("配置文件保存成功: {:?}", path);
        Ok(())
    }

    /// 获取当前配置
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取配置文件路径
    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}

/// 配置验证器
pub struct ConfigValidator;

impl ConfigValidator {
    /// 验证窗口设置
    pub fn validate_window(settings: &WindowSettings) -> (bool, Vec<String>) {
        let mut errors = Vec::new();

        if settings.width <= 0.0 || settings.width > 10000.0 {
            errors.push("窗口宽度无效".to_string());
        }
        if settings.height <= 0.0 || settings.height > 10000.0 {
            errors.push("窗口高度无效".to_string());
        }

        (errors.is_empty(), errors)
    }

    /// 验证进度条时长
    pub fn validate_progress_duration(ms: u64) -> Result<(), String> {
        if (1..=60_000).contains(&ms) {
            Ok(())
        } else {
            Err("进度条时长应在1-60000毫秒之间".to_string())
        }
    }

    /// 验证日志级别
    pub fn validate_log_level(level: &str) -> Result<(), String> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if valid_log_levels.contains(&level) {
            Ok(())
        } else {
            Err(format!("无效的日志级别: {}", level))
        }
    }

    /// 验证命令覆盖
    pub fn validate_command(argv: &[String]) -> Result<(), String> {
        match argv.first() {
            Some(program) if !program.trim().is_empty() => Ok(()),
            _ => Err("命令不能为空".to_string()),
        }
    }
}
