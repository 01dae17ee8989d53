//! 应用程序主模块
//! 
//! 负责加载配置、初始化日志、组装分发表和命令运行器，并启动用户界面

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::core::actions::ActionTable;
use crate::core::executor::{CommandRunner, SystemCommandRunner};
use crate::ui::manager::{self, UIFlags};
use crate::utils::config::{AppConfig, ConfigManager};
use crate::utils::logger::LoggerManager;
use crate::utils::system;


/// 应用程序主结构体
pub struct App {
    /// 当前配置
    config: AppConfig,
    /// 动作分发表
    table: ActionTable,
    /// 命令运行器
    runner: Arc<dyn CommandRunner>,
}

impl App {
    /// 创建新的应用实例
    /// 
    /// 配置文件读取失败时使用默认配置继续启动
    pub fn new() -> Result<Self> {
        let config_manager = ConfigManager::new();
        let config = match &config_manager {
            Ok(manager) => manager.get_config().clone(),
            Err(_) => AppConfig::default(),
        };

        let mut logger = LoggerManager::new(&config.log_level, config.file_logging)
            .or_else(|_| LoggerManager::new(&config.log_level, false))?;
        logger.init()?;

        info!("SysPanel 启动中... 日志级别: {}", logger.get_log_level());
        if let Some(path) = logger.get_log_file_path() {
            info!("日志文件: {:?}", path);
        }
        match &config_manager {
            Ok(manager) => info!("配置文件: {:?}", manager.get_config_path()),
            Err(e) => warn!("加载配置失败，使用默认配置: {:#}", e),
        }

        let table = ActionTable::with_overrides(&config.icon_dir, &config.commands);

        system::check_required_programs(&table);

        Ok(Self {
            config,
            table,
            runner: Arc::new(SystemCommandRunner),
        })
    }

    /// 运行应用程序
    /// 
    /// 启动GUI界面并进入事件循环，窗口关闭后返回
    pub fn run(self) -> Result<()> {
        info!("启动用户界面...");

        let flags = UIFlags {
            table: self.table,
            runner: self.runner,
            progress_duration: self.config.progress_duration(),
        };

        manager::run_with_params(flags, self.config.window).context("用户界面运行失败")?;

        info!("窗口已关闭，退出");
        Ok(())
    }
}
