//! 日志管理模块
//!
//! 负责日志系统的初始化：控制台输出，可选的按日期命名的日志文件

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use dirs::data_local_dir;
use env_logger::{Builder, Env, Target};
use log::{info, warn, LevelFilter};

/// 日志管理器
#[derive(Debug)]
pub struct LoggerManager {
    /// 日志文件路径
    log_file_path: Option<PathBuf>,
    /// 日志级别
    log_level: LevelFilter,
}

impl LoggerManager {
    /// 创建新的日志管理器
    ///
    /// # 参数
    ///
    /// * `log_level` - 日志级别字符串，无法识别时使用info
    /// * `enable_file_logging` - 是否写入日志文件
    pub fn new(log_level: &str, enable_file_logging: bool) -> Result<Self> {
        let log_file_path = if enable_file_logging {
            Some(Self::create_log_file_path()?)
        } else {
            None
        };

        Ok(Self {
            log_file_path,
            log_level: Self::parse_level(log_level),
        })
    }

    /// 解析日志级别
    pub fn parse_level(level: &str) -> LevelFilter {
        LevelFilter::from_str(level).unwrap_or(LevelFilter::Info)
    }

    /// 获取日志文件路径
    fn create_log_file_path() -> Result<PathBuf> {
        let data_dir = data_local_dir().ok_or_else(|| anyhow!("无法获取本地数据目录"))?;
        let log_dir = data_dir.join("SysPanel").join("logs");

        if !log_dir.exists() {
            fs::create_dir_all(&log_dir).with_context(|| format!("创建日志目录失败: {:?}", log_dir))?;
        }

        Ok(log_dir.join(Self::log_file_name(Local::now())))
    }

    /// 按日期生成日志文件名
    fn log_file_name(now: chrono::DateTime<Local>) -> String {
        format!("syspanel_{}.log", now.format("%Y%m%d"))
    }

    /// 初始化日志系统
    ///
    /// RUST_LOG 环境变量优先于配置中的级别
    ///
    /// 日志文件无法打开时退回控制台输出
    pub fn init(&mut self) -> Result<()> {
        let mut builder = Builder::new();
        builder.filter_level(self.log_level);
        builder.parse_env(Env::default());

        builder.format(|buf, record| {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            writeln!(
                buf,
                "[{}] [{}] [{}] {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            )
        });

        let (target, file_error) = self.log_target();
        builder.target(target);

        builder.try_init().map_err(|e| anyhow!("日志系统初始化失败: {}", e))?;

        if let Some(e) = file_error {
            warn!("{:#}，改用控制台输出", e);
        }

        info!(
            "日志系统初始化完成 - {}",
            if self.log_file_path.is_some() { "文件" } else { "控制台" }
        );
        Ok(())
    }

    /// 选择日志输出目标
    ///
    /// 日志文件打不开时清除文件路径并返回控制台目标，同时带回打开失败的错误
    fn log_target(&mut self) -> (Target, Option<anyhow::Error>) {
        let Some(file_path) = &self.log_file_path else {
            return (Target::Stderr, None);
        };

        let opened = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)
            .with_context(|| format!("打开日志文件失败: {:?}", file_path));

        match opened {
            Ok(file) => (Target::Pipe(Box::new(file)), None),
            Err(e) => {
                self.log_file_path = None;
                (Target::Stderr, Some(e))
            },
        }
    }

    /// 获取日志级别
    pub fn get_log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// 获取日志文件路径
    pub fn get_log_file_path(&self) -> Option<&Path> {
        self.log_file_path.as_deref()
    }
}
