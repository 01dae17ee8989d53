//! SysPanel - 轻量化Linux系统控制面板
//! 
//! 提供关机、重启、更新和升级四个按钮，
//! 每个操作在确认后调用对应的系统命令。

mod app;
mod core;
mod ui;
mod utils;


/// 应用程序入口点
/// 
/// 加载配置、初始化日志系统并启动GUI
fn main() -> anyhow::Result<()> {
    let app = app::App::new()?;
    app.run()
}
