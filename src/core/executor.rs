//! 命令执行器模块
//!
//! 在异步任务中启动外部进程并等待其退出，不捕获标准输出和错误输出

use async_trait::async_trait;
use log::{error, info, warn};
use std::fmt;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;
use tokio::process::Command as AsyncCommand;

use crate::core::types::{Completion, ExecError, Execution, ExitReport};

/// 命令运行器
///
/// 实际启动进程的接口，测试中用记录型实现替换
#[async_trait]
pub trait CommandRunner: Send + Sync + fmt::Debug {
    /// 运行参数向量并等待进程退出
    async fn run(&self, argv: &[String]) -> Result<ExitReport, ExecError>;
}

/// 系统命令运行器
///
/// 继承父进程的标准输入输出，sudo的交互式提示由终端处理
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, argv: &[String]) -> Result<ExitReport, ExecError> {
        let (program, args) = argv.split_first().ok_or(ExecError::EmptyCommand)?;

        let mut child = AsyncCommand::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| ExecError::Spawn {
                program: program.clone(),
                reason: e.to_string(),
            })?;

        let status = child.wait().await.map_err(|e| ExecError::Wait {
            program: program.clone(),
            reason: e.to_string(),
        })?;

        Ok(ExitReport { code: status.code() })
    }
}

/// 运行一条命令
///
/// 退出码只记录到日志，不影响后续流程
pub async fn run_command(runner: &dyn CommandRunner, argv: &[String]) -> Result<ExitReport, ExecError> {
    info!("执行命令: {:?}", argv);

    let result = runner.run(argv).await;
    match &result {
        Ok(report) if report.success() => info!("命令执行完成: {:?}", argv),
        Ok(report) => warn!("命令以非零状态退出: {:?}, 退出码: {:?}", argv, report.code),
        Err(e) => error!("命令执行失败: {:?}, {}", argv, e),
    }

    result
}

/// 执行一次已确认的动作
///
/// 无论是否显示进度条，命令都只运行一次；进度条的显示与隐藏由面板状态负责
pub async fn execute(execution: Execution, runner: Arc<dyn CommandRunner>) -> Completion {
    let started = Instant::now();
    info!(
        "开始执行 {} [{}]{}",
        execution.action,
        execution.id,
        if execution.with_progress { "，显示进度条" } else { "" }
    );

    let result = run_command(runner.as_ref(), &execution.argv).await;

    Completion {
        id: execution.id,
        action: execution.action,
        result,
        elapsed: started.elapsed(),
    }
}

#[cfg(test)]
pub mod testing {
    //! 测试用的命令运行器

    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    /// 记录所有参数向量而不启动进程
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        calls: Mutex<Vec<Vec<String>>>,
        delay: Duration,
        exit_code: i32,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// 模拟耗时的命令
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn with_exit_code(mut self, exit_code: i32) -> Self {
            self.exit_code = exit_code;
            self
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for RecordingRunner {
        async fn run(&self, argv: &[String]) -> Result<ExitReport, ExecError> {
            self.calls.lock().unwrap().push(argv.to_vec());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(ExitReport { code: Some(self.exit_code) })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingRunner;
    use super::*;
    use crate::core::actions::ActionTable;
    use crate::core::types::PowerAction;
    use std::time::Duration;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_run_command_invokes_runner_once() {
        let runner = RecordingRunner::new();
        let result = run_command(&runner, &argv(&["sudo", "reboot"])).await;

        assert_eq!(result, Ok(ExitReport { code: Some(0) }));
        assert_eq!(runner.calls(), vec![argv(&["sudo", "reboot"])]);
    }

    #[tokio::test]
    async fn test_execute_with_progress_runs_once_regardless_of_duration() {
        let table = ActionTable::default();

        for delay in [Duration::ZERO, Duration::from_millis(50)] {
            let runner = Arc::new(RecordingRunner::new().with_delay(delay));
            let execution = Execution::from_spec(table.get(PowerAction::Upgrade));
            let id = execution.id;

            let completion = execute(execution, runner.clone()).await;

            assert_eq!(completion.id, id);
            assert_eq!(runner.calls(), vec![argv(&["sudo", "apt", "upgrade", "-y"])]);
        }
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_reported_not_raised() {
        let runner = Arc::new(RecordingRunner::new().with_exit_code(100));
        let execution = Execution::from_spec(ActionTable::default().get(PowerAction::Update));

        let completion = execute(execution, runner).await;
        let report = tokio_test::assert_ok!(completion.result);
        assert!(!report.success());
        assert_eq!(report.code, Some(100));
    }

    #[tokio::test]
    async fn test_empty_command_rejected() {
        let result = SystemCommandRunner.run(&[]).await;
        assert_eq!(result, Err(ExecError::EmptyCommand));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let result = SystemCommandRunner
            .run(&argv(&["syspanel-definitely-not-a-real-program"]))
            .await;
        assert!(matches!(result, Err(ExecError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_reports_exit_code() {
        let result = SystemCommandRunner.run(&argv(&["sh", "-c", "exit 3"])).await;
        assert_eq!(result, Ok(ExitReport { code: Some(3) }));

        let result = SystemCommandRunner.run(&argv(&["true"])).await;
        assert!(tokio_test::assert_ok!(result).success());
    }
}
