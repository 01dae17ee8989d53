//! 进度动画模块
//!
//! 纯装饰性的进度条动画：在固定时长内从0线性增长到100，与命令的实际进度无关

use std::time::{Duration, Instant};

/// 默认动画时长
pub const DEFAULT_PROGRESS_DURATION: Duration = Duration::from_millis(3000);

/// 进度条取值范围上限
pub const PROGRESS_MAX: f32 = 100.0;

/// 进度动画
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressAnimation {
    /// 开始时间
    started_at: Instant,
    /// 动画时长
    duration: Duration,
    /// 最近一次采样的值
    value: f32,
}

impl ProgressAnimation {
    /// 从指定时刻开始动画
    pub fn start(started_at: Instant, duration: Duration) -> Self {
        Self {
            started_at,
            duration,
            value: 0.0,
        }
    }

    /// 计算某一时刻的进度值
    pub fn value_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return PROGRESS_MAX;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        let ratio = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        (ratio * PROGRESS_MAX).clamp(0.0, PROGRESS_MAX)
    }

    /// 推进到指定时刻，返回新的进度值
    pub fn advance(&mut self, now: Instant) -> f32 {
        self.value = self.value_at(now);
        self.value
    }

    /// 当前进度值
    pub fn value(&self) -> f32 {
        self.value
    }

    /// 动画是否已到达终点
    pub fn is_finished(&self) -> bool {
        self.value >= PROGRESS_MAX
    }
}
