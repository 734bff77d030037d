//! 重试策略

use std::time::Duration;

/// 分块翻译的重试与节流策略
///
/// 总尝试次数为 `retries_per_key × 密钥数量`。暂停是阻塞式的，
/// 发生在处理请求的工作线程上。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 每个密钥的尝试次数
    pub retries_per_key: usize,
    /// 429/503/400 之后的暂停
    pub retry_delay: Duration,
    /// 相邻分块之间的暂停
    pub chunk_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries_per_key: 3,
            retry_delay: Duration::from_millis(1000),
            chunk_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// 不做任何暂停的策略
    pub fn immediate(retries_per_key: usize) -> Self {
        Self {
            retries_per_key,
            retry_delay: Duration::ZERO,
            chunk_delay: Duration::ZERO,
        }
    }

    /// 给定密钥数量时的最大尝试次数
    pub fn max_attempts(&self, key_count: usize) -> usize {
        self.retries_per_key.max(1) * key_count.max(1)
    }

    /// 第 `attempt` 次尝试（从 1 开始）被限流后的等待时长
    ///
    /// 固定间隔；最后一次尝试之后不再等待。
    pub fn delay_after(&self, attempt: usize, max_attempts: usize) -> Duration {
        if attempt >= max_attempts {
            Duration::ZERO
        } else {
            self.retry_delay
        }
    }

    /// 阻塞当前线程
    pub fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
