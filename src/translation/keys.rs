//! API 密钥池
//!
//! 所有请求共享同一个游标。游标是原子变量，并发轮换不会损坏状态，
//! 但不同请求之间的轮换顺序没有保证。

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::KeyPoolError;

/// 带轮换游标的密钥池
pub struct KeyPool {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl KeyPool {
    /// 创建密钥池
    ///
    /// 去除空白与空值，按首次出现顺序去重；结果为空时返回错误。
    pub fn new<I, S>(keys: I) -> Result<Self, KeyPoolError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into().trim().to_string();
            if !key.is_empty() && !unique.contains(&key) {
                unique.push(key);
            }
        }

        if unique.is_empty() {
            return Err(KeyPoolError::Empty);
        }

        Ok(Self {
            keys: unique,
            cursor: AtomicUsize::new(0),
        })
    }

    /// 密钥数量
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// 当前密钥索引
    pub fn current_index(&self) -> usize {
        self.cursor.load(Ordering::SeqCst) % self.keys.len()
    }

    /// 当前密钥及其索引
    pub fn current(&self) -> (usize, &str) {
        let index = self.current_index();
        (index, self.keys[index].as_str())
    }

    /// 轮换到下一个密钥并返回新索引，只有一个密钥时不变
    pub fn rotate(&self) -> usize {
        let len = self.keys.len();
        if len <= 1 {
            return 0;
        }

        let previous = self
            .cursor
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |i| Some((i + 1) % len))
            .unwrap_or_else(|i| i);
        let next = (previous + 1) % len;

        tracing::warn!("切换到 API 密钥索引: {}", next);
        next
    }
}

impl fmt::Debug for KeyPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPool")
            .field("keys", &self.keys.len())
            .field("current", &self.current_index())
            .finish()
    }
}
