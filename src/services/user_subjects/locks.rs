//! 按 (学生, 学位项目) 串行化进度同步

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, OwnedMutexGuard};

static SYNC_LOCKS: Lazy<SyncLockRegistry> = Lazy::new(SyncLockRegistry::new);

/// 同步锁注册表
pub struct SyncLockRegistry {
    /// "user:program" -> 互斥锁
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SyncLockRegistry {
    fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// 获取全局实例
    pub fn get() -> &'static Self {
        &SYNC_LOCKS
    }

    fn key(user_id: &str, program_id: &str) -> String {
        format!("{user_id}:{program_id}")
    }

    /// 取得 (学生, 项目) 对应的锁；同一组合共享同一把锁
    pub fn lock_for(&self, user_id: &str, program_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(Self::key(user_id, program_id))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// 等待并持有锁
    pub async fn acquire(&self, user_id: &str, program_id: &str) -> OwnedMutexGuard<()> {
        self.lock_for(user_id, program_id).lock_owned().await
    }

    /// 释放不再被任何人持有的锁条目
    pub fn release(&self, user_id: &str, program_id: &str) {
        self.locks
            .remove_if(&Self::key(user_id, program_id), |_, lock| {
                Arc::strong_count(lock) == 1
            });
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_pair_shares_lock() {
        let registry = SyncLockRegistry::new();
        let a = registry.lock_for("u1", "p1");
        let b = registry.lock_for("u1", "p1");
        assert!(Arc::ptr_eq(&a, &b));

        let other = registry.lock_for("u1", "p2");
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[tokio::test]
    async fn test_second_holder_waits() {
        let registry = SyncLockRegistry::new();
        let guard = registry.acquire("u1", "p1").await;
        assert!(registry.lock_for("u1", "p1").try_lock().is_err());
        // 其他组合不受影响
        assert!(registry.lock_for("u2", "p1").try_lock().is_ok());
        drop(guard);
        assert!(registry.lock_for("u1", "p1").try_lock().is_ok());
    }

    #[tokio::test]
    async fn test_release_keeps_lock_in_use() {
        let registry = SyncLockRegistry::new();
        let held = registry.lock_for("u1", "p1");
        registry.release("u1", "p1");
        assert_eq!(registry.len(), 1);

        drop(held);
        registry.release("u1", "p1");
        assert_eq!(registry.len(), 0);
    }
}
