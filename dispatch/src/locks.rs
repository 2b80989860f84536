//! Per-conversation-key lock table.
//!
//! Serializes dispatches touching the same conversation key so handlers'
//! read-modify-write of state cannot race, while dispatches on different
//! keys proceed independently.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use tgbot_core::ConversationKey;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct KeyLockTable {
    locks: StdMutex<HashMap<ConversationKey, Arc<Mutex<()>>>>,
}

impl KeyLockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for `key`, waiting if another dispatch holds it.
    /// The guard must be held for the full dispatch.
    pub async fn acquire(&self, key: ConversationKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Entries referenced only by the table belong to finished
            // dispatches; prune them so the table does not grow with every
            // conversation ever seen.
            locks.retain(|_, l| Arc::strong_count(l) > 1);
            locks.entry(key).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn key(n: i64) -> ConversationKey {
        ConversationKey {
            chat_id: n,
            user_id: n,
        }
    }

    /// **Test: the same key is held exclusively: a second acquire waits.**
    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let table = Arc::new(KeyLockTable::new());
        let concurrent = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut tasks = Vec::new();
        for _ in 0..4 {
            let table = table.clone();
            let concurrent = concurrent.clone();
            let max_seen = max_seen.clone();
            tasks.push(tokio::spawn(async move {
                let _guard = table.acquire(key(1)).await;
                let now = concurrent.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                concurrent.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    /// **Test: different keys do not block each other.**
    #[tokio::test]
    async fn test_different_keys_run_concurrently() {
        let table = Arc::new(KeyLockTable::new());
        let barrier = Arc::new(tokio::sync::Barrier::new(2));

        let mut tasks = Vec::new();
        for n in [1, 2] {
            let table = table.clone();
            let barrier = barrier.clone();
            tasks.push(tokio::spawn(async move {
                let _guard = table.acquire(key(n)).await;
                // Both tasks must be inside their critical sections at once
                // for the barrier to release.
                barrier.wait().await;
            }));
        }

        tokio::time::timeout(Duration::from_secs(1), async {
            for task in tasks {
                task.await.unwrap();
            }
        })
        .await
        .expect("dispatches on different keys blocked each other");
    }

    /// **Test: released entries are pruned on later acquires.**
    #[tokio::test]
    async fn test_idle_entries_are_pruned() {
        let table = KeyLockTable::new();
        for n in 0..32 {
            let _guard = table.acquire(key(n)).await;
        }
        let _guard = table.acquire(key(99)).await;
        // Only the entry still held may remain.
        assert_eq!(table.len(), 1);
    }
}
