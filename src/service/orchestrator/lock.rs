use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::Error;

/// Registry of per-course update locks.
///
/// Cloning shares the registry. At most one guard per course exists at a time.
#[derive(Clone, Debug, Default)]
pub struct CourseLocks {
    locks: Arc<Mutex<HashMap<i32, Arc<Mutex<()>>>>>,
}

impl CourseLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the update lock of a course without waiting.
    ///
    /// # Returns
    /// - `Ok(OwnedMutexGuard)` - Lock held until the guard is dropped
    /// - `Err(Error::UpdateInProgress)` - Another run holds the lock
    pub async fn try_acquire(&self, course_id: i32) -> Result<OwnedMutexGuard<()>, Error> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Entries only referenced by the registry belong to finished runs
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(course_id).or_default().clone()
        };

        lock.try_lock_owned()
            .map_err(|_| Error::UpdateInProgress(course_id))
    }
}
