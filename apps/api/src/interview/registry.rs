use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::controller::InterviewController;

/// One controller per owner, each behind its own async mutex.
///
/// Handlers never wait for the lock: a second request while one is running
/// gets `RequestInFlight`, so a double-click cannot submit the same answer twice.
#[derive(Default)]
pub struct InterviewRegistry {
    controllers: Mutex<HashMap<Uuid, Arc<AsyncMutex<InterviewController>>>>,
}

impl InterviewRegistry {
    fn controller(&self, owner_id: Uuid) -> Arc<AsyncMutex<InterviewController>> {
        let mut controllers = self
            .controllers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        controllers
            .entry(owner_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(InterviewController::new(owner_id))))
            .clone()
    }

    pub fn try_acquire(&self, owner_id: Uuid) -> Result<OwnedMutexGuard<InterviewController>, AppError> {
        self.controller(owner_id)
            .try_lock_owned()
            .map_err(|_| AppError::RequestInFlight)
    }
}
