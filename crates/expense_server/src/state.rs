//! Shared handler state.

use crate::error::ApiError;
use expense_core::{ServiceResult, UnitOfWork};
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct AppState {
    uow: UnitOfWork,
}

impl AppState {
    pub fn new(uow: UnitOfWork) -> Self {
        Self { uow }
    }

    /// Runs `action` in one unit of work on the blocking pool.
    ///
    /// The core is synchronous; keeping it off the async workers stops a
    /// long transaction from stalling unrelated requests.
    pub async fn run<T, F>(&self, action: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> ServiceResult<T> + Send + 'static,
    {
        let uow = self.uow.clone();
        let outcome = tokio::task::spawn_blocking(move || uow.run(action)).await?;
        Ok(outcome?)
    }
}
