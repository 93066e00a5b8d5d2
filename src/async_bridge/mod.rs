//! Shared tokio runtime used to run blocking client calls off the caller's
//! thread and deliver results through a callback.

use crate::error::{ImateError, Result};
use std::sync::OnceLock;
use tokio::runtime::Runtime;

static RUNTIME: OnceLock<std::result::Result<Runtime, String>> = OnceLock::new();

fn runtime() -> Result<&'static Runtime> {
    let runtime = RUNTIME.get_or_init(|| {
        Runtime::new().map_err(|e| format!("Failed to create tokio runtime: {}", e))
    });

    match runtime {
        Ok(rt) => Ok(rt),
        Err(msg) => Err(ImateError::Internal(msg.clone())),
    }
}

/// Idempotent warm-up of the shared runtime.
pub fn init_runtime() {
    if let Err(e) = runtime() {
        log::error!("init_runtime failed: {}", e);
    }
}

/// Runs `job` on a worker thread and invokes `callback` with its result,
/// exactly once. A job that panics is reported through the same callback
/// as an internal error. There is no cancellation: once dispatched, the
/// job runs to completion or failure.
pub fn dispatch<T, F, C>(job: F, callback: C)
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
    C: FnOnce(Result<T>) + Send + 'static,
{
    let rt = match runtime() {
        Ok(rt) => rt,
        Err(e) => {
            callback(Err(e));
            return;
        }
    };

    rt.spawn(async move {
        let outcome = match tokio::task::spawn_blocking(job).await {
            Ok(result) => result,
            Err(join_err) => Err(ImateError::Internal(format!(
                "Dispatched job failed: {}",
                join_err
            ))),
        };
        callback(outcome);
    });
}
