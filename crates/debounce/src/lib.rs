//! Trailing-edge debouncing for callbacks
//!
//! This crate provides:
//! - [`Debounced`]: a callable that runs its callback once calls stop for a delay
//! - A pluggable [`Scheduler`] timer seam (tokio-backed by default)
//! - [`ManualScheduler`], a virtual clock for deterministic tests
//! - [`DebounceConfig`] for loading delays from TOML
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> debounce::Result<()> {
//!     let save = debounce::wrap(|doc: String| println!("saving {doc}"))?;
//!
//!     save.call("draft 1".to_string());
//!     save.call("draft 2".to_string());
//!
//!     // Only "draft 2" is saved, 300ms after the second call.
//!     tokio::time::sleep(Duration::from_millis(400)).await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod invoker;
pub mod manual;
pub mod scheduler;

use std::time::Duration;

// Re-exports
pub use config::{delay_from_millis, DebounceConfig};
pub use error::{DebounceError, Result};
pub use invoker::{DebounceStats, Debounced};
pub use manual::{ManualScheduler, TimerId};
pub use scheduler::{Scheduler, Task, TokioScheduler};

/// Quiet period used by [`wrap`]
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Debounce `callback` with the default 300ms delay
///
/// Must be called from within a tokio runtime. The callback's return value
/// is discarded.
pub fn wrap<A, F, R>(callback: F) -> Result<Debounced<A>>
where
    A: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
    R: 'static,
{
    wrap_with_delay(callback, DEFAULT_DELAY)
}

/// Debounce `callback` with a custom delay
pub fn wrap_with_delay<A, F, R>(callback: F, delay: Duration) -> Result<Debounced<A>>
where
    A: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
    R: 'static,
{
    let scheduler = TokioScheduler::current()?;
    Ok(Debounced::new(callback, delay, scheduler))
}

/// Debounce `callback` with the delay from `config`
pub fn wrap_with_config<A, F, R>(callback: F, config: &DebounceConfig) -> Result<Debounced<A>>
where
    A: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
    R: 'static,
{
    wrap_with_delay(callback, config.delay())
}
