//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → wait_for_signal resolves
//!
//! Shutdown (shutdown.rs):
//!     trigger → broadcast → health monitor (and any other loop) exits
//! ```
//!
//! One-shot commands never install handlers; only `monitor` runs long
//! enough to need them.

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
