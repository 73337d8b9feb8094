//! Public runtime API surface.
//!
//! Re-exports the cloneable [`RuntimeHandle`] and the [`RuntimeError`] type
//! so clients can drive a session without touching worker internals.
mod errors;
mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
