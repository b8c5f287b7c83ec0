//! Shared kernel - error types, result alias and cross-cutting helpers
pub mod cancellation;
pub mod error;
pub mod result;
pub mod security;

pub use cancellation::CancellationToken;
pub use result::Result;
