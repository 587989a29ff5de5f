//! Core primitives.
//!
//! Small leaf types with no game semantics of their own.

pub mod shutdown;
pub mod vec2;

// Re-export core types
pub use shutdown::Shutdown;
pub use vec2::Vec2;
