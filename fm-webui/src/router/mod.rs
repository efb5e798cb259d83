//! Router module.
//!
//! Provides the fragment-based `Router` and the `register_views!` macro.

pub mod core;
pub mod macros;

pub use self::core::Router;
