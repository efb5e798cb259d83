//! View module.
//!
//! Provides the `View` trait implemented by every page the router can show.

pub mod traits;

pub use traits::{View, ViewFactory};
