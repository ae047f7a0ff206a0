//! Bookshelf application library
//!
//! Wires the book catalog module onto the kernel, database, and HTTP crates.

pub mod app;
pub mod modules;

pub use app::Application;
