//! CLI command handling

pub mod fatal;
pub mod notify;

pub use fatal::*;
pub use notify::*;
