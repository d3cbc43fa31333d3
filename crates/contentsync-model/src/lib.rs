pub mod config;
pub mod entry;
pub mod slug;

pub use config::*;
pub use entry::*;
pub use slug::*;
