//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and runs the operation against the scanner or the tag database.

pub mod browse;
pub mod config;
pub mod scan;
pub mod shorten;
pub mod tag;
pub mod tags;

// Re-export execute functions for convenience
pub use browse::execute as browse;
pub use config::execute as config;
pub use scan::execute as scan;
pub use shorten::execute as shorten;
pub use tag::execute as tag;
pub use tag::untag;
pub use tags::execute as tags;
