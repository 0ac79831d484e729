//! Navigation state (pure transitions plus one stateful owner).
//!
//! - [`path`]: the anchor path, seeding, drill and compaction rules
//! - [`controller`]: [`NavigationController`], the single writer of the path
//! - [`click`]: `COL:ID` scripted clicks

pub mod click;
pub mod controller;
pub mod path;

// Re-export for convenience
pub use click::{ClickError, ClickSpec};
pub use controller::NavigationController;
pub use path::{seed, AnchorPath, Compaction};
