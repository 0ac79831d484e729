//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod node;

// Re-export for convenience
pub use error::{AppError, InputError, NavigationError, RouteSkip};
pub use identifiers::{InvalidNodeId, NodeId, SYNTHETIC_ROOT_ID};
pub use node::{Node, NodeRef};
