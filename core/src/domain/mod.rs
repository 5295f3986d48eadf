//! Domain layer containing credential entities, value objects and the auth flows.

pub mod entities;
pub mod flows;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::*;
pub use flows::*;
pub use value_objects::*;
