//! Value objects representing immutable domain concepts.

pub mod redirect;

pub use redirect::{Redirect, Route};
