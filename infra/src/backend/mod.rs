//! Backend test doubles

pub mod mock;

pub use mock::{MockAuthBackend, RecordedCall};
