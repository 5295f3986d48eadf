//! Cache module for in-progress auth flows
//!
//! Flows live in process memory only; a restart drops every flow and the
//! client simply starts the form again.

pub mod flow_store;

#[cfg(test)]
mod tests;

pub use flow_store::{FlowGuard, FlowStore, FlowView};
