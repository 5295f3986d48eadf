//! # Community Web API
//!
//! actix-web gateway in front of the community GraphQL backend. Each form
//! of the web client posts here; the gateway drives the auth flow, calls
//! the backend and writes the session cookies.

pub mod app;
pub mod config;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
