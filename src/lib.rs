//! The `todovault` library crate.
//!
//! Core business logic for a multi-user todo-list backend: bearer-token
//! authentication, ownership-scoped todo/item persistence, routing
//! configuration, and error handling. The binary (`main.rs`) uses this
//! crate to construct and run the server.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod routes;
