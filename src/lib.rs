//! Todo Lists Server
//!
//! Layered architecture:
//! - domain: Core entities and validation rules
//! - repository: Data access abstractions and SQLite implementations
//! - handlers: Resource handlers returning render/redirect/navigate outcomes
//! - http: axum router, HTML views, flash cookie
//! - config: Environment-driven settings

pub mod config;
pub mod domain;
pub mod handlers;
pub mod http;
pub mod repository;
pub mod routes;
