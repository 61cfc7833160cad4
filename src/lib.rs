//! User API - user management REST service
//!
//! Create, read, list (paginated), partially update and soft-delete users
//! over HTTP, backed by PostgreSQL through SeaORM.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity and validation rules
//! - **services**: Use cases (uniqueness, existence checks, pagination)
//! - **infra**: Database, migrations and repository implementations
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Start without a database
//! cargo run -- serve --in-memory
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::User;
pub use errors::{AppError, AppResult};
