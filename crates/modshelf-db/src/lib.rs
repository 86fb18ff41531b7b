//! Database layer for Modshelf
//!
//! This crate provides catalog persistence, including:
//! - Connection pool management
//! - The `CatalogRepository` trait abstracting catalog operations
//! - A PostgreSQL implementation built on SQLx
//! - The dynamic catalog query (`CatalogQuery`) composed from optional
//!   filter dimensions
//! - Database migrations and error classification
//!
//! # Example
//!
//! ```rust,no_run
//! use modshelf_db::{create_pool, PoolConfig, PostgresCatalog};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PoolConfig::new("postgres://localhost/modshelf").max_connections(10);
//! let pool = create_pool(&config).await?;
//! let catalog = PostgresCatalog::new(pool);
//! # Ok(())
//! # }
//! ```

// Re-export core domain types for convenience
pub use modshelf_core;

pub mod error;
pub mod pool;
pub mod postgres;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{close_pool, create_pool, run_migrations, verify_pool_health, PoolConfig};
pub use postgres::PostgresCatalog;
pub use repository::{
    CatalogQuery, CatalogRepository, DateWindow, NewMod, NewVersion, SortMode,
};

// Re-export sqlx types that users may need
pub use sqlx::postgres::PgPool;
