//! # coach-db
//!
//! PostgreSQL implementations of the repository traits defined in `coach-core`:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use coach_db::{create_pool, run_migrations, PgRelationshipRepository, PoolConfig};
//!
//! let pool = create_pool(&PoolConfig::from(&app_config.database)).await?;
//! run_migrations(&pool, &app_config.database.migrations_dir).await?;
//! let relationships = PgRelationshipRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgRelationshipRepository, PgTrainingRepository, PgUserRepository};
