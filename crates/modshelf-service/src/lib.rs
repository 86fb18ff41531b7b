//! Service layer for Modshelf
//!
//! Sits between the API and database layers and implements the catalog's
//! decision logic:
//!
//! - **PublishService**: the publish/versioning workflow - validation,
//!   slug assignment with conflict retry, object-store write ordering,
//!   and the mod + version catalog insert.
//! - **CatalogService**: list/detail/facet reads, parameter clamping, and
//!   cursor pagination.

pub mod catalog;
pub mod dto;
pub mod error;
pub mod pagination;
pub mod publish;

#[cfg(test)]
mod testing;

pub use catalog::{CatalogService, DefaultCatalogService};
pub use dto::*;
pub use error::{ServiceError, ServiceResult};
pub use pagination::Page;
pub use publish::{DefaultPublishService, PublishService};

use modshelf_db::CatalogRepository;
use modshelf_storage::ObjectStore;
use std::sync::Arc;

/// Service registry that holds all service instances.
///
/// Provides a convenient way to wire the services together with consistent
/// dependency injection.
#[derive(Clone)]
pub struct ServiceRegistry {
    /// Publish workflow
    pub publish: Arc<dyn PublishService>,
    /// Catalog reads
    pub catalog: Arc<dyn CatalogService>,
}

impl ServiceRegistry {
    /// Create a new service registry with default implementations
    pub fn new(repository: Arc<dyn CatalogRepository>, store: Arc<dyn ObjectStore>) -> Self {
        let publish = Arc::new(DefaultPublishService::new(repository.clone(), store));
        let catalog = Arc::new(DefaultCatalogService::new(repository));

        Self { publish, catalog }
    }

    /// Create a service registry from custom implementations
    pub fn with_services(
        publish: Arc<dyn PublishService>,
        catalog: Arc<dyn CatalogService>,
    ) -> Self {
        Self { publish, catalog }
    }
}
