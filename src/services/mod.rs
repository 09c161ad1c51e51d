//! Business logic services

pub mod admin;
pub mod catalog;
pub mod session;

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{config::CatalogConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub admin: admin::AdminService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        catalog_config: &CatalogConfig,
        sessions: Arc<dyn session::SessionStore>,
    ) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone(), sessions, catalog_config.page_size),
            admin: admin::AdminService::new(repository, catalog_config.admin_page_size),
        }
    }
}

/// Local calendar date, the reference for overdue flags and date filters
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
