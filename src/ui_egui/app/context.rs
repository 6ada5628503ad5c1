use crate::models::config::AppConfig;
use crate::services::profile::ProfileService;
use crate::services::schedule::ScheduleService;
use crate::services::store::SqliteDocumentStore;
use crate::services::template::TemplateService;

/// Shared access point for the store and the services built on it.
pub struct AppContext {
    store: SqliteDocumentStore,
    config: AppConfig,
}

impl AppContext {
    pub fn new(store: SqliteDocumentStore, config: AppConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &SqliteDocumentStore {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn schedule_service(&self) -> ScheduleService<'_> {
        ScheduleService::new(&self.store)
    }

    pub fn template_service(&self) -> TemplateService<'_> {
        TemplateService::new(&self.store)
    }

    pub fn profile_service(&self) -> ProfileService<'_> {
        ProfileService::new(&self.store)
    }
}
