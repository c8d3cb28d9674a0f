//! Application state - shared across all handlers.

use std::sync::Arc;

use blogicum_core::ports::{Clock, Repositories, SystemClock};
use blogicum_core::services::{CommentService, FeedService, PostService};
use blogicum_infra::InMemoryStore;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub feed: FeedService,
    pub posts: PostService,
    pub comments: CommentService,
    /// Which storage backend serves the repositories.
    pub storage: &'static str,
    admin_usernames: Vec<String>,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store when
    /// no database is configured or reachable.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let repos = connect_postgres(config).await;

        #[cfg(not(feature = "postgres"))]
        let repos: Option<Repositories> = {
            tracing::info!("Running without postgres feature - using in-memory repository");
            None
        };

        let state = match repos {
            Some(repos) => Self::from_repositories(repos, config.page_size, "postgres"),
            None => Self::in_memory(config.page_size),
        };
        state.with_admins(config.admin_usernames.clone())
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(page_size: u64) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::from_repositories(store.repositories(), page_size, "memory")
    }

    pub fn from_repositories(repos: Repositories, page_size: u64, storage: &'static str) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        tracing::info!(storage, page_size, "Application state initialized");

        Self {
            feed: FeedService::new(repos.clone(), clock.clone(), page_size),
            posts: PostService::new(repos.clone()),
            comments: CommentService::new(repos.clone(), clock),
            repos,
            storage,
            admin_usernames: Vec::new(),
        }
    }

    /// Usernames promoted to administrator on registration or login.
    pub fn with_admins(mut self, usernames: Vec<String>) -> Self {
        if !usernames.is_empty() {
            tracing::info!(count = usernames.len(), "Administrator accounts configured");
        }
        self.admin_usernames = usernames;
        self
    }

    pub fn is_configured_admin(&self, username: &str) -> bool {
        self.admin_usernames.iter().any(|name| name == username)
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(config: &AppConfig) -> Option<Repositories> {
    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return None;
    };

    match blogicum_infra::database::connect(db_config).await {
        Ok(db) => {
            if config.run_migrations {
                run_migrations(&db).await;
            }
            Some(blogicum_infra::postgres_repositories(db))
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            None
        }
    }
}

#[cfg(feature = "postgres")]
async fn run_migrations(db: &blogicum_infra::database::DbConn) {
    use migration::{Migrator, MigratorTrait};

    match Migrator::up(db, None).await {
        Ok(()) => tracing::info!("Database migrations applied"),
        Err(e) => tracing::error!("Failed to apply migrations: {}", e),
    }
}
