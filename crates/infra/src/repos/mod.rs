mod event;
mod shared;

pub use event::{IEventRepo, IReminderRepo};
use event::{
    InMemoryEventRepo, InMemoryReminderRepo, SqliteEventRepo, SqliteReminderRepo,
};
use shared::inmemory_repo::InMemoryStore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{str::FromStr, sync::Arc};
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
}

impl Repos {
    pub async fn create_sqlite(connection_string: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(connection_string)?
            .create_if_missing(true)
            .foreign_keys(true);
        // Every connection to an in-memory database sees its own database
        let in_memory =
            connection_string.contains(":memory:") || connection_string.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        info!("DB CHECKING CONNECTION ...");
        let pool = pool_options.connect_with(options).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            events: Arc::new(SqliteEventRepo::new(pool.clone())),
            reminders: Arc::new(SqliteReminderRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        let store = Arc::new(InMemoryStore::default());
        Self {
            events: Arc::new(InMemoryEventRepo::new(store.clone())),
            reminders: Arc::new(InMemoryReminderRepo::new(store)),
        }
    }
}
