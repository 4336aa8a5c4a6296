mod config;
mod repos;
mod system;

use chrono::{NaiveDateTime, Timelike};
pub use chrono_tz::Tz;
pub use config::Config;
pub use repos::{IEventRepo, IReminderRepo, Repos};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::warn;

#[derive(Clone)]
pub struct PlannerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl PlannerContext {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = match &config.database_url {
            Some(url) => Repos::create_sqlite(url).await?,
            None => {
                warn!("DATABASE_URL is not set, events are only kept in memory.");
                Repos::create_inmemory()
            }
        };
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
        })
    }

    /// Wall-clock time in the configured timezone, truncated to seconds
    pub fn now(&self) -> NaiveDateTime {
        let now = self
            .sys
            .get_utc_now()
            .with_timezone(&self.config.timezone)
            .naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<PlannerContext> {
    PlannerContext::create(Config::new()).await
}
