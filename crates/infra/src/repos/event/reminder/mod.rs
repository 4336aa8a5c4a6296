mod inmemory;
mod sqlite;

pub use inmemory::InMemoryReminderRepo;
use planner_domain::{Reminder, ID};
pub(crate) use sqlite::insert_reminder;
pub use sqlite::SqliteReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    /// In insertion order
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    async fn find_undelivered(&self) -> anyhow::Result<Vec<Reminder>>;
    /// Returns false when there is no such reminder
    async fn mark_delivered(&self, reminder_id: &ID) -> anyhow::Result<bool>;
}
