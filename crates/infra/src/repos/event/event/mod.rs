mod inmemory;
mod sqlite;

pub use inmemory::InMemoryEventRepo;
use planner_domain::{CalendarEvent, Reminder, TimeSpan, ID};
pub use sqlite::SqliteEventRepo;

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    /// Stores the event together with its initial reminders. Either all of
    /// them are stored or none.
    async fn insert(&self, e: &CalendarEvent, reminders: &[Reminder]) -> anyhow::Result<()>;
    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>>;
    async fn find_many(&self, event_ids: &[ID]) -> anyhow::Result<Vec<CalendarEvent>>;
    /// Events that could have an occurrence inside `timespan`, ordered by
    /// start and then by id
    async fn find_by_timespan(&self, timespan: &TimeSpan) -> anyhow::Result<Vec<CalendarEvent>>;
    /// Case-insensitive substring match on title, description and location
    async fn search(&self, query: &str) -> anyhow::Result<Vec<CalendarEvent>>;
    /// Deletes the event and all of its reminders
    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>>;
}
