mod event;
mod reminder;

pub use event::IEventRepo;
pub use event::InMemoryEventRepo;
pub use event::SqliteEventRepo;

pub use reminder::IReminderRepo;
pub use reminder::InMemoryReminderRepo;
pub use reminder::SqliteReminderRepo;
