use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use planner_domain::{Reminder, ID};
use std::sync::Arc;

pub struct InMemoryReminderRepo {
    store: Arc<InMemoryStore>,
}

impl InMemoryReminderRepo {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        if find(&reminder.event_id, &self.store.events).is_none() {
            anyhow::bail!("Event with id {} does not exist", reminder.event_id);
        }
        insert(reminder, &self.store.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.store.reminders))
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.store.reminders, |reminder| {
            reminder.event_id == *event_id
        }))
    }

    async fn find_undelivered(&self) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.store.reminders, |reminder| !reminder.delivered))
    }

    async fn mark_delivered(&self, reminder_id: &ID) -> anyhow::Result<bool> {
        let updated = update_many(
            &self.store.reminders,
            |reminder| reminder.id == *reminder_id,
            |reminder| reminder.delivered = true,
        );
        Ok(updated > 0)
    }
}
