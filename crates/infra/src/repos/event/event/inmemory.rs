use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use planner_domain::{CalendarEvent, Reminder, TimeSpan, ID};
use std::sync::Arc;

pub struct InMemoryEventRepo {
    store: Arc<InMemoryStore>,
}

impl InMemoryEventRepo {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

fn sorted(mut events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    events.sort_by(|e1, e2| (e1.start, &e1.id).cmp(&(e2.start, &e2.id)));
    events
}

fn contains_ignore_case(field: Option<&str>, needle: &str) -> bool {
    field
        .map(|value| value.to_lowercase().contains(needle))
        .unwrap_or(false)
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &CalendarEvent, reminders: &[Reminder]) -> anyhow::Result<()> {
        if find(&e.id, &self.store.events).is_some() {
            anyhow::bail!("Event with id {} already exists", e.id);
        }
        insert(e, &self.store.events);
        lock(&self.store.reminders).extend(reminders.iter().cloned());
        Ok(())
    }

    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        if !save(e, &self.store.events) {
            anyhow::bail!("Event with id {} does not exist", e.id);
        }
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        Ok(find(event_id, &self.store.events))
    }

    async fn find_many(&self, event_ids: &[ID]) -> anyhow::Result<Vec<CalendarEvent>> {
        let res = find_by(&self.store.events, |event| event_ids.contains(&event.id));
        Ok(sorted(res))
    }

    async fn find_by_timespan(&self, timespan: &TimeSpan) -> anyhow::Result<Vec<CalendarEvent>> {
        let res = find_by(&self.store.events, |event| {
            event.start <= timespan.end()
                && event
                    .horizon()
                    .map(|horizon| horizon >= timespan.start())
                    .unwrap_or(true)
        });
        Ok(sorted(res))
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<CalendarEvent>> {
        let needle = query.to_lowercase();
        let res = find_by(&self.store.events, |event| {
            contains_ignore_case(Some(&event.title), &needle)
                || contains_ignore_case(event.description.as_deref(), &needle)
                || contains_ignore_case(event.location.as_deref(), &needle)
        });
        Ok(sorted(res))
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        let deleted = delete(event_id, &self.store.events);
        if deleted.is_some() {
            find_and_delete_by(&self.store.reminders, |reminder| {
                reminder.event_id == *event_id
            });
        }
        Ok(deleted)
    }
}
