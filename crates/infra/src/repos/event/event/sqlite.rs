use super::IEventRepo;
use crate::repos::shared::timestamps::{end_timestamp, from_timestamp, to_timestamp};
use crate::repos::event::reminder::insert_reminder;
use chrono::Duration;
use planner_domain::{CalendarEvent, Reminder, TimeSpan, ID};
use sqlx::{types::Uuid, FromRow, QueryBuilder, Sqlite, SqlitePool};

const EVENT_COLUMNS: &str =
    "event_uid, title, description, location, start_ts, duration, recurrence, created, updated";

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    title: String,
    description: Option<String>,
    location: Option<String>,
    start_ts: i64,
    duration: i64,
    recurrence: Option<String>,
    created: i64,
    updated: i64,
}

impl TryFrom<EventRaw> for CalendarEvent {
    type Error = anyhow::Error;

    fn try_from(raw: EventRaw) -> anyhow::Result<Self> {
        Ok(CalendarEvent {
            id: raw.event_uid.into(),
            title: raw.title,
            description: raw.description,
            location: raw.location,
            start: from_timestamp(raw.start_ts)?,
            duration: Duration::try_seconds(raw.duration)
                .ok_or_else(|| anyhow::anyhow!("Stored duration {} is out of range", raw.duration))?,
            recurrence: raw
                .recurrence
                .map(|recurrence| serde_json::from_str(&recurrence))
                .transpose()?,
            created: from_timestamp(raw.created)?,
            updated: from_timestamp(raw.updated)?,
        })
    }
}

fn into_events(rows: Vec<EventRaw>) -> anyhow::Result<Vec<CalendarEvent>> {
    rows.into_iter().map(CalendarEvent::try_from).collect()
}

fn recurrence_json(e: &CalendarEvent) -> anyhow::Result<Option<String>> {
    Ok(e.recurrence
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?)
}

/// Separates the fields of `search_text` so a match cannot span two of them
const SEARCH_FIELD_SEPARATOR: char = '\u{1f}';

/// Title, description and location lowercased here rather than with SQLite's
/// ASCII-only `lower()`
fn search_text(e: &CalendarEvent) -> String {
    [
        Some(e.title.as_str()),
        e.description.as_deref(),
        e.location.as_deref(),
    ]
    .iter()
    .flatten()
    .map(|field| field.to_lowercase())
    .collect::<Vec<_>>()
    .join(&SEARCH_FIELD_SEPARATOR.to_string())
}

#[async_trait::async_trait]
impl IEventRepo for SqliteEventRepo {
    async fn insert(&self, e: &CalendarEvent, reminders: &[Reminder]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO events(
                event_uid,
                title,
                description,
                location,
                start_ts,
                duration,
                end_ts,
                recurrence,
                search_text,
                created,
                updated
            )
            VALUES(?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(*e.id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(&e.location)
        .bind(to_timestamp(&e.start))
        .bind(e.duration.num_seconds())
        .bind(end_timestamp(e))
        .bind(recurrence_json(e)?)
        .bind(search_text(e))
        .bind(to_timestamp(&e.created))
        .bind(to_timestamp(&e.updated))
        .execute(&mut *tx)
        .await?;

        for reminder in reminders {
            insert_reminder(&mut *tx, reminder).await?;
        }
        tx.commit().await?;

        Ok(())
    }

    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE events SET
                title = ?,
                description = ?,
                location = ?,
                start_ts = ?,
                duration = ?,
                end_ts = ?,
                recurrence = ?,
                search_text = ?,
                updated = ?
            WHERE event_uid = ?
            "#,
        )
        .bind(&e.title)
        .bind(&e.description)
        .bind(&e.location)
        .bind(to_timestamp(&e.start))
        .bind(e.duration.num_seconds())
        .bind(end_timestamp(e))
        .bind(recurrence_json(e)?)
        .bind(search_text(e))
        .bind(to_timestamp(&e.updated))
        .bind(*e.id.inner_ref())
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            anyhow::bail!("Event with id {} does not exist", e.id);
        }
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        let row: Option<EventRaw> = sqlx::query_as(&format!(
            "SELECT {} FROM events WHERE event_uid = ?",
            EVENT_COLUMNS
        ))
        .bind(*event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CalendarEvent::try_from).transpose()
    }

    async fn find_many(&self, event_ids: &[ID]) -> anyhow::Result<Vec<CalendarEvent>> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM events WHERE event_uid IN (",
            EVENT_COLUMNS
        ));
        let mut separated = query.separated(", ");
        for event_id in event_ids {
            separated.push_bind(*event_id.inner_ref());
        }
        separated.push_unseparated(") ORDER BY start_ts, event_uid");

        let rows = query
            .build_query_as::<EventRaw>()
            .fetch_all(&self.pool)
            .await?;
        into_events(rows)
    }

    async fn find_by_timespan(&self, timespan: &TimeSpan) -> anyhow::Result<Vec<CalendarEvent>> {
        let rows: Vec<EventRaw> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM events
            WHERE start_ts <= ? AND end_ts >= ?
            ORDER BY start_ts, event_uid
            "#,
            EVENT_COLUMNS
        ))
        .bind(to_timestamp(&timespan.end()))
        .bind(to_timestamp(&timespan.start()))
        .fetch_all(&self.pool)
        .await?;

        into_events(rows)
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<CalendarEvent>> {
        let needle = query.to_lowercase();
        if needle.contains(SEARCH_FIELD_SEPARATOR) {
            return Ok(Vec::new());
        }
        let rows: Vec<EventRaw> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM events
            WHERE instr(search_text, ?) > 0
            ORDER BY start_ts, event_uid
            "#,
            EVENT_COLUMNS
        ))
        .bind(needle)
        .fetch_all(&self.pool)
        .await?;

        into_events(rows)
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        let mut tx = self.pool.begin().await?;
        let row: Option<EventRaw> = sqlx::query_as(&format!(
            "SELECT {} FROM events WHERE event_uid = ?",
            EVENT_COLUMNS
        ))
        .bind(*event_id.inner_ref())
        .fetch_optional(&mut *tx)
        .await?;

        if row.is_some() {
            // Reminders go with the event through ON DELETE CASCADE
            sqlx::query("DELETE FROM events WHERE event_uid = ?")
                .bind(*event_id.inner_ref())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        row.map(CalendarEvent::try_from).transpose()
    }
}
