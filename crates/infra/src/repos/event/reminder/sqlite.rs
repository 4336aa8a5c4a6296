use super::IReminderRepo;
use crate::repos::shared::timestamps::{from_timestamp, to_timestamp};
use planner_domain::{Reminder, ReminderTrigger, ID};
use sqlx::{types::Uuid, FromRow, SqliteConnection, SqlitePool};

const REMINDER_COLUMNS: &str = "reminder_uid, event_uid, minutes_before, remind_at, delivered";

pub struct SqliteReminderRepo {
    pool: SqlitePool,
}

impl SqliteReminderRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    event_uid: Uuid,
    minutes_before: Option<i64>,
    remind_at: Option<i64>,
    delivered: bool,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> anyhow::Result<Self> {
        let trigger = match (raw.minutes_before, raw.remind_at) {
            (Some(minutes), None) => ReminderTrigger::MinutesBefore(minutes),
            (None, Some(remind_at)) => ReminderTrigger::At(from_timestamp(remind_at)?),
            _ => anyhow::bail!("Reminder {} has an invalid trigger", raw.reminder_uid),
        };
        Ok(Reminder {
            id: raw.reminder_uid.into(),
            event_id: raw.event_uid.into(),
            trigger,
            delivered: raw.delivered,
        })
    }
}

fn into_reminders(rows: Vec<ReminderRaw>) -> anyhow::Result<Vec<Reminder>> {
    rows.into_iter().map(Reminder::try_from).collect()
}

/// Shared with the event repository so that an event and its first
/// reminders are written in one transaction
pub(crate) async fn insert_reminder(
    conn: &mut SqliteConnection,
    reminder: &Reminder,
) -> anyhow::Result<()> {
    let (minutes_before, remind_at) = match reminder.trigger {
        ReminderTrigger::MinutesBefore(minutes) => (Some(minutes), None),
        ReminderTrigger::At(at) => (None, Some(to_timestamp(&at))),
    };
    sqlx::query(
        r#"
        INSERT INTO reminders(reminder_uid, event_uid, minutes_before, remind_at, delivered)
        VALUES(?, ?, ?, ?, ?)
        "#,
    )
    .bind(*reminder.id.inner_ref())
    .bind(*reminder.event_id.inner_ref())
    .bind(minutes_before)
    .bind(remind_at)
    .bind(reminder.delivered)
    .execute(conn)
    .await?;
    Ok(())
}

#[async_trait::async_trait]
impl IReminderRepo for SqliteReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let mut conn = self.pool.acquire().await?;
        insert_reminder(&mut *conn, reminder).await
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let row: Option<ReminderRaw> = sqlx::query_as(&format!(
            "SELECT {} FROM reminders WHERE reminder_uid = ?",
            REMINDER_COLUMNS
        ))
        .bind(*reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Reminder::try_from).transpose()
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let rows: Vec<ReminderRaw> = sqlx::query_as(&format!(
            "SELECT {} FROM reminders WHERE event_uid = ? ORDER BY rowid",
            REMINDER_COLUMNS
        ))
        .bind(*event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        into_reminders(rows)
    }

    async fn find_undelivered(&self) -> anyhow::Result<Vec<Reminder>> {
        let rows: Vec<ReminderRaw> = sqlx::query_as(&format!(
            "SELECT {} FROM reminders WHERE NOT delivered ORDER BY rowid",
            REMINDER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        into_reminders(rows)
    }

    async fn mark_delivered(&self, reminder_id: &ID) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE reminders SET delivered = TRUE WHERE reminder_uid = ?")
            .bind(*reminder_id.inner_ref())
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }
}
