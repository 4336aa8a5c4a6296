use chrono::NaiveDateTime;
use planner_domain::{time_block::find_conflicts, CalendarEvent, Occurrence, TimeSpan, ID};
use planner_infra::PlannerContext;

/// Occurrences of every stored event inside `timespan` ordered by start.
/// The event with id `exclude` is left out.
pub async fn occurrences_in(
    ctx: &PlannerContext,
    timespan: &TimeSpan,
    exclude: Option<&ID>,
) -> anyhow::Result<Vec<Occurrence>> {
    let events = ctx.repos.events.find_by_timespan(timespan).await?;
    let mut occurrences = events
        .iter()
        .filter(|e| Some(&e.id) != exclude)
        .flat_map(|e| e.expand(timespan))
        .collect::<Vec<_>>();
    occurrences.sort_by(|a, b| (a.start, &a.event_id).cmp(&(b.start, &b.event_id)));
    Ok(occurrences)
}

/// Stored occurrences overlapping the occurrences of `event`. The stored
/// version of `event` itself never counts.
pub async fn event_conflicts(
    ctx: &PlannerContext,
    event: &CalendarEvent,
) -> anyhow::Result<Vec<Occurrence>> {
    let window = event.conflict_window(ctx.config.conflict_lookahead);
    let candidates = event.expand(&window).collect::<Vec<_>>();
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    let existing = occurrences_in(ctx, &window, Some(&event.id)).await?;
    Ok(find_conflicts(&candidates, &existing))
}

#[derive(Debug, PartialEq)]
pub enum TimeSpanError {
    Invalid,
    TooLong,
}

/// Validates a client supplied range against a query limit
pub fn query_timespan(
    start: NaiveDateTime,
    end: NaiveDateTime,
    limit: chrono::Duration,
) -> Result<TimeSpan, TimeSpanError> {
    let timespan = TimeSpan::create(start, end).map_err(|_| TimeSpanError::Invalid)?;
    if timespan.greater_than(limit) {
        return Err(TimeSpanError::TooLong);
    }
    Ok(timespan)
}
