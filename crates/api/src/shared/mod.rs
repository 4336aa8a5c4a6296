pub mod occurrences;
pub mod usecase;

#[cfg(test)]
pub mod test_context {
    use chrono::{NaiveDateTime, TimeZone, Utc};
    use planner_infra::{PlannerContext, StaticTimeSys, Tz};
    use std::sync::Arc;

    /// In-memory context whose clock is pinned to Wednesday 2024-03-13 10:00 UTC
    pub fn setup() -> PlannerContext {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.config.timezone = Tz::UTC;
        ctx.sys = Arc::new(StaticTimeSys(
            Utc.with_ymd_and_hms(2024, 3, 13, 10, 0, 0).unwrap(),
        ));
        ctx
    }

    pub fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }
}
