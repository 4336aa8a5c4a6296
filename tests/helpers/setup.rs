use chrono::{NaiveDateTime, TimeZone, Utc};
use planner_api::Application;
use planner_infra::{PlannerContext, StaticTimeSys, Tz};
use planner_sdk::PlannerSDK;
use std::sync::Arc;

pub struct TestApp {
    pub ctx: PlannerContext,
}

/// Wednesday 2024-03-13 10:00, the clock every spawned app runs on
pub fn now() -> NaiveDateTime {
    dt("2024-03-13T10:00")
}

pub fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").expect("Valid datetime")
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, PlannerSDK, String) {
    let mut ctx = PlannerContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.timezone = Tz::UTC;
    ctx.sys = Arc::new(StaticTimeSys(Utc.from_utc_datetime(&now())));

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { ctx };
    let sdk = PlannerSDK::new(address.clone());
    (app, sdk, address)
}
