mod base;
mod event;
mod export;
mod reminder;
mod schedule;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use event::CalendarEventClient;
pub use event::{CreateEventInput, GetEventInstancesInput, UpdateEventInput};
use export::ExportClient;
pub use planner_api_structs::dtos::*;
pub use planner_api_structs::ErrorResponse;
pub use planner_domain::{
    time_block::{ConflictPair, FreeSlot, OverloadedDay, ScheduleAnalysis},
    Frequency, Occurrence, RecurrenceEnd, RecurrenceRule, ReminderTrigger, ID,
};
use reminder::ReminderClient;
pub use schedule::GetTimeSlotsInput;
use schedule::ScheduleClient;
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use planner_api_structs::dtos::CalendarEventDTO as CalendarEvent;
pub use planner_api_structs::dtos::ReminderDTO as Reminder;

/// Planner Server SDK
///
/// The SDK contains methods for interacting with the Planner server
/// API.
#[derive(Clone)]
pub struct PlannerSDK {
    pub event: CalendarEventClient,
    pub export: ExportClient,
    pub reminder: ReminderClient,
    pub schedule: ScheduleClient,
    pub status: StatusClient,
}

impl PlannerSDK {
    pub fn new<T: Into<String>>(address: T) -> Self {
        let base = Arc::new(BaseClient::new(address.into()));
        let event = CalendarEventClient::new(base.clone());
        let export = ExportClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let schedule = ScheduleClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            event,
            export,
            reminder,
            schedule,
            status,
        }
    }
}
