mod create_reminder;
mod get_event_reminders;
mod get_pending_reminders;
mod mark_reminder_delivered;

use actix_web::web;
use create_reminder::create_reminder_controller;
use get_event_reminders::get_event_reminders_controller;
use get_pending_reminders::get_pending_reminders_controller;
use mark_reminder_delivered::mark_reminder_delivered_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/events/{event_id}/reminders",
        web::post().to(create_reminder_controller),
    );
    cfg.route(
        "/events/{event_id}/reminders",
        web::get().to(get_event_reminders_controller),
    );
    cfg.route(
        "/reminders/pending",
        web::get().to(get_pending_reminders_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/delivered",
        web::put().to(mark_reminder_delivered_controller),
    );
}
