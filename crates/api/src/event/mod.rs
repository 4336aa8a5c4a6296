mod create_event;
mod delete_event;
mod get_event;
mod get_event_conflicts;
mod get_event_instances;
mod get_events;
mod get_instances;
mod parse_event;
mod quick_create_event;
mod reschedule_event;
mod search_events;
mod update_event;

use actix_web::web;
use create_event::create_event_controller;
use delete_event::delete_event_controller;
use get_event::get_event_controller;
use get_event_conflicts::get_event_conflicts_controller;
use get_event_instances::get_event_instances_controller;
use get_events::get_events_controller;
use get_instances::get_instances_controller;
use parse_event::parse_event_controller;
use quick_create_event::quick_create_event_controller;
use reschedule_event::reschedule_event_controller;
use search_events::search_events_controller;
use update_event::update_event_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::post().to(create_event_controller));
    cfg.route("/events", web::get().to(get_events_controller));

    // Registered before `/events/{event_id}` so they are not taken as ids
    cfg.route("/events/search", web::get().to(search_events_controller));
    cfg.route("/events/instances", web::get().to(get_instances_controller));
    cfg.route("/events/parse", web::post().to(parse_event_controller));
    cfg.route("/events/quick", web::post().to(quick_create_event_controller));

    cfg.route("/events/{event_id}", web::get().to(get_event_controller));
    cfg.route("/events/{event_id}", web::put().to(update_event_controller));
    cfg.route(
        "/events/{event_id}",
        web::delete().to(delete_event_controller),
    );
    cfg.route(
        "/events/{event_id}/reschedule",
        web::put().to(reschedule_event_controller),
    );
    cfg.route(
        "/events/{event_id}/instances",
        web::get().to(get_event_instances_controller),
    );
    cfg.route(
        "/events/{event_id}/conflicts",
        web::get().to(get_event_conflicts_controller),
    );
}
