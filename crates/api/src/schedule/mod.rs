mod analyze_schedule;
mod get_time_slots;

use actix_web::web;
use analyze_schedule::analyze_schedule_controller;
use get_time_slots::get_time_slots_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/schedule/slots", web::post().to(get_time_slots_controller));
    cfg.route(
        "/schedule/analysis",
        web::get().to(analyze_schedule_controller),
    );
}
