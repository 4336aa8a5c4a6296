mod export_ical;

use actix_web::web;
use export_ical::export_ical_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/export/ical", web::get().to(export_ical_controller));
}
