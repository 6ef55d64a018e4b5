use actix_web::web;

pub mod create_venue;
pub mod get_venue;

use create_venue::create_venue_controller;
use get_venue::get_venue_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/venues", web::post().to(create_venue_controller));
    cfg.route("/venues/{venue_id}", web::get().to(get_venue_controller));
}
