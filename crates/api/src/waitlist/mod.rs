use actix_web::web;

pub mod book_from_waitlist;
pub mod cancel_waitlist_request;
pub mod get_user_waitlist;
pub mod get_waitlist_openings;
pub mod join_waitlist;
mod openings;
pub mod scan_openings;

use book_from_waitlist::book_from_waitlist_controller;
use cancel_waitlist_request::cancel_waitlist_request_controller;
use get_user_waitlist::get_user_waitlist_controller;
use get_waitlist_openings::get_waitlist_openings_controller;
use join_waitlist::join_waitlist_controller;
pub use scan_openings::{NotifyWaitlistOnSlotFreed, ScanWaitlistOpeningsUseCase};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/waitlist", web::post().to(join_waitlist_controller));
    cfg.route(
        "/waitlist/{request_id}",
        web::delete().to(cancel_waitlist_request_controller),
    );
    cfg.route(
        "/waitlist/{request_id}/openings",
        web::get().to(get_waitlist_openings_controller),
    );
    cfg.route(
        "/waitlist/{request_id}/booking",
        web::post().to(book_from_waitlist_controller),
    );
    cfg.route(
        "/users/{user_id}/waitlist",
        web::get().to(get_user_waitlist_controller),
    );
}
