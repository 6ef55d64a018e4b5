use actix_web::web;

mod availability;
pub mod cancel_booking;
pub mod create_booking;
pub mod get_booking_slots;
pub mod get_next_available_date;
pub mod get_user_bookings;
pub mod reschedule_booking;

pub use availability::{compute_day_slots, find_bookable_resource, AvailabilityError};
use cancel_booking::cancel_booking_controller;
use create_booking::create_booking_controller;
use get_booking_slots::get_booking_slots_controller;
use get_next_available_date::get_next_available_date_controller;
use get_user_bookings::{get_past_bookings_controller, get_upcoming_bookings_controller};
use reschedule_booking::reschedule_booking_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Availability
    cfg.route(
        "/venues/{venue_id}/services/{service_id}/slots",
        web::get().to(get_booking_slots_controller),
    );
    cfg.route(
        "/venues/{venue_id}/services/{service_id}/slots/next-available",
        web::get().to(get_next_available_date_controller),
    );

    // Booking lifecycle
    cfg.route("/booking", web::post().to(create_booking_controller));
    cfg.route(
        "/booking/{appointment_id}",
        web::delete().to(cancel_booking_controller),
    );
    cfg.route(
        "/booking/{appointment_id}/reschedule",
        web::post().to(reschedule_booking_controller),
    );

    // User views
    cfg.route(
        "/users/{user_id}/booking/upcoming",
        web::get().to(get_upcoming_bookings_controller),
    );
    cfg.route(
        "/users/{user_id}/booking/past",
        web::get().to(get_past_bookings_controller),
    );
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use chrono::Weekday;
    use velora_booking_domain::{
        Appointment, AppointmentStatus, Day, Employee, OpeningHoursRule, Time, Venue, VenueService,
    };
    use velora_booking_infra::{ISys, VeloraContext};

    pub const HOUR: i64 = 1000 * 60 * 60;

    pub struct DummySys {
        pub now: i64,
    }

    impl ISys for DummySys {
        fn get_timestamp_millis(&self) -> i64 {
            self.now
        }
    }

    /// A UTC salon open Mon-Sat 9:00-18:00 with a 60 min haircut and a
    /// 120 min coloring. Maja does both, Jonas only cuts.
    pub async fn salon_venue(ctx: &VeloraContext) -> Venue {
        let mut venue = Venue::new("Hair by Holm", &chrono_tz::UTC);
        venue.opening_hours.rules = vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ]
        .into_iter()
        .map(|weekday| OpeningHoursRule {
            weekday,
            open: Time::new(9, 0),
            close: Time::new(18, 0),
        })
        .collect();

        let haircut = VenueService {
            id: Default::default(),
            name: "Haircut".into(),
            duration_minutes: 60,
            price: 450.0,
        };
        let coloring = VenueService {
            id: Default::default(),
            name: "Coloring".into(),
            duration_minutes: 120,
            price: 1200.0,
        };
        venue.employees = vec![
            Employee {
                id: Default::default(),
                name: "Maja".into(),
                service_ids: vec![haircut.id.clone(), coloring.id.clone()],
            },
            Employee {
                id: Default::default(),
                name: "Jonas".into(),
                service_ids: vec![haircut.id.clone()],
            },
        ];
        venue.services = vec![haircut, coloring];

        ctx.repos.venues.insert(&venue).await.unwrap();
        venue
    }

    /// Start of slot number `index` on Monday 2030-05-06, on the one hour
    /// grid of the salon's haircut service.
    pub fn slot_on_monday(venue: &Venue, index: i64) -> i64 {
        let monday = "2030-5-6".parse::<Day>().unwrap();
        venue.open_window(&monday).unwrap().start() + index * HOUR
    }

    pub fn booked_appointment(
        venue: &Venue,
        service: &VenueService,
        employee: &Employee,
        start_ts: i64,
    ) -> Appointment {
        Appointment {
            id: Default::default(),
            user_id: "user-1".into(),
            venue_id: venue.id.clone(),
            venue_name: venue.name.clone(),
            service_name: service.name.clone(),
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            scheduled_at: start_ts,
            duration_minutes: service.duration_minutes,
            price: service.price,
            notes: None,
            status: AppointmentStatus::Upcoming,
            created: 0,
            updated: 0,
        }
    }
}
