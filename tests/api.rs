mod helpers;

use chrono::{TimeZone, Utc};
use helpers::setup::spawn_app;
use velora_booking_sdk::{
    AppointmentStatus, BookFromWaitlistInput, CreateBookingInput, CreateVenueInput, EmployeeBody,
    GetBookingSlotsInput, GetNextAvailableDateInput, JoinWaitlistInput, OpeningHoursRule,
    RescheduleBookingInput, ServiceBody, SessionState, Time, TimeBand, Venue, VeloraSDK,
    WaitlistStatus, Weekday,
};

// 2030-05-06 is a Monday
fn monday_at(hour: u32) -> i64 {
    Utc.with_ymd_and_hms(2030, 5, 6, hour, 0, 0)
        .unwrap()
        .timestamp_millis()
}

async fn create_salon(sdk: &VeloraSDK) -> Venue {
    let res = sdk
        .venue
        .create(CreateVenueInput {
            name: "Hair by Holm".into(),
            timezone: "UTC".into(),
            opening_hours: vec![
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
            .collect(),
            services: vec![
                ServiceBody {
                    name: "Haircut".into(),
                    duration_minutes: 60,
                    price: 450.0,
                },
                ServiceBody {
                    name: "Coloring".into(),
                    duration_minutes: 120,
                    price: 1200.0,
                },
            ],
            employees: vec![
                EmployeeBody {
                    name: "Maja".into(),
                    services: vec!["Haircut".into(), "Coloring".into()],
                },
                EmployeeBody {
                    name: "Jonas".into(),
                    services: vec!["Haircut".into()],
                },
            ],
        })
        .await
        .expect("Expected to create venue");
    res.venue
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_crud_venue() {
    let (_, sdk, _) = spawn_app().await;
    let venue = create_salon(&sdk).await;
    assert_eq!(venue.services.len(), 2);
    assert_eq!(venue.employees.len(), 2);
    assert_eq!(venue.opening_hours.rules.len(), 6);

    let res = sdk
        .venue
        .get(venue.id.clone())
        .await
        .expect("Expected to get venue");
    assert_eq!(res.venue.id, venue.id);
    assert_eq!(res.venue.timezone, "UTC");

    // bogus timezone is rejected
    let res = sdk
        .venue
        .create(CreateVenueInput {
            name: "Nowhere".into(),
            timezone: "Europe/Atlantis".into(),
            opening_hours: Vec::new(),
            services: Vec::new(),
            employees: Vec::new(),
        })
        .await;
    assert!(res.is_err());
}

#[actix_web::main]
#[test]
async fn test_slots_respect_opening_hours_and_bookings() {
    let (_, sdk, _) = spawn_app().await;
    let venue = create_salon(&sdk).await;
    let haircut = venue.services[0].clone();
    let maja = venue.employees[0].clone();
    let jonas = venue.employees[1].clone();

    // 2030-05-05 is a Sunday and the venue is closed
    let res = sdk
        .booking
        .get_slots(GetBookingSlotsInput {
            venue_id: venue.id.clone(),
            service_id: haircut.id.clone(),
            date: "2030-5-5".into(),
        })
        .await
        .expect("Expected to get slots");
    assert!(res.slots.is_empty());
    assert_eq!(res.next_available_date, Some("2030-5-6".into()));

    // monday has the full 9:00-18:00 grid
    let res = sdk
        .booking
        .get_slots(GetBookingSlotsInput {
            venue_id: venue.id.clone(),
            service_id: haircut.id.clone(),
            date: "2030-5-6".into(),
        })
        .await
        .expect("Expected to get slots");
    assert_eq!(res.slots.len(), 9);
    assert!(res.slots.iter().all(|s| s.available));
    assert_eq!(res.slots[0].start_ts, monday_at(9));
    assert!(res.next_available_date.is_none());

    // with one of two employees booked at 10:00 the slot stays available
    sdk.booking
        .create(CreateBookingInput {
            user_id: "user-1".into(),
            venue_id: venue.id.clone(),
            service_id: haircut.id.clone(),
            employee_id: maja.id.clone(),
            start_ts: monday_at(10),
            notes: None,
        })
        .await
        .expect("Expected to book");
    let res = sdk
        .booking
        .get_slots(GetBookingSlotsInput {
            venue_id: venue.id.clone(),
            service_id: haircut.id.clone(),
            date: "2030-5-6".into(),
        })
        .await
        .expect("Expected to get slots");
    let ten = res
        .slots
        .iter()
        .find(|s| s.start_ts == monday_at(10))
        .unwrap();
    assert!(ten.available);
    assert_eq!(ten.employee_ids, vec![jonas.id.clone()]);

    // with both booked it flips to unavailable
    sdk.booking
        .create(CreateBookingInput {
            user_id: "user-2".into(),
            venue_id: venue.id.clone(),
            service_id: haircut.id.clone(),
            employee_id: jonas.id.clone(),
            start_ts: monday_at(10),
            notes: None,
        })
        .await
        .expect("Expected to book");
    let res = sdk
        .booking
        .get_slots(GetBookingSlotsInput {
            venue_id: venue.id.clone(),
            service_id: haircut.id.clone(),
            date: "2030-5-6".into(),
        })
        .await
        .expect("Expected to get slots");
    let ten = res
        .slots
        .iter()
        .find(|s| s.start_ts == monday_at(10))
        .unwrap();
    assert!(!ten.available);

    // a taken slot cannot be booked again
    let res = sdk
        .booking
        .create(CreateBookingInput {
            user_id: "user-3".into(),
            venue_id: venue.id.clone(),
            service_id: haircut.id.clone(),
            employee_id: maja.id.clone(),
            start_ts: monday_at(10),
            notes: None,
        })
        .await;
    assert!(res.is_err());
}

#[actix_web::main]
#[test]
async fn test_concurrent_bookings_have_one_winner() {
    let (_, sdk, _) = spawn_app().await;
    let venue = create_salon(&sdk).await;
    let haircut = venue.services[0].clone();
    let maja = venue.employees[0].clone();

    let book = |user: &str| {
        sdk.booking.create(CreateBookingInput {
            user_id: user.into(),
            venue_id: venue.id.clone(),
            service_id: haircut.id.clone(),
            employee_id: maja.id.clone(),
            start_ts: monday_at(10),
            notes: None,
        })
    };
    let (res1, res2) = futures::future::join(book("user-1"), book("user-2")).await;

    // exactly one of the two racing requests gets the slot
    assert!(res1.is_ok() != res2.is_ok());

    let res = sdk
        .booking
        .get_slots(GetBookingSlotsInput {
            venue_id: venue.id.clone(),
            service_id: haircut.id.clone(),
            date: "2030-5-6".into(),
        })
        .await
        .expect("Expected to get slots");
    let ten = res
        .slots
        .iter()
        .find(|s| s.start_ts == monday_at(10))
        .unwrap();
    assert_eq!(ten.employee_ids, vec![venue.employees[1].id.clone()]);
}

#[actix_web::main]
#[test]
async fn test_next_available_date_scan() {
    let (_, sdk, _) = spawn_app().await;
    let venue = create_salon(&sdk).await;
    let coloring = venue.services[1].clone();
    let maja = venue.employees[0].clone();

    // coloring is a two hour service done only by Maja: 9, 11, 13, 15
    for hour in [9, 11, 13, 15] {
        sdk.booking
            .create(CreateBookingInput {
                user_id: "early-bird".into(),
                venue_id: venue.id.clone(),
                service_id: coloring.id.clone(),
                employee_id: maja.id.clone(),
                start_ts: monday_at(hour),
                notes: None,
            })
            .await
            .expect("Expected to book");
    }

    let res = sdk
        .booking
        .get_next_available_date(GetNextAvailableDateInput {
            venue_id: venue.id.clone(),
            service_id: coloring.id.clone(),
            from: "2030-5-6".into(),
            employee_id: None,
        })
        .await
        .expect("Expected a next available date");
    assert_eq!(res.date, "2030-5-7");

    // the full day also advertises the jump-to date on its slot grid
    let res = sdk
        .booking
        .get_slots(GetBookingSlotsInput {
            venue_id: venue.id.clone(),
            service_id: coloring.id.clone(),
            date: "2030-5-6".into(),
        })
        .await
        .expect("Expected to get slots");
    assert!(res.slots.iter().all(|s| !s.available));
    assert_eq!(res.next_available_date, Some("2030-5-7".into()));
}

#[actix_web::main]
#[test]
async fn test_cancel_and_reschedule_lifecycle() {
    let (_, sdk, _) = spawn_app().await;
    let venue = create_salon(&sdk).await;
    let haircut = venue.services[0].clone();
    let maja = venue.employees[0].clone();

    let res = sdk
        .booking
        .create(CreateBookingInput {
            user_id: "user-1".into(),
            venue_id: venue.id.clone(),
            service_id: haircut.id.clone(),
            employee_id: maja.id.clone(),
            start_ts: monday_at(11),
            notes: Some("First visit".into()),
        })
        .await
        .expect("Expected to book");
    let appointment = res.appointment;
    assert_eq!(appointment.status, AppointmentStatus::Upcoming);
    assert_eq!(appointment.venue_name, "Hair by Holm");
    assert_eq!(appointment.price, 450.0);

    // move it two hours later, the old slot opens again
    let res = sdk
        .booking
        .reschedule(RescheduleBookingInput {
            appointment_id: appointment.id.clone(),
            start_ts: monday_at(13),
        })
        .await
        .expect("Expected to reschedule");
    assert_eq!(res.appointment.scheduled_at, monday_at(13));
    let res = sdk
        .booking
        .get_slots(GetBookingSlotsInput {
            venue_id: venue.id.clone(),
            service_id: haircut.id.clone(),
            date: "2030-5-6".into(),
        })
        .await
        .expect("Expected to get slots");
    let eleven = res
        .slots
        .iter()
        .find(|s| s.start_ts == monday_at(11))
        .unwrap();
    assert!(eleven.available);

    // cancelling is idempotent
    let res = sdk
        .booking
        .cancel(appointment.id.clone())
        .await
        .expect("Expected to cancel");
    assert_eq!(res.appointment.status, AppointmentStatus::Cancelled);
    let res = sdk
        .booking
        .cancel(appointment.id.clone())
        .await
        .expect("Expected cancel to be idempotent");
    assert_eq!(res.appointment.status, AppointmentStatus::Cancelled);

    // a cancelled appointment cannot be moved
    let res = sdk
        .booking
        .reschedule(RescheduleBookingInput {
            appointment_id: appointment.id.clone(),
            start_ts: monday_at(15),
        })
        .await;
    assert!(res.is_err());
}

#[actix_web::main]
#[test]
async fn test_user_booking_views() {
    let (_, sdk, _) = spawn_app().await;
    let venue = create_salon(&sdk).await;
    let haircut = venue.services[0].clone();
    let maja = venue.employees[0].clone();

    let book = |hour: u32| {
        sdk.booking.create(CreateBookingInput {
            user_id: "user-1".into(),
            venue_id: venue.id.clone(),
            service_id: haircut.id.clone(),
            employee_id: maja.id.clone(),
            start_ts: monday_at(hour),
            notes: None,
        })
    };
    let kept = book(9).await.expect("Expected to book").appointment;
    let cancelled = book(11).await.expect("Expected to book").appointment;
    sdk.booking
        .cancel(cancelled.id.clone())
        .await
        .expect("Expected to cancel");

    let res = sdk
        .booking
        .get_upcoming("user-1".into())
        .await
        .expect("Expected upcoming bookings");
    assert_eq!(res.appointments.len(), 1);
    assert_eq!(res.appointments[0].id, kept.id);

    let res = sdk
        .booking
        .get_past("user-1".into())
        .await
        .expect("Expected past bookings");
    assert_eq!(res.appointments.len(), 1);
    assert_eq!(res.appointments[0].id, cancelled.id);
    assert_eq!(res.appointments[0].status, AppointmentStatus::Cancelled);

    let res = sdk
        .booking
        .get_upcoming("stranger".into())
        .await
        .expect("Expected upcoming bookings");
    assert!(res.appointments.is_empty());
}

#[actix_web::main]
#[test]
async fn test_waitlist_fulfillment_flow() {
    let (_, sdk, _) = spawn_app().await;
    let venue = create_salon(&sdk).await;
    let coloring = venue.services[1].clone();
    let maja = venue.employees[0].clone();

    // fill every coloring slot of the monday
    let mut appointments = Vec::new();
    for hour in [9, 11, 13, 15] {
        let res = sdk
            .booking
            .create(CreateBookingInput {
                user_id: "early-bird".into(),
                venue_id: venue.id.clone(),
                service_id: coloring.id.clone(),
                employee_id: maja.id.clone(),
                start_ts: monday_at(hour),
                notes: None,
            })
            .await
            .expect("Expected to book");
        appointments.push(res.appointment);
    }

    let res = sdk
        .waitlist
        .join(JoinWaitlistInput {
            user_id: "user-1".into(),
            venue_id: venue.id.clone(),
            service_id: coloring.id.clone(),
            preferred_date: "2030-5-6".into(),
            preferred_band: TimeBand::Afternoon,
        })
        .await
        .expect("Expected to join waitlist");
    let request = res.request;
    assert_eq!(request.status, WaitlistStatus::Pending);

    // nothing open yet
    let res = sdk
        .waitlist
        .get_openings(request.id.clone())
        .await
        .expect("Expected openings");
    assert!(res.slots.is_empty());

    // the 13:00 booking is cancelled, which falls inside the afternoon band
    let freed = appointments
        .iter()
        .find(|a| a.scheduled_at == monday_at(13))
        .unwrap();
    sdk.booking
        .cancel(freed.id.clone())
        .await
        .expect("Expected to cancel");

    let res = sdk
        .waitlist
        .get_openings(request.id.clone())
        .await
        .expect("Expected openings");
    assert_eq!(res.slots.len(), 1);
    assert_eq!(res.slots[0].start_ts, monday_at(13));

    // fulfilling books it like any other appointment
    let res = sdk
        .waitlist
        .book(BookFromWaitlistInput {
            request_id: request.id.clone(),
            start_ts: monday_at(13),
            notes: None,
        })
        .await
        .expect("Expected to book from waitlist");
    assert_eq!(res.appointment.user_id, "user-1");
    assert_eq!(res.appointment.scheduled_at, monday_at(13));
    assert_eq!(res.appointment.status, AppointmentStatus::Upcoming);

    let res = sdk
        .waitlist
        .get_for_user("user-1".into())
        .await
        .expect("Expected waitlist requests");
    assert_eq!(res.requests.len(), 1);
    assert_eq!(res.requests[0].status, WaitlistStatus::Fulfilled);

    // the request is consumed
    let res = sdk
        .waitlist
        .book(BookFromWaitlistInput {
            request_id: request.id.clone(),
            start_ts: monday_at(13),
            notes: None,
        })
        .await;
    assert!(res.is_err());
}

#[actix_web::main]
#[test]
async fn test_cancel_waitlist_request() {
    let (_, sdk, _) = spawn_app().await;
    let venue = create_salon(&sdk).await;

    let res = sdk
        .waitlist
        .join(JoinWaitlistInput {
            user_id: "user-1".into(),
            venue_id: venue.id.clone(),
            service_id: venue.services[0].id.clone(),
            preferred_date: "2030-5-6".into(),
            preferred_band: TimeBand::Any,
        })
        .await
        .expect("Expected to join waitlist");

    let res = sdk
        .waitlist
        .cancel(res.request.id.clone())
        .await
        .expect("Expected to cancel waitlist request");
    assert_eq!(res.request.status, WaitlistStatus::Cancelled);

    // cancelled requests never report openings
    let openings = sdk.waitlist.get_openings(res.request.id.clone()).await;
    assert!(openings.is_err());
}

#[actix_web::main]
#[test]
async fn test_booking_session_flow() {
    let (_, sdk, _) = spawn_app().await;
    let venue = create_salon(&sdk).await;
    let coloring = venue.services[1].clone();
    let maja = venue.employees[0].clone();

    // fill the monday colorings so the session hits the waitlist branch
    let mut appointments = Vec::new();
    for hour in [9, 11, 13, 15] {
        let res = sdk
            .booking
            .create(CreateBookingInput {
                user_id: "early-bird".into(),
                venue_id: venue.id.clone(),
                service_id: coloring.id.clone(),
                employee_id: maja.id.clone(),
                start_ts: monday_at(hour),
                notes: None,
            })
            .await
            .expect("Expected to book");
        appointments.push(res.appointment);
    }

    let mut session =
        sdk.booking_session("user-1".into(), venue.id.clone(), coloring.id.clone());
    assert!(matches!(session.state(), SessionState::SelectingDate));

    let state = session
        .select_date("2030-5-6")
        .await
        .expect("Expected to select date");
    assert!(matches!(state, SessionState::FullyBooked { .. }));

    session
        .join_waitlist(TimeBand::Any)
        .await
        .expect("Expected to join waitlist");

    // an opening appears and the session completes through it
    let freed = &appointments[1];
    sdk.booking
        .cancel(freed.id.clone())
        .await
        .expect("Expected to cancel");
    let state = session
        .book_opening(freed.scheduled_at)
        .await
        .expect("Expected to book opening");
    match state {
        SessionState::Booked { appointment } => {
            assert_eq!(appointment.user_id, "user-1");
            assert_eq!(appointment.scheduled_at, freed.scheduled_at);
        }
        other => panic!("Expected booked session, got: {:?}", other),
    }
}
