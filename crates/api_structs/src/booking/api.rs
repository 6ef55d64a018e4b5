use crate::dtos::{AppointmentDTO, TimeSlotDTO};
use serde::{Deserialize, Serialize};
use velora_booking_domain::{Appointment, TimeSlot, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub appointment: AppointmentDTO,
}

impl AppointmentResponse {
    pub fn new(appointment: Appointment, now: i64) -> Self {
        Self {
            appointment: AppointmentDTO::new(appointment, now),
        }
    }
}

pub mod create_booking {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: String,
        pub venue_id: ID,
        pub service_id: ID,
        pub employee_id: ID,
        pub start_ts: i64,
        #[serde(default)]
        pub notes: Option<String>,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod cancel_booking {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub appointment_id: ID,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod reschedule_booking {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub appointment_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub start_ts: i64,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod get_upcoming_bookings {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub appointments: Vec<AppointmentDTO>,
    }

    impl APIResponse {
        pub fn new(appointments: Vec<Appointment>, now: i64) -> Self {
            Self {
                appointments: appointments
                    .into_iter()
                    .map(|a| AppointmentDTO::new(a, now))
                    .collect(),
            }
        }
    }
}

pub mod get_past_bookings {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: String,
    }

    pub type APIResponse = get_upcoming_bookings::APIResponse;
}

pub mod get_booking_slots {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub venue_id: ID,
        pub service_id: ID,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub date: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub date: String,
        pub slots: Vec<TimeSlotDTO>,
        /// Set when every slot of the requested date is unavailable and a
        /// later date within the horizon has an opening.
        pub next_available_date: Option<String>,
    }

    impl APIResponse {
        pub fn new(date: String, slots: Vec<TimeSlot>, next_available_date: Option<String>) -> Self {
            Self {
                date,
                slots: slots.into_iter().map(TimeSlotDTO::new).collect(),
                next_available_date,
            }
        }
    }
}

pub mod get_next_available_date {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub venue_id: ID,
        pub service_id: ID,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub from: String,
        #[serde(default)]
        pub employee_id: Option<ID>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub date: String,
    }
}
