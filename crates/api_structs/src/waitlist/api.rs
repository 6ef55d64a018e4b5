use crate::booking::api::AppointmentResponse;
use crate::dtos::{TimeSlotDTO, WaitlistRequestDTO};
use serde::{Deserialize, Serialize};
use velora_booking_domain::{TimeBand, TimeSlot, WaitlistRequest, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistRequestResponse {
    pub request: WaitlistRequestDTO,
}

impl WaitlistRequestResponse {
    pub fn new(request: WaitlistRequest, now: i64) -> Self {
        Self {
            request: WaitlistRequestDTO::new(request, now),
        }
    }
}

pub mod join_waitlist {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: String,
        pub venue_id: ID,
        pub service_id: ID,
        pub preferred_date: String,
        pub preferred_band: TimeBand,
    }

    pub type APIResponse = WaitlistRequestResponse;
}

pub mod get_waitlist_openings {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub request_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub date: String,
        pub slots: Vec<TimeSlotDTO>,
    }

    impl APIResponse {
        pub fn new(date: String, slots: Vec<TimeSlot>) -> Self {
            Self {
                date,
                slots: slots.into_iter().map(TimeSlotDTO::new).collect(),
            }
        }
    }
}

pub mod book_from_waitlist {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub request_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub start_ts: i64,
        #[serde(default)]
        pub notes: Option<String>,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod cancel_waitlist_request {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub request_id: ID,
    }

    pub type APIResponse = WaitlistRequestResponse;
}

pub mod get_user_waitlist {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub requests: Vec<WaitlistRequestDTO>,
    }

    impl APIResponse {
        pub fn new(requests: Vec<WaitlistRequest>, now: i64) -> Self {
            Self {
                requests: requests
                    .into_iter()
                    .map(|r| WaitlistRequestDTO::new(r, now))
                    .collect(),
            }
        }
    }
}
