use crate::dtos::VenueDTO;
use serde::{Deserialize, Serialize};
use velora_booking_domain::{OpeningHoursRule, Venue, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponse {
    pub venue: VenueDTO,
}

impl VenueResponse {
    pub fn new(venue: Venue) -> Self {
        Self {
            venue: VenueDTO::new(venue),
        }
    }
}

pub mod create_venue {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ServiceBody {
        pub name: String,
        pub duration_minutes: i64,
        pub price: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EmployeeBody {
        pub name: String,
        /// Names of the services in this request the employee performs.
        pub services: Vec<String>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub timezone: String,
        pub opening_hours: Vec<OpeningHoursRule>,
        pub services: Vec<ServiceBody>,
        pub employees: Vec<EmployeeBody>,
    }

    pub type APIResponse = VenueResponse;
}

pub mod get_venue {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub venue_id: ID,
    }

    pub type APIResponse = VenueResponse;
}
