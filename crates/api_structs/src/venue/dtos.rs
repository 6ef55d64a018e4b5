use serde::{Deserialize, Serialize};
use velora_booking_domain::{Employee, OpeningHours, Venue, VenueService, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VenueDTO {
    pub id: ID,
    pub name: String,
    pub timezone: String,
    pub opening_hours: OpeningHours,
    pub services: Vec<VenueService>,
    pub employees: Vec<Employee>,
}

impl VenueDTO {
    pub fn new(venue: Venue) -> Self {
        Self {
            id: venue.id.clone(),
            name: venue.name,
            timezone: venue.timezone.to_string(),
            opening_hours: venue.opening_hours,
            services: venue.services,
            employees: venue.employees,
        }
    }
}
