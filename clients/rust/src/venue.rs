use crate::base::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use velora_booking_api_structs::create_venue::{EmployeeBody, ServiceBody};
use velora_booking_api_structs::*;
use velora_booking_domain::{OpeningHoursRule, ID};

#[derive(Clone)]
pub struct VenueClient {
    base: Arc<BaseClient>,
}

pub struct CreateVenueInput {
    pub name: String,
    pub timezone: String,
    pub opening_hours: Vec<OpeningHoursRule>,
    pub services: Vec<ServiceBody>,
    pub employees: Vec<EmployeeBody>,
}

impl VenueClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateVenueInput) -> APIResponse<create_venue::APIResponse> {
        let body = create_venue::RequestBody {
            name: input.name,
            timezone: input.timezone,
            opening_hours: input.opening_hours,
            services: input.services,
            employees: input.employees,
        };
        self.base
            .post(body, "venues".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, venue_id: ID) -> APIResponse<get_venue::APIResponse> {
        self.base
            .get(format!("venues/{}", venue_id), StatusCode::OK)
            .await
    }
}
