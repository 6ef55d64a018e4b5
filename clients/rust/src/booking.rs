use crate::base::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use velora_booking_api_structs::*;
use velora_booking_domain::ID;

#[derive(Clone)]
pub struct BookingClient {
    base: Arc<BaseClient>,
}

pub struct GetBookingSlotsInput {
    pub venue_id: ID,
    pub service_id: ID,
    /// `YYYY-M-D`
    pub date: String,
}

pub struct GetNextAvailableDateInput {
    pub venue_id: ID,
    pub service_id: ID,
    pub from: String,
    pub employee_id: Option<ID>,
}

pub struct CreateBookingInput {
    pub user_id: String,
    pub venue_id: ID,
    pub service_id: ID,
    pub employee_id: ID,
    pub start_ts: i64,
    pub notes: Option<String>,
}

pub struct RescheduleBookingInput {
    pub appointment_id: ID,
    pub start_ts: i64,
}

impl BookingClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_slots(
        &self,
        input: GetBookingSlotsInput,
    ) -> APIResponse<get_booking_slots::APIResponse> {
        self.base
            .get(
                format!(
                    "venues/{}/services/{}/slots?date={}",
                    input.venue_id, input.service_id, input.date
                ),
                StatusCode::OK,
            )
            .await
    }

    pub async fn get_next_available_date(
        &self,
        input: GetNextAvailableDateInput,
    ) -> APIResponse<get_next_available_date::APIResponse> {
        let mut path = format!(
            "venues/{}/services/{}/slots/next-available?from={}",
            input.venue_id, input.service_id, input.from
        );
        if let Some(employee_id) = input.employee_id {
            path = format!("{}&employeeId={}", path, employee_id);
        }
        self.base.get(path, StatusCode::OK).await
    }

    pub async fn create(
        &self,
        input: CreateBookingInput,
    ) -> APIResponse<create_booking::APIResponse> {
        let body = create_booking::RequestBody {
            user_id: input.user_id,
            venue_id: input.venue_id,
            service_id: input.service_id,
            employee_id: input.employee_id,
            start_ts: input.start_ts,
            notes: input.notes,
        };
        self.base
            .post(body, "booking".into(), StatusCode::CREATED)
            .await
    }

    pub async fn cancel(&self, appointment_id: ID) -> APIResponse<cancel_booking::APIResponse> {
        self.base
            .delete(format!("booking/{}", appointment_id), StatusCode::OK)
            .await
    }

    pub async fn reschedule(
        &self,
        input: RescheduleBookingInput,
    ) -> APIResponse<reschedule_booking::APIResponse> {
        let body = reschedule_booking::RequestBody {
            start_ts: input.start_ts,
        };
        self.base
            .post(
                body,
                format!("booking/{}/reschedule", input.appointment_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn get_upcoming(
        &self,
        user_id: String,
    ) -> APIResponse<get_upcoming_bookings::APIResponse> {
        self.base
            .get(format!("users/{}/booking/upcoming", user_id), StatusCode::OK)
            .await
    }

    pub async fn get_past(&self, user_id: String) -> APIResponse<get_past_bookings::APIResponse> {
        self.base
            .get(format!("users/{}/booking/past", user_id), StatusCode::OK)
            .await
    }
}
