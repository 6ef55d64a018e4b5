use crate::base::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use velora_booking_api_structs::*;
use velora_booking_domain::{TimeBand, ID};

#[derive(Clone)]
pub struct WaitlistClient {
    base: Arc<BaseClient>,
}

pub struct JoinWaitlistInput {
    pub user_id: String,
    pub venue_id: ID,
    pub service_id: ID,
    pub preferred_date: String,
    pub preferred_band: TimeBand,
}

pub struct BookFromWaitlistInput {
    pub request_id: ID,
    pub start_ts: i64,
    pub notes: Option<String>,
}

impl WaitlistClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn join(&self, input: JoinWaitlistInput) -> APIResponse<join_waitlist::APIResponse> {
        let body = join_waitlist::RequestBody {
            user_id: input.user_id,
            venue_id: input.venue_id,
            service_id: input.service_id,
            preferred_date: input.preferred_date,
            preferred_band: input.preferred_band,
        };
        self.base
            .post(body, "waitlist".into(), StatusCode::CREATED)
            .await
    }

    pub async fn cancel(
        &self,
        request_id: ID,
    ) -> APIResponse<cancel_waitlist_request::APIResponse> {
        self.base
            .delete(format!("waitlist/{}", request_id), StatusCode::OK)
            .await
    }

    pub async fn get_openings(
        &self,
        request_id: ID,
    ) -> APIResponse<get_waitlist_openings::APIResponse> {
        self.base
            .get(format!("waitlist/{}/openings", request_id), StatusCode::OK)
            .await
    }

    pub async fn book(
        &self,
        input: BookFromWaitlistInput,
    ) -> APIResponse<book_from_waitlist::APIResponse> {
        let body = book_from_waitlist::RequestBody {
            start_ts: input.start_ts,
            notes: input.notes,
        };
        self.base
            .post(
                body,
                format!("waitlist/{}/booking", input.request_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn get_for_user(
        &self,
        user_id: String,
    ) -> APIResponse<get_user_waitlist::APIResponse> {
        self.base
            .get(format!("users/{}/waitlist", user_id), StatusCode::OK)
            .await
    }
}
