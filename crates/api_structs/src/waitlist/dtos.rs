use serde::{Deserialize, Serialize};
use velora_booking_domain::{Day, TimeBand, WaitlistRequest, WaitlistStatus, ID};

/// Wire shape of a `WaitlistRequest`, with the effective status at
/// response time (a pending request past its preferred date reads as
/// expired).
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistRequestDTO {
    pub id: ID,
    pub user_id: String,
    pub venue_id: ID,
    pub service_id: ID,
    pub preferred_date: Day,
    pub preferred_band: TimeBand,
    pub status: WaitlistStatus,
    pub expires_at: i64,
    pub created: i64,
    pub updated: i64,
}

impl WaitlistRequestDTO {
    pub fn new(request: WaitlistRequest, now: i64) -> Self {
        Self {
            id: request.id.clone(),
            user_id: request.user_id.clone(),
            venue_id: request.venue_id.clone(),
            service_id: request.service_id.clone(),
            preferred_date: request.preferred_date.clone(),
            preferred_band: request.preferred_band,
            status: request.status_at(now),
            expires_at: request.expires_at,
            created: request.created,
            updated: request.updated,
        }
    }
}
