use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};
use velora_booking_domain::{TimeSlot, WaitlistRequest};

/// What a deployment's notification endpoint receives when slots matching
/// a pending waitlist request open up. Delivery is advisory and
/// at-least-once; the actual booking still goes through the fulfill
/// endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WaitlistOpeningPayload<'a> {
    request_id: String,
    user_id: &'a str,
    venue_id: String,
    service_id: String,
    preferred_date: String,
    slots: &'a [TimeSlot],
}

#[derive(Clone)]
pub struct WaitlistWebhookNotifier {
    client: Client,
    url: String,
}

impl WaitlistWebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    pub async fn notify_opening(&self, request: &WaitlistRequest, slots: &[TimeSlot]) {
        let payload = WaitlistOpeningPayload {
            request_id: request.id.as_string(),
            user_id: &request.user_id,
            venue_id: request.venue_id.as_string(),
            service_id: request.service_id.as_string(),
            preferred_date: request.preferred_date.to_string(),
            slots,
        };

        match self.client.post(&self.url).json(&payload).send().await {
            Ok(res) if res.status().is_success() => {
                info!(
                    "Notified webhook about opening for waitlist request: {}",
                    request.id
                );
            }
            Ok(res) => {
                error!(
                    "Webhook returned status: {} for waitlist request: {}",
                    res.status(),
                    request.id
                );
            }
            Err(e) => {
                error!(
                    "Unable to reach webhook for waitlist request: {}. Error: {:?}",
                    request.id, e
                );
            }
        }
    }
}
