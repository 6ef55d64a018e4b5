use super::openings::openings_for_request;
use crate::shared::usecase::{execute, UseCase};
use tracing::info;
use velora_booking_domain::{TimeSlot, WaitlistRequest, ID};
use velora_booking_infra::{VeloraContext, WaitlistWebhookNotifier};

/// A pending request together with the slots that currently could fulfill
/// it.
#[derive(Debug)]
pub struct WaitlistOpening {
    pub request: WaitlistRequest,
    pub slots: Vec<TimeSlot>,
}

/// Finds pending waitlist requests whose preferred date and band have open
/// slots right now, and pushes each opening to the configured webhook.
///
/// Runs in two modes: the periodic background sweep scans everything, and
/// a cancellation or reschedule triggers a scan scoped to the venue whose
/// slot was freed.
#[derive(Debug)]
pub struct ScanWaitlistOpeningsUseCase {
    pub venue_id: Option<ID>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ScanWaitlistOpeningsUseCase {
    type Response = Vec<WaitlistOpening>;

    type Error = UseCaseError;

    const NAME: &'static str = "ScanWaitlistOpenings";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let mut pending = ctx
            .repos
            .waitlist_requests
            .find_pending(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if let Some(venue_id) = &self.venue_id {
            pending.retain(|r| r.venue_id == *venue_id);
        }

        let notifier = ctx
            .config
            .waitlist_webhook_url
            .clone()
            .map(WaitlistWebhookNotifier::new);

        let mut openings = Vec::new();
        for request in pending {
            // a request whose venue or service vanished is skipped, the
            // sweep must not die on one bad row
            let slots = match openings_for_request(&request, ctx).await {
                Ok(slots) => slots,
                Err(_) => continue,
            };
            if slots.is_empty() {
                continue;
            }

            if let Some(notifier) = &notifier {
                notifier.notify_opening(&request, &slots).await;
            }
            openings.push(WaitlistOpening { request, slots });
        }

        if !openings.is_empty() {
            info!("Found openings for {} waitlist request(s)", openings.len());
        }

        Ok(openings)
    }
}

/// Hooked onto the use cases that free a slot. Fires a venue-scoped scan
/// so waiting users hear about the opening right away instead of at the
/// next sweep.
#[derive(Debug)]
pub struct NotifyWaitlistOnSlotFreed;

impl NotifyWaitlistOnSlotFreed {
    pub async fn slot_freed(&self, venue_id: &ID, ctx: &VeloraContext) {
        let usecase = ScanWaitlistOpeningsUseCase {
            venue_id: Some(venue_id.clone()),
        };
        // failures are already logged by the executor
        let _ = execute(usecase, ctx).await;
    }
}
