use crate::shared::usecase::execute;
use crate::waitlist::ScanWaitlistOpeningsUseCase;
use actix_web::rt::time::interval;
use std::sync::Arc;
use std::time::Duration;
use velora_booking_infra::VeloraContext;

/// Periodically sweeps all pending waitlist requests for openings. The
/// sweep backs up the venue-scoped scans fired on cancellations, catching
/// openings those missed (a restart, a deploy, an expired lease).
pub fn start_waitlist_opening_scan(ctx: Arc<VeloraContext>) {
    let scan_interval = Duration::from_secs(ctx.config.waitlist_scan_interval_secs);
    actix_web::rt::spawn(async move {
        let mut scan_interval = interval(scan_interval);
        // the first tick fires immediately
        scan_interval.tick().await;
        loop {
            scan_interval.tick().await;
            let usecase = ScanWaitlistOpeningsUseCase { venue_id: None };
            let _ = execute(usecase, &ctx).await;
        }
    });
}
