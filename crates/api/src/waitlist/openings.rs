use crate::booking::{compute_day_slots, find_bookable_resource, AvailabilityError};
use velora_booking_domain::{matching_open_slots, TimeSlot, WaitlistRequest};
use velora_booking_infra::VeloraContext;

/// The currently open slots that could fulfill a waitlist request: the
/// availability grid of its date, filtered to the preferred band. An empty
/// list means nothing has opened up (yet).
pub async fn openings_for_request(
    request: &WaitlistRequest,
    ctx: &VeloraContext,
) -> Result<Vec<TimeSlot>, AvailabilityError> {
    let (venue, service, employees) =
        find_bookable_resource(&request.venue_id, &request.service_id, ctx).await?;

    let band_window = match request
        .preferred_band
        .window(&venue, &request.preferred_date)
    {
        Some(window) => window,
        None => return Ok(Vec::new()),
    };

    let slots =
        compute_day_slots(&venue, &service, &employees, &request.preferred_date, ctx).await?;

    Ok(matching_open_slots(slots, &band_window))
}
