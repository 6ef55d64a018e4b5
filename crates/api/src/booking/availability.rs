use velora_booking_domain::{
    first_available, get_slot_grid, Day, Employee, EmployeeBusy, SlotGridOptions, TimeSlot, Venue,
    VenueService, ID,
};
use velora_booking_infra::VeloraContext;

/// Failures shared by everything that feeds the slot calculator from the
/// repositories. Use cases map these onto their own error enums.
#[derive(Debug)]
pub enum AvailabilityError {
    VenueNotFound(ID),
    ServiceNotFound(ID),
    StorageError,
}

/// Resolves the (venue, service, candidate employees) triple every
/// availability query starts from.
pub async fn find_bookable_resource(
    venue_id: &ID,
    service_id: &ID,
    ctx: &VeloraContext,
) -> Result<(Venue, VenueService, Vec<Employee>), AvailabilityError> {
    let venue = ctx
        .repos
        .venues
        .find(venue_id)
        .await
        .map_err(|_| AvailabilityError::StorageError)?
        .ok_or_else(|| AvailabilityError::VenueNotFound(venue_id.clone()))?;
    let service = venue
        .find_service(service_id)
        .cloned()
        .ok_or_else(|| AvailabilityError::ServiceNotFound(service_id.clone()))?;
    let employees = venue
        .employees_for_service(service_id)
        .into_iter()
        .cloned()
        .collect();

    Ok((venue, service, employees))
}

/// The full slot grid for one date, masked by the existing non-cancelled
/// appointments of the candidate employees. A closed day and a date whose
/// open window lies entirely in the past both yield an empty grid.
pub async fn compute_day_slots(
    venue: &Venue,
    service: &VenueService,
    employees: &[Employee],
    day: &Day,
    ctx: &VeloraContext,
) -> Result<Vec<TimeSlot>, AvailabilityError> {
    let now = ctx.sys.get_timestamp_millis();
    let window = match venue.open_window(day) {
        Some(window) => window,
        None => return Ok(Vec::new()),
    };
    if window.end() <= now {
        return Ok(Vec::new());
    }

    let employee_ids: Vec<ID> = employees.iter().map(|e| e.id.clone()).collect();
    let busy_appointments = ctx
        .repos
        .appointments
        .find_by_employees(&employee_ids, &window)
        .await
        .map_err(|_| AvailabilityError::StorageError)?;

    let employees_busy: Vec<EmployeeBusy> = employees
        .iter()
        .map(|employee| EmployeeBusy {
            employee_id: employee.id.clone(),
            busy: busy_appointments
                .iter()
                .filter(|a| a.employee_id == employee.id)
                .map(|a| a.timespan())
                .collect(),
        })
        .collect();

    Ok(get_slot_grid(
        &employees_busy,
        &SlotGridOptions {
            window,
            duration: service.duration_millis(),
            now,
        },
    ))
}

#[derive(Debug, PartialEq)]
pub enum SlotError {
    /// The instant is not a grid slot inside the venue's open hours.
    OutsideOpeningHours,
    /// The slot was valid once but its start has passed.
    Elapsed,
}

/// Checks that `start_ts` names a real slot on the venue's grid for the
/// given service duration: aligned, fully inside the open window of its
/// venue-local day, and not started yet.
pub fn validate_slot(
    venue: &Venue,
    duration: i64,
    start_ts: i64,
    now: i64,
) -> Result<(), SlotError> {
    let day = Day::from_timestamp_millis(start_ts, &venue.timezone)
        .ok_or(SlotError::OutsideOpeningHours)?;
    let window = venue
        .open_window(&day)
        .ok_or(SlotError::OutsideOpeningHours)?;
    if !velora_booking_domain::is_valid_slot_start(start_ts, &window, duration) {
        return Err(SlotError::OutsideOpeningHours);
    }
    if start_ts < now {
        return Err(SlotError::Elapsed);
    }

    Ok(())
}

/// Scans forward day by day from `from`, skipping closed days, until a
/// date has at least one available slot. The scan is bounded by the
/// configured horizon; `None` means the horizon was exhausted.
pub async fn find_next_available_date(
    venue: &Venue,
    service: &VenueService,
    employees: &[Employee],
    from: &Day,
    ctx: &VeloraContext,
) -> Result<Option<Day>, AvailabilityError> {
    let mut day = from.clone();
    for _ in 0..ctx.config.availability_horizon_days {
        let slots = compute_day_slots(venue, service, employees, &day, ctx).await?;
        if first_available(&slots).is_some() {
            return Ok(Some(day));
        }
        day.inc();
    }

    Ok(None)
}
