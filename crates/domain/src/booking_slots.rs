use crate::{timespan::TimeSpan, ID};
use serde::Serialize;

/// One entry in the slot grid for a (venue, service, date).
///
/// The grid always covers the whole open window. A slot that is taken or
/// already elapsed is marked unavailable, never dropped, so a consumer can
/// render "full" instead of silently showing fewer options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_ts: i64,
    pub duration: i64,
    pub available: bool,
    /// Employees free to take this slot. Empty when unavailable.
    pub employee_ids: Vec<ID>,
}

/// The busy intervals of one employee within the queried window.
#[derive(Debug)]
pub struct EmployeeBusy {
    pub employee_id: ID,
    pub busy: Vec<TimeSpan>,
}

pub struct SlotGridOptions {
    /// The venue's open window for the day, in UTC millis.
    pub window: TimeSpan,
    /// Service duration in millis. Also the grid step.
    pub duration: i64,
    /// Slots starting before this instant are marked unavailable.
    pub now: i64,
}

fn is_employee_free(cursor: i64, duration: i64, busy: &[TimeSpan]) -> bool {
    let slot = TimeSpan::new(cursor, cursor + duration);
    !busy.iter().any(|interval| interval.overlaps(&slot))
}

/// Generates the slot grid at fixed `duration` steps within the open window.
/// A slot is available when at least one of the given employees has no
/// overlapping busy interval and the slot has not started yet.
pub fn get_slot_grid(employees: &[EmployeeBusy], options: &SlotGridOptions) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    let duration = options.duration;
    if duration < 1 {
        return slots;
    }

    let mut cursor = options.window.start();
    while cursor + duration <= options.window.end() {
        let mut employee_ids = Vec::new();
        if cursor >= options.now {
            for employee in employees {
                if is_employee_free(cursor, duration, &employee.busy) {
                    employee_ids.push(employee.employee_id.clone());
                }
            }
        }

        slots.push(TimeSlot {
            start_ts: cursor,
            duration,
            available: !employee_ids.is_empty(),
            employee_ids,
        });

        cursor += duration;
    }

    slots
}

pub fn first_available(slots: &[TimeSlot]) -> Option<&TimeSlot> {
    slots.iter().find(|slot| slot.available)
}

/// Whether `start_ts` lies on the slot grid of the given window, with the
/// whole slot inside the window.
pub fn is_valid_slot_start(start_ts: i64, window: &TimeSpan, duration: i64) -> bool {
    duration >= 1
        && start_ts >= window.start()
        && start_ts + duration <= window.end()
        && (start_ts - window.start()) % duration == 0
}

pub fn validate_slot_duration(duration_minutes: i64) -> bool {
    let min_duration = 5;
    let max_duration = 60 * 8;
    (min_duration..=max_duration).contains(&duration_minutes)
}
