use crate::{
    booking_slots::TimeSlot,
    date::Day,
    shared::entity::{Entity, ID},
    timespan::TimeSpan,
    venue::{Time, Venue},
};
use serde::{Deserialize, Serialize};

/// Coarse time-of-day preference for a waitlist request. Only the waitlist
/// works in bands; direct booking always targets an exact slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeBand {
    Any,
    Morning,
    Afternoon,
    Evening,
}

fn min_time(a: Time, b: Time) -> Time {
    if a < b {
        a
    } else {
        b
    }
}

fn max_time(a: Time, b: Time) -> Time {
    if a > b {
        a
    } else {
        b
    }
}

impl TimeBand {
    /// Clamps a venue-local open interval to this band. Morning is
    /// `[opening, 12:00)`, afternoon `[12:00, 17:00)`, evening
    /// `[17:00, closing)` and any the whole open interval. `None` when the
    /// band does not intersect the open interval.
    pub fn clamp(&self, open: &Time, close: &Time) -> Option<(Time, Time)> {
        let noon = Time::new(12, 0);
        let evening_start = Time::new(17, 0);
        let (start, end) = match self {
            TimeBand::Any => (open.clone(), close.clone()),
            TimeBand::Morning => (open.clone(), min_time(noon, close.clone())),
            TimeBand::Afternoon => (
                max_time(noon, open.clone()),
                min_time(evening_start, close.clone()),
            ),
            TimeBand::Evening => (max_time(evening_start, open.clone()), close.clone()),
        };
        if start < end {
            Some((start, end))
        } else {
            None
        }
    }

    /// The UTC window of this band on the given day at the venue. `None`
    /// when the venue is closed or the band lies outside the open hours.
    pub fn window(&self, venue: &Venue, day: &Day) -> Option<TimeSpan> {
        let weekday = day.weekday()?;
        let rule = venue.opening_hours.interval_for(weekday)?;
        let (start, end) = self.clamp(&rule.open, &rule.close)?;
        let start_ts = start.to_timestamp_millis(day, &venue.timezone)?;
        let end_ts = end.to_timestamp_millis(day, &venue.timezone)?;
        if start_ts < end_ts {
            Some(TimeSpan::new(start_ts, end_ts))
        } else {
            None
        }
    }
}

/// The slots of a day grid that could fulfill a request: available and
/// starting inside the band window.
pub fn matching_open_slots(slots: Vec<TimeSlot>, band_window: &TimeSpan) -> Vec<TimeSlot> {
    slots
        .into_iter()
        .filter(|slot| slot.available && band_window.contains(slot.start_ts))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WaitlistStatus {
    Pending,
    Fulfilled,
    Expired,
    Cancelled,
}

/// A standing wish for an appointment on a date where nothing suited the
/// user. Requests never reference a concrete slot; openings are found by
/// re-running the availability calculation against the band. Fulfilled and
/// cancelled requests are kept as audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitlistRequest {
    pub id: ID,
    pub user_id: String,
    pub venue_id: ID,
    pub service_id: ID,
    pub preferred_date: Day,
    pub preferred_band: TimeBand,
    /// Stored state, never `Expired`. Use `status_at` for reads.
    pub status: WaitlistStatus,
    /// First instant after the preferred date at the venue, captured at
    /// join time so expiry stays a pure time comparison.
    pub expires_at: i64,
    pub created: i64,
    pub updated: i64,
}

impl WaitlistRequest {
    /// Effective status at the given instant. A pending request past the
    /// end of its preferred date reads as `Expired`.
    pub fn status_at(&self, now: i64) -> WaitlistStatus {
        match self.status {
            WaitlistStatus::Pending if now >= self.expires_at => WaitlistStatus::Expired,
            status => status,
        }
    }

    pub fn is_pending(&self, now: i64) -> bool {
        self.status_at(now) == WaitlistStatus::Pending
    }
}

impl Entity for WaitlistRequest {
    fn id(&self) -> &ID {
        &self.id
    }
}
