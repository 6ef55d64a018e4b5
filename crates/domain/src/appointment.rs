use crate::{
    shared::entity::{Entity, ID},
    timespan::TimeSpan,
};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an `Appointment`.
///
/// Only `Upcoming` and `Cancelled` are ever stored. `Completed` is derived
/// from time by `Appointment::status_at` and exists so that readers never
/// apply their own timestamp comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
}

/// A booked visit. Venue, service and employee names are captured at
/// booking time so later catalog renames do not rewrite history, and price
/// and duration are frozen the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: ID,
    /// Opaque identifier supplied by the caller's identity layer.
    pub user_id: String,
    pub venue_id: ID,
    pub venue_name: String,
    pub service_name: String,
    pub employee_id: ID,
    pub employee_name: String,
    /// Slot start in UTC millis.
    pub scheduled_at: i64,
    pub duration_minutes: i64,
    pub price: f64,
    pub notes: Option<String>,
    /// Stored state, `Upcoming` or `Cancelled`. Use `status_at` for reads.
    pub status: AppointmentStatus,
    pub created: i64,
    pub updated: i64,
}

impl Appointment {
    pub fn end_ts(&self) -> i64 {
        self.scheduled_at + self.duration_minutes * 60 * 1000
    }

    pub fn timespan(&self) -> TimeSpan {
        TimeSpan::new(self.scheduled_at, self.end_ts())
    }

    /// The one place that decides whether an appointment lies in the past.
    pub fn is_past(&self, now: i64) -> bool {
        now >= self.end_ts()
    }

    /// Effective status at the given instant. A non-cancelled appointment
    /// whose end has passed reads as `Completed` without any stored flip.
    pub fn status_at(&self, now: i64) -> AppointmentStatus {
        match self.status {
            AppointmentStatus::Cancelled => AppointmentStatus::Cancelled,
            _ if self.is_past(now) => AppointmentStatus::Completed,
            _ => AppointmentStatus::Upcoming,
        }
    }
}

impl Entity for Appointment {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Splits appointments into the upcoming view (ascending `scheduled_at`)
/// and the past view (descending `scheduled_at`). Every appointment lands
/// in exactly one of the two.
pub fn partition_appointments(
    appointments: Vec<Appointment>,
    now: i64,
) -> (Vec<Appointment>, Vec<Appointment>) {
    let (mut upcoming, mut past): (Vec<_>, Vec<_>) = appointments
        .into_iter()
        .partition(|appointment| appointment.status_at(now) == AppointmentStatus::Upcoming);
    upcoming.sort_by_key(|a| a.scheduled_at);
    past.sort_by_key(|a| std::cmp::Reverse(a.scheduled_at));
    (upcoming, past)
}

#[cfg(test)]
mod test {
    use super::*;

    const HOUR: i64 = 1000 * 60 * 60;

    fn appointment(scheduled_at: i64, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: Default::default(),
            user_id: "user-1".into(),
            venue_id: Default::default(),
            venue_name: "Hair by Holm".into(),
            service_name: "Haircut".into(),
            employee_id: Default::default(),
            employee_name: "Maja".into(),
            scheduled_at,
            duration_minutes: 60,
            price: 450.0,
            notes: None,
            status,
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn it_derives_completed_from_time() {
        let a = appointment(10 * HOUR, AppointmentStatus::Upcoming);
        assert_eq!(a.end_ts(), 11 * HOUR);
        assert_eq!(a.status_at(9 * HOUR), AppointmentStatus::Upcoming);
        // still running
        assert_eq!(a.status_at(10 * HOUR + 1), AppointmentStatus::Upcoming);
        assert_eq!(a.status_at(11 * HOUR), AppointmentStatus::Completed);
        assert_eq!(a.status_at(12 * HOUR), AppointmentStatus::Completed);
    }

    #[test]
    fn cancelled_is_terminal_even_after_end() {
        let a = appointment(10 * HOUR, AppointmentStatus::Cancelled);
        assert_eq!(a.status_at(9 * HOUR), AppointmentStatus::Cancelled);
        assert_eq!(a.status_at(20 * HOUR), AppointmentStatus::Cancelled);
    }

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        let now = 10 * HOUR;
        let appointments = vec![
            appointment(20 * HOUR, AppointmentStatus::Upcoming),
            appointment(2 * HOUR, AppointmentStatus::Upcoming),
            appointment(12 * HOUR, AppointmentStatus::Cancelled),
            appointment(15 * HOUR, AppointmentStatus::Upcoming),
            appointment(5 * HOUR, AppointmentStatus::Cancelled),
        ];
        let total = appointments.len();

        let (upcoming, past) = partition_appointments(appointments, now);
        assert_eq!(upcoming.len() + past.len(), total);

        // upcoming ascending, all genuinely in the future
        assert_eq!(
            upcoming.iter().map(|a| a.scheduled_at).collect::<Vec<_>>(),
            vec![15 * HOUR, 20 * HOUR]
        );
        for a in &upcoming {
            assert_eq!(a.status_at(now), AppointmentStatus::Upcoming);
        }

        // past descending: the elapsed one and both cancelled ones
        assert_eq!(
            past.iter().map(|a| a.scheduled_at).collect::<Vec<_>>(),
            vec![12 * HOUR, 5 * HOUR, 2 * HOUR]
        );
        for a in &past {
            assert_ne!(a.status_at(now), AppointmentStatus::Upcoming);
        }
    }

    #[test]
    fn future_cancelled_appointment_belongs_to_past_view() {
        let now = 0;
        let (upcoming, past) =
            partition_appointments(vec![appointment(HOUR, AppointmentStatus::Cancelled)], now);
        assert!(upcoming.is_empty());
        assert_eq!(past.len(), 1);
    }
}
