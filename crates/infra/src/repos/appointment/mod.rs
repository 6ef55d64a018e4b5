mod inmemory;
mod postgres;

pub use inmemory::InMemoryAppointmentRepo;
pub use postgres::PostgresAppointmentRepo;
use velora_booking_domain::{Appointment, TimeSpan, ID};

/// Outcome of the conditional slot writes.
#[derive(Debug)]
pub enum SlotWriteError {
    /// Another non-cancelled appointment for the same employee already
    /// holds an overlapping slot. The caller lost the booking race.
    SlotTaken,
    /// The appointment does not exist or is no longer upcoming.
    InvalidState,
    Storage(anyhow::Error),
}

#[async_trait::async_trait]
pub trait IAppointmentRepo: Send + Sync {
    /// Claims the slot and stores the appointment in a single conditional
    /// write. Two concurrent calls for the same employee and overlapping
    /// times can never both succeed.
    async fn book(&self, appointment: &Appointment) -> Result<(), SlotWriteError>;

    /// Moves an upcoming appointment to a new start time. The new slot is
    /// claimed in the same write that releases the old one, so losing a
    /// race for the new slot leaves the original booking untouched.
    async fn reschedule(
        &self,
        appointment_id: &ID,
        scheduled_at: i64,
        now: i64,
    ) -> Result<Appointment, SlotWriteError>;

    /// Persists lifecycle fields (status, notes, updated). The slot
    /// position only ever moves through `reschedule`.
    async fn save(&self, appointment: &Appointment) -> anyhow::Result<()>;

    async fn find(&self, appointment_id: &ID) -> anyhow::Result<Option<Appointment>>;

    async fn find_by_user(&self, user_id: &str) -> anyhow::Result<Vec<Appointment>>;

    /// Non-cancelled appointments for any of the given employees that
    /// overlap the timespan. This is the busy source for the slot grid.
    async fn find_by_employees(
        &self,
        employee_ids: &[ID],
        timespan: &TimeSpan,
    ) -> anyhow::Result<Vec<Appointment>>;
}
