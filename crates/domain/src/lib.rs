mod appointment;
pub mod booking_slots;
mod date;
mod shared;
mod timespan;
mod venue;
mod waitlist;

pub use appointment::{partition_appointments, Appointment, AppointmentStatus};
pub use booking_slots::{
    first_available, get_slot_grid, is_valid_slot_start, validate_slot_duration, EmployeeBusy,
    SlotGridOptions, TimeSlot,
};
pub use date::{is_valid_date, Day};
pub use shared::entity::{Entity, ID};
pub use timespan::TimeSpan;
pub use venue::{Employee, OpeningHours, OpeningHoursRule, Time, Venue, VenueService};
pub use waitlist::{matching_open_slots, TimeBand, WaitlistRequest, WaitlistStatus};

pub use chrono::Weekday;
pub use chrono_tz::Tz;
