mod base;
mod booking;
mod session;
mod status;
mod venue;
mod waitlist;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use booking::BookingClient;
pub use booking::{
    CreateBookingInput, GetBookingSlotsInput, GetNextAvailableDateInput, RescheduleBookingInput,
};
pub use session::{BookingSession, SessionError, SessionState};
use status::StatusClient;
use std::sync::Arc;
use venue::VenueClient;
pub use venue::CreateVenueInput;
pub use velora_booking_api_structs::create_venue::{EmployeeBody, ServiceBody};
pub use velora_booking_api_structs::dtos::*;
use waitlist::WaitlistClient;
pub use waitlist::{BookFromWaitlistInput, JoinWaitlistInput};

// Domain
pub use velora_booking_api_structs::dtos::AppointmentDTO as Appointment;
pub use velora_booking_api_structs::dtos::TimeSlotDTO as TimeSlot;
pub use velora_booking_api_structs::dtos::VenueDTO as Venue;
pub use velora_booking_api_structs::dtos::WaitlistRequestDTO as WaitlistRequest;
pub use velora_booking_domain::{
    AppointmentStatus, Day, OpeningHoursRule, Time, TimeBand, WaitlistStatus, ID,
};

pub use velora_booking_domain::Tz;
pub use velora_booking_domain::Weekday;

/// Velora Booking Server SDK
///
/// The SDK contains methods for interacting with the Velora Booking server
/// API.
#[derive(Clone)]
pub struct VeloraSDK {
    pub booking: BookingClient,
    pub status: StatusClient,
    pub venue: VenueClient,
    pub waitlist: WaitlistClient,
}

impl VeloraSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let booking = BookingClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let venue = VenueClient::new(base.clone());
        let waitlist = WaitlistClient::new(base);

        Self {
            booking,
            status,
            venue,
            waitlist,
        }
    }

    /// Starts an interactive booking flow for one user against one venue
    /// service.
    pub fn booking_session(
        &self,
        user_id: String,
        venue_id: ID,
        service_id: ID,
    ) -> BookingSession {
        BookingSession::new(
            self.booking.clone(),
            self.waitlist.clone(),
            user_id,
            venue_id,
            service_id,
        )
    }
}
