use crate::base::{APIError, APIErrorVariant, APIResponse};
use crate::booking::{BookingClient, CreateBookingInput, GetBookingSlotsInput};
use crate::waitlist::{BookFromWaitlistInput, JoinWaitlistInput, WaitlistClient};
use reqwest::StatusCode;
use velora_booking_api_structs::dtos::{AppointmentDTO, TimeSlotDTO, WaitlistRequestDTO};
use velora_booking_domain::{TimeBand, ID};

/// Where a booking flow currently stands. The session moves forward by
/// calling the matching method on `BookingSession`; calling anything else
/// is a usage error.
#[derive(Debug)]
pub enum SessionState {
    /// Nothing chosen yet.
    SelectingDate,
    /// The date has open slots, one still has to be picked.
    SelectingSlot {
        date: String,
        slots: Vec<TimeSlotDTO>,
    },
    /// Every slot of the chosen date is taken. The caller can move on to
    /// the suggested date or join the waitlist.
    FullyBooked {
        date: String,
        next_available_date: Option<String>,
    },
    /// On the waitlist for the chosen date, waiting for an opening.
    WaitlistJoined { request: WaitlistRequestDTO },
    /// Terminal.
    Booked { appointment: AppointmentDTO },
}

#[derive(Debug)]
pub enum SessionError {
    /// The called transition does not apply to the current state.
    InvalidTransition(&'static str),
    API(APIError),
}

impl From<APIError> for SessionError {
    fn from(e: APIError) -> Self {
        Self::API(e)
    }
}

/// Drives the find-a-slot flow for one user against one venue service:
/// pick a date, pick a slot, and when the day is full either jump to the
/// next available date or fall back to the waitlist. Losing a booking race
/// drops the session back to slot selection with a fresh grid.
pub struct BookingSession {
    booking: BookingClient,
    waitlist: WaitlistClient,
    user_id: String,
    venue_id: ID,
    service_id: ID,
    state: SessionState,
}

impl BookingSession {
    pub(crate) fn new(
        booking: BookingClient,
        waitlist: WaitlistClient,
        user_id: String,
        venue_id: ID,
        service_id: ID,
    ) -> Self {
        Self {
            booking,
            waitlist,
            user_id,
            venue_id,
            service_id,
            state: SessionState::SelectingDate,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    async fn fetch_day(&self, date: String) -> APIResponse<SessionState> {
        let res = self
            .booking
            .get_slots(GetBookingSlotsInput {
                venue_id: self.venue_id.clone(),
                service_id: self.service_id.clone(),
                date,
            })
            .await?;

        if res.slots.iter().any(|slot| slot.available) {
            Ok(SessionState::SelectingSlot {
                date: res.date,
                slots: res.slots,
            })
        } else {
            Ok(SessionState::FullyBooked {
                date: res.date,
                next_available_date: res.next_available_date,
            })
        }
    }

    /// Valid from `SelectingDate` and from `FullyBooked` (moving on to
    /// another date).
    pub async fn select_date(&mut self, date: &str) -> Result<&SessionState, SessionError> {
        match self.state {
            SessionState::SelectingDate | SessionState::FullyBooked { .. } => (),
            _ => return Err(SessionError::InvalidTransition("select_date")),
        }
        self.state = self.fetch_day(date.into()).await?;
        Ok(&self.state)
    }

    /// Valid from `SelectingSlot`. Losing the race for the slot is not an
    /// error: the session re-enters `SelectingSlot` with the current grid.
    pub async fn book_slot(
        &mut self,
        employee_id: ID,
        start_ts: i64,
        notes: Option<String>,
    ) -> Result<&SessionState, SessionError> {
        let date = match &self.state {
            SessionState::SelectingSlot { date, .. } => date.clone(),
            _ => return Err(SessionError::InvalidTransition("book_slot")),
        };

        let res = self
            .booking
            .create(CreateBookingInput {
                user_id: self.user_id.clone(),
                venue_id: self.venue_id.clone(),
                service_id: self.service_id.clone(),
                employee_id,
                start_ts,
                notes,
            })
            .await;

        match res {
            Ok(res) => {
                self.state = SessionState::Booked {
                    appointment: res.appointment,
                };
                Ok(&self.state)
            }
            Err(APIError {
                variant: APIErrorVariant::UnexpectedStatusCode { actual, .. },
                ..
            }) if actual == StatusCode::CONFLICT => {
                self.state = self.fetch_day(date).await?;
                Ok(&self.state)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Valid from `FullyBooked`.
    pub async fn join_waitlist(&mut self, band: TimeBand) -> Result<&SessionState, SessionError> {
        let date = match &self.state {
            SessionState::FullyBooked { date, .. } => date.clone(),
            _ => return Err(SessionError::InvalidTransition("join_waitlist")),
        };

        let res = self
            .waitlist
            .join(JoinWaitlistInput {
                user_id: self.user_id.clone(),
                venue_id: self.venue_id.clone(),
                service_id: self.service_id.clone(),
                preferred_date: date,
                preferred_band: band,
            })
            .await?;

        self.state = SessionState::WaitlistJoined {
            request: res.request,
        };
        Ok(&self.state)
    }

    /// Valid from `WaitlistJoined`, once an opening notification arrived.
    pub async fn book_opening(&mut self, start_ts: i64) -> Result<&SessionState, SessionError> {
        let request_id = match &self.state {
            SessionState::WaitlistJoined { request } => request.id.clone(),
            _ => return Err(SessionError::InvalidTransition("book_opening")),
        };

        let res = self
            .waitlist
            .book(BookFromWaitlistInput {
                request_id,
                start_ts,
                notes: None,
            })
            .await?;

        self.state = SessionState::Booked {
            appointment: res.appointment,
        };
        Ok(&self.state)
    }
}
