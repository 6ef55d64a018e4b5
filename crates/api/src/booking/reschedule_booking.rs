use super::availability::{validate_slot, SlotError};
use crate::error::VeloraError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use crate::waitlist::NotifyWaitlistOnSlotFreed;
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::reschedule_booking::*;
use velora_booking_domain::{Appointment, AppointmentStatus, ID};
use velora_booking_infra::{SlotWriteError, VeloraContext};

pub async fn reschedule_booking_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let usecase = RescheduleBookingUseCase {
        appointment_id: path_params.appointment_id.clone(),
        start_ts: body.start_ts,
    };

    execute(usecase, &ctx)
        .await
        .map(|appointment| {
            let now = ctx.sys.get_timestamp_millis();
            HttpResponse::Ok().json(APIResponse::new(appointment, now))
        })
        .map_err(VeloraError::from)
}

#[derive(Debug)]
pub struct RescheduleBookingUseCase {
    pub appointment_id: ID,
    pub start_ts: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidStateTransition,
    InvalidSlot,
    SlotNoLongerAvailable,
    StorageError,
}

impl From<UseCaseError> for VeloraError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(appointment_id) => Self::NotFound(format!(
                "The appointment with id: {}, was not found.",
                appointment_id
            )),
            UseCaseError::InvalidStateTransition => {
                Self::Conflict("Only an upcoming appointment can be rescheduled.".into())
            }
            UseCaseError::InvalidSlot => Self::BadClientData(
                "The given start time is not a bookable slot within the venue's opening hours."
                    .into(),
            ),
            UseCaseError::SlotNoLongerAvailable => {
                Self::Conflict("The slot is no longer available. Please pick another slot.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RescheduleBookingUseCase {
    type Response = Appointment;

    type Error = UseCaseError;

    const NAME: &'static str = "RescheduleBooking";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let appointment = ctx
            .repos
            .appointments
            .find(&self.appointment_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.appointment_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        if appointment.status_at(now) != AppointmentStatus::Upcoming {
            return Err(UseCaseError::InvalidStateTransition);
        }

        // the service catalog may have changed since the original booking,
        // so the move keeps the duration and price that were sold
        let venue = ctx
            .repos
            .venues
            .find(&appointment.venue_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.appointment_id.clone()))?;
        let duration = appointment.duration_minutes * 60 * 1000;
        validate_slot(&venue, duration, self.start_ts, now).map_err(|e| match e {
            SlotError::OutsideOpeningHours => UseCaseError::InvalidSlot,
            SlotError::Elapsed => UseCaseError::SlotNoLongerAvailable,
        })?;

        let moved = ctx
            .repos
            .appointments
            .reschedule(&self.appointment_id, self.start_ts, now)
            .await
            .map_err(|e| match e {
                SlotWriteError::SlotTaken => UseCaseError::SlotNoLongerAvailable,
                SlotWriteError::InvalidState => UseCaseError::InvalidStateTransition,
                SlotWriteError::Storage(_) => UseCaseError::StorageError,
            })?;

        Ok(moved)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        // moving a booking frees its old slot
        vec![Box::new(NotifyWaitlistOnSlotFreed)]
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<RescheduleBookingUseCase> for NotifyWaitlistOnSlotFreed {
    async fn notify(&self, appointment: &Appointment, ctx: &VeloraContext) {
        self.slot_freed(&appointment.venue_id, ctx).await;
    }
}
