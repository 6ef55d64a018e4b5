use crate::error::VeloraError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use crate::waitlist::NotifyWaitlistOnSlotFreed;
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::cancel_booking::*;
use velora_booking_domain::{Appointment, AppointmentStatus, ID};
use velora_booking_infra::VeloraContext;

pub async fn cancel_booking_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let usecase = CancelBookingUseCase {
        appointment_id: path_params.appointment_id.clone(),
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
pub struct CancelBookingUseCase {
    pub appointment_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidStateTransition,
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
                Self::Conflict("A completed appointment cannot be cancelled.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelBookingUseCase {
    type Response = Appointment;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelBooking";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let mut appointment = ctx
            .repos
            .appointments
            .find(&self.appointment_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.appointment_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        match appointment.status_at(now) {
            // a repeated cancel is a success, so retries are harmless
            AppointmentStatus::Cancelled => return Ok(appointment),
            AppointmentStatus::Completed => return Err(UseCaseError::InvalidStateTransition),
            AppointmentStatus::Upcoming => (),
        }

        appointment.status = AppointmentStatus::Cancelled;
        appointment.updated = now;
        ctx.repos
            .appointments
            .save(&appointment)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(appointment)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        // the freed slot may fulfill someone's waitlist request
        vec![Box::new(NotifyWaitlistOnSlotFreed)]
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<CancelBookingUseCase> for NotifyWaitlistOnSlotFreed {
    async fn notify(&self, appointment: &Appointment, ctx: &VeloraContext) {
        self.slot_freed(&appointment.venue_id, ctx).await;
    }
}
