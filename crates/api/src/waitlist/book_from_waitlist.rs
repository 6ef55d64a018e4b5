use super::openings::openings_for_request;
use crate::booking::create_booking::{self, CreateBookingUseCase};
use crate::booking::AvailabilityError;
use crate::error::VeloraError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::book_from_waitlist::*;
use velora_booking_domain::{Appointment, WaitlistStatus, ID};
use velora_booking_infra::VeloraContext;

pub async fn book_from_waitlist_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let usecase = BookFromWaitlistUseCase {
        request_id: path_params.request_id.clone(),
        start_ts: body.start_ts,
        notes: body.0.notes,
    };

    execute(usecase, &ctx)
        .await
        .map(|appointment| {
            let now = ctx.sys.get_timestamp_millis();
            HttpResponse::Created().json(APIResponse::new(appointment, now))
        })
        .map_err(VeloraError::from)
}

#[derive(Debug)]
pub struct BookFromWaitlistUseCase {
    pub request_id: ID,
    pub start_ts: i64,
    pub notes: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    RequestNotPending,
    SlotNoLongerAvailable,
    StorageError,
}

impl From<UseCaseError> for VeloraError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(request_id) => Self::NotFound(format!(
                "The waitlist request with id: {}, was not found.",
                request_id
            )),
            UseCaseError::RequestNotPending => {
                Self::Conflict("The waitlist request is no longer pending.".into())
            }
            UseCaseError::SlotNoLongerAvailable => {
                Self::Conflict("The slot is no longer available. Please pick another slot.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<AvailabilityError> for UseCaseError {
    fn from(e: AvailabilityError) -> Self {
        match e {
            AvailabilityError::VenueNotFound(_) | AvailabilityError::ServiceNotFound(_) => {
                Self::RequestNotPending
            }
            AvailabilityError::StorageError => Self::StorageError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for BookFromWaitlistUseCase {
    type Response = Appointment;

    type Error = UseCaseError;

    const NAME: &'static str = "BookFromWaitlist";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let mut request = ctx
            .repos
            .waitlist_requests
            .find(&self.request_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.request_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        if !request.is_pending(now) {
            return Err(UseCaseError::RequestNotPending);
        }

        // the chosen start must be an opening of this request, which pins
        // the slot to the preferred date and band
        let openings = openings_for_request(&request, ctx).await?;
        let slot = openings
            .iter()
            .find(|slot| slot.start_ts == self.start_ts)
            .ok_or(UseCaseError::SlotNoLongerAvailable)?;
        let employee_id = slot
            .employee_ids
            .first()
            .ok_or(UseCaseError::SlotNoLongerAvailable)?
            .clone();

        // the booking itself is the same conditional write as a direct one
        let appointment = CreateBookingUseCase {
            user_id: request.user_id.clone(),
            venue_id: request.venue_id.clone(),
            service_id: request.service_id.clone(),
            employee_id,
            start_ts: self.start_ts,
            notes: self.notes.clone(),
        }
        .execute(ctx)
        .await
        .map_err(|e| match e {
            create_booking::UseCaseError::SlotNoLongerAvailable => {
                UseCaseError::SlotNoLongerAvailable
            }
            create_booking::UseCaseError::StorageError => UseCaseError::StorageError,
            _ => UseCaseError::RequestNotPending,
        })?;

        request.status = WaitlistStatus::Fulfilled;
        request.updated = now;
        ctx.repos
            .waitlist_requests
            .save(&request)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(appointment)
    }
}
