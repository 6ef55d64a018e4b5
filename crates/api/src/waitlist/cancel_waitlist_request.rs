use crate::error::VeloraError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::cancel_waitlist_request::*;
use velora_booking_domain::{WaitlistRequest, WaitlistStatus, ID};
use velora_booking_infra::VeloraContext;

pub async fn cancel_waitlist_request_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let usecase = CancelWaitlistRequestUseCase {
        request_id: path_params.request_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|request| {
            let now = ctx.sys.get_timestamp_millis();
            HttpResponse::Ok().json(APIResponse::new(request, now))
        })
        .map_err(VeloraError::from)
}

#[derive(Debug)]
pub struct CancelWaitlistRequestUseCase {
    pub request_id: ID,
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
            UseCaseError::NotFound(request_id) => Self::NotFound(format!(
                "The waitlist request with id: {}, was not found.",
                request_id
            )),
            UseCaseError::InvalidStateTransition => {
                Self::Conflict("Only a pending waitlist request can be cancelled.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelWaitlistRequestUseCase {
    type Response = WaitlistRequest;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelWaitlistRequest";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let mut request = ctx
            .repos
            .waitlist_requests
            .find(&self.request_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.request_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        match request.status_at(now) {
            WaitlistStatus::Cancelled => return Ok(request),
            WaitlistStatus::Fulfilled | WaitlistStatus::Expired => {
                return Err(UseCaseError::InvalidStateTransition)
            }
            WaitlistStatus::Pending => (),
        }

        request.status = WaitlistStatus::Cancelled;
        request.updated = now;
        ctx.repos
            .waitlist_requests
            .save(&request)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(request)
    }
}
