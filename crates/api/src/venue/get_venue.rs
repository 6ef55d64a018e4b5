use crate::error::VeloraError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::get_venue::*;
use velora_booking_domain::{Venue, ID};
use velora_booking_infra::VeloraContext;

pub async fn get_venue_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let usecase = GetVenueUseCase {
        venue_id: path_params.venue_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|venue| HttpResponse::Ok().json(APIResponse::new(venue)))
        .map_err(VeloraError::from)
}

#[derive(Debug)]
pub struct GetVenueUseCase {
    pub venue_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for VeloraError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(venue_id) => {
                Self::NotFound(format!("The venue with id: {}, was not found.", venue_id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetVenueUseCase {
    type Response = Venue;

    type Error = UseCaseError;

    const NAME: &'static str = "GetVenue";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .venues
            .find(&self.venue_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.venue_id.clone()))
    }
}
