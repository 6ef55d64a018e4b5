use super::availability::{
    compute_day_slots, find_bookable_resource, find_next_available_date, AvailabilityError,
};
use crate::error::VeloraError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::get_booking_slots::*;
use velora_booking_domain::{first_available, Day, TimeSlot, ID};
use velora_booking_infra::VeloraContext;

pub async fn get_booking_slots_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let usecase = GetBookingSlotsUseCase {
        venue_id: path_params.venue_id.clone(),
        service_id: path_params.service_id.clone(),
        date: query_params.date.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(
                res.date.to_string(),
                res.slots,
                res.next_available_date.map(|d| d.to_string()),
            ))
        })
        .map_err(VeloraError::from)
}

#[derive(Debug)]
pub struct GetBookingSlotsUseCase {
    pub venue_id: ID,
    pub service_id: ID,
    pub date: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub date: Day,
    pub slots: Vec<TimeSlot>,
    pub next_available_date: Option<Day>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidDate(String),
    VenueNotFound(ID),
    ServiceNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for VeloraError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDate(date) => Self::BadClientData(format!(
                "Invalid date: {}. Should be YYYY-MM-DD, e.g. January 1. 2030 => 2030-1-1",
                date
            )),
            UseCaseError::VenueNotFound(venue_id) => {
                Self::NotFound(format!("The venue with id: {}, was not found.", venue_id))
            }
            UseCaseError::ServiceNotFound(service_id) => Self::NotFound(format!(
                "The service with id: {}, was not found.",
                service_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<AvailabilityError> for UseCaseError {
    fn from(e: AvailabilityError) -> Self {
        match e {
            AvailabilityError::VenueNotFound(id) => Self::VenueNotFound(id),
            AvailabilityError::ServiceNotFound(id) => Self::ServiceNotFound(id),
            AvailabilityError::StorageError => Self::StorageError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetBookingSlotsUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetBookingSlots";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let date = self
            .date
            .parse::<Day>()
            .map_err(|_| UseCaseError::InvalidDate(self.date.clone()))?;

        let (venue, service, employees) =
            find_bookable_resource(&self.venue_id, &self.service_id, ctx).await?;

        let slots = compute_day_slots(&venue, &service, &employees, &date, ctx).await?;

        // Fully booked (or closed): hand the client the next date worth
        // jumping to, if one exists within the horizon.
        let next_available_date = if first_available(&slots).is_none() {
            let mut from = date.clone();
            from.inc();
            find_next_available_date(&venue, &service, &employees, &from, ctx).await?
        } else {
            None
        };

        Ok(UseCaseRes {
            date,
            slots,
            next_available_date,
        })
    }
}
