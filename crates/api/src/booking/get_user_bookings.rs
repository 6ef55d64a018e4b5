use crate::error::VeloraError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::get_upcoming_bookings::*;
use velora_booking_domain::{partition_appointments, Appointment};
use velora_booking_infra::VeloraContext;

pub async fn get_upcoming_bookings_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let usecase = GetUserBookingsUseCase {
        user_id: path_params.user_id.clone(),
        view: BookingView::Upcoming,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.appointments, res.now)))
        .map_err(VeloraError::from)
}

pub async fn get_past_bookings_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let usecase = GetUserBookingsUseCase {
        user_id: path_params.user_id.clone(),
        view: BookingView::Past,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.appointments, res.now)))
        .map_err(VeloraError::from)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BookingView {
    /// Ascending by start, soonest first.
    Upcoming,
    /// Completed and cancelled, most recent first.
    Past,
}

#[derive(Debug)]
pub struct GetUserBookingsUseCase {
    pub user_id: String,
    pub view: BookingView,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub appointments: Vec<Appointment>,
    /// The instant the view was taken at, so DTOs derive the same statuses.
    pub now: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for VeloraError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserBookingsUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserBookings";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let appointments = ctx
            .repos
            .appointments
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let now = ctx.sys.get_timestamp_millis();
        let (upcoming, past) = partition_appointments(appointments, now);
        let appointments = match self.view {
            BookingView::Upcoming => upcoming,
            BookingView::Past => past,
        };

        Ok(UseCaseRes { appointments, now })
    }
}
