use super::availability::{validate_slot, SlotError};
use crate::error::VeloraError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::create_booking::*;
use velora_booking_domain::{Appointment, AppointmentStatus, ID};
use velora_booking_infra::{SlotWriteError, VeloraContext};

pub async fn create_booking_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let body = body.0;
    let usecase = CreateBookingUseCase {
        user_id: body.user_id,
        venue_id: body.venue_id,
        service_id: body.service_id,
        employee_id: body.employee_id,
        start_ts: body.start_ts,
        notes: body.notes,
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
pub struct CreateBookingUseCase {
    pub user_id: String,
    pub venue_id: ID,
    pub service_id: ID,
    pub employee_id: ID,
    pub start_ts: i64,
    pub notes: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    VenueNotFound(ID),
    ServiceNotFound(ID),
    EmployeeNotFound(ID),
    InvalidSlot,
    SlotNoLongerAvailable,
    StorageError,
}

impl From<UseCaseError> for VeloraError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::VenueNotFound(venue_id) => {
                Self::NotFound(format!("The venue with id: {}, was not found.", venue_id))
            }
            UseCaseError::ServiceNotFound(service_id) => Self::NotFound(format!(
                "The service with id: {}, was not found.",
                service_id
            )),
            UseCaseError::EmployeeNotFound(employee_id) => Self::BadClientData(format!(
                "The employee with id: {}, does not offer this service.",
                employee_id
            )),
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
impl UseCase for CreateBookingUseCase {
    type Response = Appointment;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateBooking";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let venue = ctx
            .repos
            .venues
            .find(&self.venue_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::VenueNotFound(self.venue_id.clone()))?;
        let service = venue
            .find_service(&self.service_id)
            .ok_or_else(|| UseCaseError::ServiceNotFound(self.service_id.clone()))?;
        let employee = match venue.find_employee(&self.employee_id) {
            Some(employee) if employee.offers(&self.service_id) => employee,
            _ => return Err(UseCaseError::EmployeeNotFound(self.employee_id.clone())),
        };

        let now = ctx.sys.get_timestamp_millis();
        validate_slot(&venue, service.duration_millis(), self.start_ts, now).map_err(|e| {
            match e {
                SlotError::OutsideOpeningHours => UseCaseError::InvalidSlot,
                // an aligned slot whose start has passed reads as taken,
                // not as a malformed request
                SlotError::Elapsed => UseCaseError::SlotNoLongerAvailable,
            }
        })?;

        let appointment = Appointment {
            id: Default::default(),
            user_id: self.user_id.clone(),
            venue_id: venue.id.clone(),
            venue_name: venue.name.clone(),
            service_name: service.name.clone(),
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            scheduled_at: self.start_ts,
            duration_minutes: service.duration_minutes,
            price: service.price,
            notes: self.notes.clone(),
            status: AppointmentStatus::Upcoming,
            created: now,
            updated: now,
        };

        // one conditional write decides the race
        ctx.repos
            .appointments
            .book(&appointment)
            .await
            .map_err(|e| match e {
                SlotWriteError::SlotTaken => UseCaseError::SlotNoLongerAvailable,
                SlotWriteError::InvalidState => UseCaseError::SlotNoLongerAvailable,
                SlotWriteError::Storage(_) => UseCaseError::StorageError,
            })?;

        Ok(appointment)
    }
}
