use crate::error::VeloraError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::create_venue::*;
use velora_booking_domain::{validate_slot_duration, Employee, OpeningHoursRule, Venue, VenueService};
use velora_booking_infra::VeloraContext;

pub async fn create_venue_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let body = body.0;
    let usecase = CreateVenueUseCase {
        name: body.name,
        timezone: body.timezone,
        opening_hours: body.opening_hours,
        services: body.services,
        employees: body.employees,
    };

    execute(usecase, &ctx)
        .await
        .map(|venue| HttpResponse::Created().json(APIResponse::new(venue)))
        .map_err(VeloraError::from)
}

#[derive(Debug)]
pub struct CreateVenueUseCase {
    pub name: String,
    pub timezone: String,
    pub opening_hours: Vec<OpeningHoursRule>,
    pub services: Vec<ServiceBody>,
    pub employees: Vec<EmployeeBody>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTimezone(String),
    InvalidServiceDuration(String),
    UnknownService(String),
    StorageError,
}

impl From<UseCaseError> for VeloraError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTimezone(timezone) => Self::BadClientData(format!(
                "Invalid timezone: {}. It should be a valid IANA TimeZone.",
                timezone
            )),
            UseCaseError::InvalidServiceDuration(service) => Self::BadClientData(format!(
                "The service: {}, has an invalid duration. It should be between 5 minutes and 8 hours.",
                service
            )),
            UseCaseError::UnknownService(service) => Self::BadClientData(format!(
                "An employee references the service: {}, which the venue does not offer.",
                service
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateVenueUseCase {
    type Response = Venue;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateVenue";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let mut venue = Venue::new(&self.name, &chrono_tz::UTC);
        if !venue.set_timezone(&self.timezone) {
            return Err(UseCaseError::InvalidTimezone(self.timezone.clone()));
        }

        venue.opening_hours.rules = self.opening_hours.clone();
        venue.opening_hours.parse_rules();

        for service in &self.services {
            if !validate_slot_duration(service.duration_minutes) {
                return Err(UseCaseError::InvalidServiceDuration(service.name.clone()));
            }
            venue.services.push(VenueService {
                id: Default::default(),
                name: service.name.clone(),
                duration_minutes: service.duration_minutes,
                price: service.price,
            });
        }

        // employees reference services by name within this request
        for employee in &self.employees {
            let mut service_ids = Vec::with_capacity(employee.services.len());
            for service_name in &employee.services {
                let service = venue
                    .services
                    .iter()
                    .find(|s| s.name == *service_name)
                    .ok_or_else(|| UseCaseError::UnknownService(service_name.clone()))?;
                service_ids.push(service.id.clone());
            }
            venue.employees.push(Employee {
                id: Default::default(),
                name: employee.name.clone(),
                service_ids,
            });
        }

        ctx.repos
            .venues
            .insert(&venue)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(venue)
    }
}
