use super::availability::{find_bookable_resource, find_next_available_date, AvailabilityError};
use crate::error::VeloraError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::get_next_available_date::*;
use velora_booking_domain::{Day, ID};
use velora_booking_infra::VeloraContext;

pub async fn get_next_available_date_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let usecase = GetNextAvailableDateUseCase {
        venue_id: path_params.venue_id.clone(),
        service_id: path_params.service_id.clone(),
        employee_id: query_params.employee_id.clone(),
        from: query_params.from.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|date| {
            HttpResponse::Ok().json(APIResponse {
                date: date.to_string(),
            })
        })
        .map_err(VeloraError::from)
}

#[derive(Debug)]
pub struct GetNextAvailableDateUseCase {
    pub venue_id: ID,
    pub service_id: ID,
    /// Restricts the scan to one employee's availability when set.
    pub employee_id: Option<ID>,
    pub from: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidDate(String),
    VenueNotFound(ID),
    ServiceNotFound(ID),
    EmployeeNotFound(ID),
    NoAvailabilityWithinHorizon,
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
            UseCaseError::EmployeeNotFound(employee_id) => Self::BadClientData(format!(
                "The employee with id: {}, does not offer this service.",
                employee_id
            )),
            UseCaseError::NoAvailabilityWithinHorizon => Self::NoAvailability(
                "No available slots within the search horizon. Consider joining the waitlist."
                    .into(),
            ),
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
impl UseCase for GetNextAvailableDateUseCase {
    type Response = Day;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNextAvailableDate";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let from = self
            .from
            .parse::<Day>()
            .map_err(|_| UseCaseError::InvalidDate(self.from.clone()))?;

        let (venue, service, mut employees) =
            find_bookable_resource(&self.venue_id, &self.service_id, ctx).await?;

        if let Some(employee_id) = &self.employee_id {
            employees.retain(|e| e.id == *employee_id);
            if employees.is_empty() {
                return Err(UseCaseError::EmployeeNotFound(employee_id.clone()));
            }
        }

        find_next_available_date(&venue, &service, &employees, &from, ctx)
            .await?
            .ok_or(UseCaseError::NoAvailabilityWithinHorizon)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::booking::test_helpers::{booked_appointment, salon_venue, DummySys};
    use std::sync::Arc;
    use velora_booking_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn skips_closed_days() {
        let ctx = setup_context().await;
        let venue = salon_venue(&ctx).await;

        let mut usecase = GetNextAvailableDateUseCase {
            venue_id: venue.id.clone(),
            service_id: venue.services[0].id.clone(),
            employee_id: None,
            // Sunday, closed
            from: "2030-5-5".into(),
        };
        let date = usecase.execute(&ctx).await.unwrap();
        assert_eq!(date.to_string(), "2030-5-6");
    }

    #[actix_web::main]
    #[test]
    async fn returns_first_day_with_a_free_slot() {
        let mut ctx = setup_context().await;
        ctx.sys = Arc::new(DummySys { now: 0 });
        let venue = salon_venue(&ctx).await;
        // coloring has a single employee offering it
        let service = venue.services[1].clone();
        let employee = venue.employees[0].clone();

        // fill monday completely for that employee
        let day = "2030-5-6".parse::<Day>().unwrap();
        let window = venue.open_window(&day).unwrap();
        let mut cursor = window.start();
        while cursor + service.duration_millis() <= window.end() {
            ctx.repos
                .appointments
                .book(&booked_appointment(&venue, &service, &employee, cursor))
                .await
                .unwrap();
            cursor += service.duration_millis();
        }

        let mut usecase = GetNextAvailableDateUseCase {
            venue_id: venue.id.clone(),
            service_id: service.id.clone(),
            employee_id: None,
            from: "2030-5-6".into(),
        };
        let date = usecase.execute(&ctx).await.unwrap();
        assert_eq!(date.to_string(), "2030-5-7");
    }

    #[actix_web::main]
    #[test]
    async fn bounded_scan_fails_decisively_when_always_closed() {
        let mut ctx = setup_context().await;
        ctx.sys = Arc::new(DummySys { now: 0 });
        let mut venue = salon_venue(&ctx).await;
        // a venue with no opening hours at all
        venue.opening_hours.rules.clear();
        venue.id = Default::default();
        ctx.repos.venues.insert(&venue).await.unwrap();

        let mut usecase = GetNextAvailableDateUseCase {
            venue_id: venue.id.clone(),
            service_id: venue.services[0].id.clone(),
            employee_id: None,
            from: "2030-5-6".into(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NoAvailabilityWithinHorizon)
        ));
    }

    #[actix_web::main]
    #[test]
    async fn unknown_employee_filter_is_rejected() {
        let ctx = setup_context().await;
        let venue = salon_venue(&ctx).await;

        let mut usecase = GetNextAvailableDateUseCase {
            venue_id: venue.id.clone(),
            service_id: venue.services[0].id.clone(),
            employee_id: Some(Default::default()),
            from: "2030-5-6".into(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::EmployeeNotFound(_))
        ));
    }
}
