use crate::error::VeloraError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::join_waitlist::*;
use velora_booking_domain::{Day, TimeBand, WaitlistRequest, WaitlistStatus, ID};
use velora_booking_infra::VeloraContext;

pub async fn join_waitlist_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let body = body.0;
    let usecase = JoinWaitlistUseCase {
        user_id: body.user_id,
        venue_id: body.venue_id,
        service_id: body.service_id,
        preferred_date: body.preferred_date,
        preferred_band: body.preferred_band,
    };

    execute(usecase, &ctx)
        .await
        .map(|request| {
            let now = ctx.sys.get_timestamp_millis();
            HttpResponse::Created().json(APIResponse::new(request, now))
        })
        .map_err(VeloraError::from)
}

#[derive(Debug)]
pub struct JoinWaitlistUseCase {
    pub user_id: String,
    pub venue_id: ID,
    pub service_id: ID,
    pub preferred_date: String,
    pub preferred_band: TimeBand,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidDate(String),
    DateInPast,
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
            UseCaseError::DateInPast => {
                Self::BadClientData("Cannot join a waitlist for a date in the past.".into())
            }
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

#[async_trait::async_trait(?Send)]
impl UseCase for JoinWaitlistUseCase {
    type Response = WaitlistRequest;

    type Error = UseCaseError;

    const NAME: &'static str = "JoinWaitlist";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let preferred_date = self
            .preferred_date
            .parse::<Day>()
            .map_err(|_| UseCaseError::InvalidDate(self.preferred_date.clone()))?;

        let venue = ctx
            .repos
            .venues
            .find(&self.venue_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::VenueNotFound(self.venue_id.clone()))?;
        if venue.find_service(&self.service_id).is_none() {
            return Err(UseCaseError::ServiceNotFound(self.service_id.clone()));
        }

        // expiry is frozen at join time so the scan never needs the venue
        let expires_at = venue
            .end_of_day(&preferred_date)
            .ok_or_else(|| UseCaseError::InvalidDate(self.preferred_date.clone()))?;
        let now = ctx.sys.get_timestamp_millis();
        if now >= expires_at {
            return Err(UseCaseError::DateInPast);
        }

        let request = WaitlistRequest {
            id: Default::default(),
            user_id: self.user_id.clone(),
            venue_id: self.venue_id.clone(),
            service_id: self.service_id.clone(),
            preferred_date,
            preferred_band: self.preferred_band,
            status: WaitlistStatus::Pending,
            expires_at,
            created: now,
            updated: now,
        };
        ctx.repos
            .waitlist_requests
            .insert(&request)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(request)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::booking::test_helpers::{salon_venue, DummySys};
    use std::sync::Arc;
    use velora_booking_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn joins_waitlist_with_end_of_day_expiry() {
        let mut ctx = setup_context().await;
        ctx.sys = Arc::new(DummySys { now: 0 });
        let venue = salon_venue(&ctx).await;

        let mut usecase = JoinWaitlistUseCase {
            user_id: "user-1".into(),
            venue_id: venue.id.clone(),
            service_id: venue.services[0].id.clone(),
            preferred_date: "2030-5-6".into(),
            preferred_band: TimeBand::Morning,
        };
        let request = usecase.execute(&ctx).await.unwrap();

        assert_eq!(request.status, WaitlistStatus::Pending);
        let monday = "2030-5-6".parse::<Day>().unwrap();
        assert_eq!(request.expires_at, venue.end_of_day(&monday).unwrap());

        let stored = ctx
            .repos
            .waitlist_requests
            .find(&request.id)
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_past_dates_and_unknown_services() {
        let mut ctx = setup_context().await;
        let venue = salon_venue(&ctx).await;
        let monday = "2030-5-6".parse::<Day>().unwrap();
        ctx.sys = Arc::new(DummySys {
            now: venue.end_of_day(&monday).unwrap(),
        });

        let mut usecase = JoinWaitlistUseCase {
            user_id: "user-1".into(),
            venue_id: venue.id.clone(),
            service_id: venue.services[0].id.clone(),
            preferred_date: "2030-5-6".into(),
            preferred_band: TimeBand::Any,
        };
        assert_eq!(usecase.execute(&ctx).await, Err(UseCaseError::DateInPast));

        let mut usecase = JoinWaitlistUseCase {
            user_id: "user-1".into(),
            venue_id: venue.id.clone(),
            service_id: Default::default(),
            preferred_date: "2030-5-6".into(),
            preferred_band: TimeBand::Any,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::ServiceNotFound(_))
        ));
    }
}
