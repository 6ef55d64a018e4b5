use super::openings::openings_for_request;
use crate::booking::AvailabilityError;
use crate::error::VeloraError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::get_waitlist_openings::*;
use velora_booking_domain::{Day, TimeSlot, ID};
use velora_booking_infra::VeloraContext;

pub async fn get_waitlist_openings_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let usecase = GetWaitlistOpeningsUseCase {
        request_id: path_params.request_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.date.to_string(), res.slots)))
        .map_err(VeloraError::from)
}

#[derive(Debug)]
pub struct GetWaitlistOpeningsUseCase {
    pub request_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub date: Day,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    RequestNotPending,
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
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<AvailabilityError> for UseCaseError {
    fn from(e: AvailabilityError) -> Self {
        match e {
            // the venue or service vanished after the request was made
            AvailabilityError::VenueNotFound(_) | AvailabilityError::ServiceNotFound(_) => {
                Self::RequestNotPending
            }
            AvailabilityError::StorageError => Self::StorageError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetWaitlistOpeningsUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetWaitlistOpenings";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let request = ctx
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

        let slots = openings_for_request(&request, ctx).await?;

        Ok(UseCaseRes {
            date: request.preferred_date,
            slots,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::booking::test_helpers::{booked_appointment, salon_venue, DummySys, HOUR};
    use crate::waitlist::join_waitlist::JoinWaitlistUseCase;
    use std::sync::Arc;
    use velora_booking_domain::TimeBand;
    use velora_booking_infra::setup_context;

    async fn join(
        ctx: &VeloraContext,
        venue: &velora_booking_domain::Venue,
        band: TimeBand,
    ) -> velora_booking_domain::WaitlistRequest {
        JoinWaitlistUseCase {
            user_id: "user-1".into(),
            venue_id: venue.id.clone(),
            service_id: venue.services[0].id.clone(),
            preferred_date: "2030-5-6".into(),
            preferred_band: band,
        }
        .execute(ctx)
        .await
        .unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn reports_only_open_slots_inside_the_band() {
        let mut ctx = setup_context().await;
        ctx.sys = Arc::new(DummySys { now: 0 });
        let venue = salon_venue(&ctx).await;
        let service = venue.services[0].clone();

        // both employees do a haircut, block the 9:00 and 10:00 slots for
        // one of them only
        let day = "2030-5-6".parse::<Day>().unwrap();
        let opening = venue.open_window(&day).unwrap().start();
        for i in 0..2 {
            ctx.repos
                .appointments
                .book(&booked_appointment(
                    &venue,
                    &service,
                    &venue.employees[0],
                    opening + i * HOUR,
                ))
                .await
                .unwrap();
        }

        let request = join(&ctx, &venue, TimeBand::Morning).await;
        let mut usecase = GetWaitlistOpeningsUseCase {
            request_id: request.id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();

        // morning is 9:00-12:00, so three slots, all still open via Jonas
        assert_eq!(res.slots.len(), 3);
        assert!(res.slots.iter().all(|s| s.available));
        assert!(res.slots.iter().all(|s| s.start_ts < opening + 3 * HOUR));
    }

    #[actix_web::main]
    #[test]
    async fn expired_request_has_no_openings() {
        let mut ctx = setup_context().await;
        ctx.sys = Arc::new(DummySys { now: 0 });
        let venue = salon_venue(&ctx).await;
        let request = join(&ctx, &venue, TimeBand::Any).await;

        ctx.sys = Arc::new(DummySys {
            now: request.expires_at,
        });
        let mut usecase = GetWaitlistOpeningsUseCase {
            request_id: request.id.clone(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::RequestNotPending)
        ));
    }
}
