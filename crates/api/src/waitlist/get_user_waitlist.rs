use crate::error::VeloraError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use velora_booking_api_structs::get_user_waitlist::*;
use velora_booking_domain::WaitlistRequest;
use velora_booking_infra::VeloraContext;

pub async fn get_user_waitlist_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<VeloraContext>,
) -> Result<HttpResponse, VeloraError> {
    let usecase = GetUserWaitlistUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.requests, res.now)))
        .map_err(VeloraError::from)
}

#[derive(Debug)]
pub struct GetUserWaitlistUseCase {
    pub user_id: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub requests: Vec<WaitlistRequest>,
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
impl UseCase for GetUserWaitlistUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserWaitlist";

    async fn execute(&mut self, ctx: &VeloraContext) -> Result<Self::Response, Self::Error> {
        let mut requests = ctx
            .repos
            .waitlist_requests
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        requests.sort_by_key(|r| std::cmp::Reverse(r.created));

        let now = ctx.sys.get_timestamp_millis();
        Ok(UseCaseRes { requests, now })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::booking::test_helpers::{salon_venue, DummySys};
    use crate::waitlist::join_waitlist::JoinWaitlistUseCase;
    use std::sync::Arc;
    use velora_booking_domain::{TimeBand, WaitlistStatus};
    use velora_booking_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn lists_own_requests_with_derived_status() {
        let mut ctx = setup_context().await;
        ctx.sys = Arc::new(DummySys { now: 0 });
        let venue = salon_venue(&ctx).await;

        let join = |user_id: &str, date: &str| JoinWaitlistUseCase {
            user_id: user_id.into(),
            venue_id: venue.id.clone(),
            service_id: venue.services[0].id.clone(),
            preferred_date: date.into(),
            preferred_band: TimeBand::Any,
        };
        let first = join("user-1", "2030-5-6").execute(&ctx).await.unwrap();
        join("user-2", "2030-5-6").execute(&ctx).await.unwrap();

        // past the preferred date the request reads expired
        ctx.sys = Arc::new(DummySys {
            now: first.expires_at,
        });
        let mut usecase = GetUserWaitlistUseCase {
            user_id: "user-1".into(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.requests.len(), 1);
        assert_eq!(res.requests[0].id, first.id);
        assert_eq!(res.requests[0].status_at(res.now), WaitlistStatus::Expired);
    }
}
