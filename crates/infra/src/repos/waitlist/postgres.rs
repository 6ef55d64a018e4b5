use super::IWaitlistRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use velora_booking_domain::{TimeBand, WaitlistRequest, WaitlistStatus, ID};

pub struct PostgresWaitlistRepo {
    pool: PgPool,
}

impl PostgresWaitlistRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn band_str(band: &TimeBand) -> &'static str {
    match band {
        TimeBand::Any => "any",
        TimeBand::Morning => "morning",
        TimeBand::Afternoon => "afternoon",
        TimeBand::Evening => "evening",
    }
}

fn status_str(status: &WaitlistStatus) -> &'static str {
    match status {
        WaitlistStatus::Fulfilled => "fulfilled",
        WaitlistStatus::Cancelled => "cancelled",
        // expired is always derived, never stored
        _ => "pending",
    }
}

#[derive(Debug, FromRow)]
struct WaitlistRequestRaw {
    request_uid: Uuid,
    user_id: String,
    venue_uid: Uuid,
    service_uid: Uuid,
    preferred_date: String,
    preferred_band: String,
    status: String,
    expires_at: i64,
    created: i64,
    updated: i64,
}

impl From<WaitlistRequestRaw> for WaitlistRequest {
    fn from(e: WaitlistRequestRaw) -> Self {
        Self {
            id: e.request_uid.into(),
            user_id: e.user_id,
            venue_id: e.venue_uid.into(),
            service_id: e.service_uid.into(),
            // the column only ever holds dates that passed domain
            // validation on the way in
            preferred_date: e.preferred_date.parse().unwrap_or(
                velora_booking_domain::Day {
                    year: 1970,
                    month: 1,
                    day: 1,
                },
            ),
            preferred_band: match e.preferred_band.as_str() {
                "morning" => TimeBand::Morning,
                "afternoon" => TimeBand::Afternoon,
                "evening" => TimeBand::Evening,
                _ => TimeBand::Any,
            },
            status: match e.status.as_str() {
                "fulfilled" => WaitlistStatus::Fulfilled,
                "cancelled" => WaitlistStatus::Cancelled,
                _ => WaitlistStatus::Pending,
            },
            expires_at: e.expires_at,
            created: e.created,
            updated: e.updated,
        }
    }
}

#[async_trait::async_trait]
impl IWaitlistRepo for PostgresWaitlistRepo {
    async fn insert(&self, request: &WaitlistRequest) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO waitlist_requests(
                request_uid,
                user_id,
                venue_uid,
                service_uid,
                preferred_date,
                preferred_band,
                status,
                expires_at,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(request.id.inner_ref())
        .bind(&request.user_id)
        .bind(request.venue_id.inner_ref())
        .bind(request.service_id.inner_ref())
        .bind(request.preferred_date.to_string())
        .bind(band_str(&request.preferred_band))
        .bind(status_str(&request.status))
        .bind(request.expires_at)
        .bind(request.created)
        .bind(request.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert waitlist request: {:?}. DB returned error: {:?}",
                request, e
            );
            e
        })?;

        Ok(())
    }

    async fn save(&self, request: &WaitlistRequest) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE waitlist_requests SET
                status = $2,
                updated = $3
            WHERE request_uid = $1
            "#,
        )
        .bind(request.id.inner_ref())
        .bind(status_str(&request.status))
        .bind(request.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save waitlist request: {:?}. DB returned error: {:?}",
                request, e
            );
            e
        })?;

        Ok(())
    }

    async fn find(&self, request_id: &ID) -> anyhow::Result<Option<WaitlistRequest>> {
        let request: Option<WaitlistRequestRaw> = sqlx::query_as(
            r#"
            SELECT * FROM waitlist_requests AS w
            WHERE w.request_uid = $1
            "#,
        )
        .bind(request_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find waitlist request with id: {:?} failed. DB returned error: {:?}",
                request_id, e
            );
            e
        })?;

        Ok(request.map(|r| r.into()))
    }

    async fn find_by_user(&self, user_id: &str) -> anyhow::Result<Vec<WaitlistRequest>> {
        let requests: Vec<WaitlistRequestRaw> = sqlx::query_as(
            r#"
            SELECT * FROM waitlist_requests AS w
            WHERE w.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find waitlist requests for user: {} failed. DB returned error: {:?}",
                user_id, e
            );
            e
        })?;

        Ok(requests.into_iter().map(|r| r.into()).collect())
    }

    async fn find_pending(&self, now: i64) -> anyhow::Result<Vec<WaitlistRequest>> {
        let requests: Vec<WaitlistRequestRaw> = sqlx::query_as(
            r#"
            SELECT * FROM waitlist_requests AS w
            WHERE w.status = 'pending'
                AND w.expires_at > $1
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find pending waitlist requests failed. DB returned error: {:?}",
                e
            );
            e
        })?;

        Ok(requests.into_iter().map(|r| r.into()).collect())
    }
}
