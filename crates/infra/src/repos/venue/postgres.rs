use super::IVenueRepo;
use serde_json::Value;
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;
use velora_booking_domain::{Venue, ID};

pub struct PostgresVenueRepo {
    pool: PgPool,
}

impl PostgresVenueRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct VenueRaw {
    venue_uid: Uuid,
    name: String,
    timezone: String,
    opening_hours: Value,
    services: Value,
    employees: Value,
}

impl From<VenueRaw> for Venue {
    fn from(e: VenueRaw) -> Self {
        Self {
            id: e.venue_uid.into(),
            name: e.name,
            timezone: e.timezone.parse().unwrap_or(chrono_tz::UTC),
            opening_hours: serde_json::from_value(e.opening_hours).unwrap_or_default(),
            services: serde_json::from_value(e.services).unwrap_or_default(),
            employees: serde_json::from_value(e.employees).unwrap_or_default(),
        }
    }
}

#[async_trait::async_trait]
impl IVenueRepo for PostgresVenueRepo {
    async fn insert(&self, venue: &Venue) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO venues(venue_uid, name, timezone, opening_hours, services, employees)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(venue.id.inner_ref())
        .bind(&venue.name)
        .bind(venue.timezone.to_string())
        .bind(Json(&venue.opening_hours))
        .bind(Json(&venue.services))
        .bind(Json(&venue.employees))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert venue: {:?}. DB returned error: {:?}",
                venue, e
            );
            e
        })?;

        Ok(())
    }

    async fn find(&self, venue_id: &ID) -> anyhow::Result<Option<Venue>> {
        let venue: Option<VenueRaw> = sqlx::query_as(
            r#"
            SELECT * FROM venues AS v
            WHERE v.venue_uid = $1
            "#,
        )
        .bind(venue_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find venue with id: {:?} failed. DB returned error: {:?}",
                venue_id, e
            );
            e
        })?;

        Ok(venue.map(|v| v.into()))
    }
}
