mod appointment;
mod shared;
mod venue;
mod waitlist;

use appointment::{IAppointmentRepo, InMemoryAppointmentRepo, PostgresAppointmentRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use venue::{IVenueRepo, InMemoryVenueRepo, PostgresVenueRepo};
use waitlist::{IWaitlistRepo, InMemoryWaitlistRepo, PostgresWaitlistRepo};

pub use appointment::SlotWriteError;

#[derive(Clone)]
pub struct Repos {
    pub venues: Arc<dyn IVenueRepo>,
    pub appointments: Arc<dyn IAppointmentRepo>,
    pub waitlist_requests: Arc<dyn IWaitlistRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        sqlx::migrate!().run(&pool).await?;

        Ok(Self {
            venues: Arc::new(PostgresVenueRepo::new(pool.clone())),
            appointments: Arc::new(PostgresAppointmentRepo::new(pool.clone())),
            waitlist_requests: Arc::new(PostgresWaitlistRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            venues: Arc::new(InMemoryVenueRepo::new()),
            appointments: Arc::new(InMemoryAppointmentRepo::new()),
            waitlist_requests: Arc::new(InMemoryWaitlistRepo::new()),
        }
    }
}
