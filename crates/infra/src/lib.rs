mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
use repos::Repos;
pub use repos::SlotWriteError;
pub use services::WaitlistWebhookNotifier;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct VeloraContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl VeloraContext {
    async fn create_postgres(connection_string: &str) -> Self {
        let repos = Repos::create_postgres(connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment. With a
/// `DATABASE_URL` present the repositories are backed by postgres,
/// otherwise everything lives in memory, which is what tests and local
/// development run against.
pub async fn setup_context() -> VeloraContext {
    match get_psql_connection_string() {
        Some(connection_string) => VeloraContext::create_postgres(&connection_string).await,
        None => {
            info!("DATABASE_URL not set, using the in-memory store.");
            VeloraContext::create_inmemory()
        }
    }
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING).ok()
}
