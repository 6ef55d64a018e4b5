mod inmemory;
mod postgres;

pub use inmemory::InMemoryWaitlistRepo;
pub use postgres::PostgresWaitlistRepo;
use velora_booking_domain::{WaitlistRequest, ID};

/// Waitlist requests are append-and-update only. Fulfilled and cancelled
/// requests stay around as audit trail.
#[async_trait::async_trait]
pub trait IWaitlistRepo: Send + Sync {
    async fn insert(&self, request: &WaitlistRequest) -> anyhow::Result<()>;

    /// Persists status and updated. Everything else is immutable after
    /// insert.
    async fn save(&self, request: &WaitlistRequest) -> anyhow::Result<()>;

    async fn find(&self, request_id: &ID) -> anyhow::Result<Option<WaitlistRequest>>;

    async fn find_by_user(&self, user_id: &str) -> anyhow::Result<Vec<WaitlistRequest>>;

    /// Requests that are stored pending and not yet expired at `now`. The
    /// background opening scan works through these.
    async fn find_pending(&self, now: i64) -> anyhow::Result<Vec<WaitlistRequest>>;
}
