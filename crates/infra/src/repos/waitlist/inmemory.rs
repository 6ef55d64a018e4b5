use super::IWaitlistRepo;
use crate::repos::shared::inmemory_repo::*;
use velora_booking_domain::{WaitlistRequest, ID};

pub struct InMemoryWaitlistRepo {
    requests: std::sync::Mutex<Vec<WaitlistRequest>>,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self {
            requests: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IWaitlistRepo for InMemoryWaitlistRepo {
    async fn insert(&self, request: &WaitlistRequest) -> anyhow::Result<()> {
        insert(request, &self.requests);
        Ok(())
    }

    async fn save(&self, request: &WaitlistRequest) -> anyhow::Result<()> {
        save(request, &self.requests);
        Ok(())
    }

    async fn find(&self, request_id: &ID) -> anyhow::Result<Option<WaitlistRequest>> {
        Ok(find(request_id, &self.requests))
    }

    async fn find_by_user(&self, user_id: &str) -> anyhow::Result<Vec<WaitlistRequest>> {
        Ok(find_by(&self.requests, |r| r.user_id == user_id))
    }

    async fn find_pending(&self, now: i64) -> anyhow::Result<Vec<WaitlistRequest>> {
        Ok(find_by(&self.requests, |r| r.is_pending(now)))
    }
}
