use super::IVenueRepo;
use crate::repos::shared::inmemory_repo::*;
use velora_booking_domain::{Venue, ID};

pub struct InMemoryVenueRepo {
    venues: std::sync::Mutex<Vec<Venue>>,
}

impl InMemoryVenueRepo {
    pub fn new() -> Self {
        Self {
            venues: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IVenueRepo for InMemoryVenueRepo {
    async fn insert(&self, venue: &Venue) -> anyhow::Result<()> {
        insert(venue, &self.venues);
        Ok(())
    }

    async fn find(&self, venue_id: &ID) -> anyhow::Result<Option<Venue>> {
        Ok(find(venue_id, &self.venues))
    }
}
