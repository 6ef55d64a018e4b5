mod inmemory;
mod postgres;

pub use inmemory::InMemoryVenueRepo;
pub use postgres::PostgresVenueRepo;
use velora_booking_domain::{Venue, ID};

/// The venue/service/employee catalog lookup. The scheduling engine only
/// ever reads it; `insert` exists so a deployment can load its catalog.
#[async_trait::async_trait]
pub trait IVenueRepo: Send + Sync {
    async fn insert(&self, venue: &Venue) -> anyhow::Result<()>;
    async fn find(&self, venue_id: &ID) -> anyhow::Result<Option<Venue>>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use chrono::Weekday;
    use velora_booking_domain::{Employee, OpeningHoursRule, Time, Venue, VenueService};

    #[tokio::test]
    async fn test_venue_catalog_crud() {
        let ctx = setup_context().await;

        let mut venue = Venue::new("Hair by Holm", &chrono_tz::Europe::Oslo);
        venue.opening_hours.rules = vec![OpeningHoursRule {
            weekday: Weekday::Mon,
            open: Time::new(9, 0),
            close: Time::new(18, 0),
        }];
        let service = VenueService {
            id: Default::default(),
            name: "Haircut".into(),
            duration_minutes: 60,
            price: 450.0,
        };
        venue.employees = vec![Employee {
            id: Default::default(),
            name: "Maja".into(),
            service_ids: vec![service.id.clone()],
        }];
        venue.services = vec![service];

        ctx.repos
            .venues
            .insert(&venue)
            .await
            .expect("To insert venue");

        let found = ctx
            .repos
            .venues
            .find(&venue.id)
            .await
            .expect("To query venue")
            .expect("Venue to exist");
        assert_eq!(found.id, venue.id);
        assert_eq!(found.name, venue.name);
        assert_eq!(found.timezone, venue.timezone);
        assert_eq!(found.opening_hours, venue.opening_hours);
        assert_eq!(found.services, venue.services);
        assert_eq!(found.employees, venue.employees);

        let missing = ctx
            .repos
            .venues
            .find(&Default::default())
            .await
            .expect("To query venue");
        assert!(missing.is_none());
    }
}
