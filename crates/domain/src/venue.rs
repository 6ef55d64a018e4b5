use crate::{
    date::Day,
    shared::entity::{Entity, ID},
    timespan::TimeSpan,
};
use chrono::prelude::*;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A wall clock time at a venue.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Time {
    pub hours: u32,
    pub minutes: u32,
}

impl Time {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    pub fn is_valid(&self) -> bool {
        self.hours <= 23 && self.minutes <= 59
    }

    /// Resolves this wall clock time on the given day to a UTC timestamp in
    /// milliseconds. Returns `None` when the local time does not exist on
    /// that day (DST gap).
    pub fn to_timestamp_millis(&self, day: &Day, tzid: &Tz) -> Option<i64> {
        tzid.with_ymd_and_hms(day.year, day.month, day.day, self.hours, self.minutes, 0)
            .earliest()
            .map(|date| date.timestamp_millis())
    }
}

impl std::cmp::PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match self.hours.cmp(&other.hours) {
            std::cmp::Ordering::Less => return Some(std::cmp::Ordering::Less),
            std::cmp::Ordering::Greater => return Some(std::cmp::Ordering::Greater),
            _ => (),
        };

        Some(self.minutes.cmp(&other.minutes))
    }
}

/// The open interval for one day of the week. A weekday without a rule is
/// a closed day.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OpeningHoursRule {
    pub weekday: Weekday,
    pub open: Time,
    pub close: Time,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct OpeningHours {
    pub rules: Vec<OpeningHoursRule>,
}

impl OpeningHours {
    pub fn interval_for(&self, weekday: Weekday) -> Option<&OpeningHoursRule> {
        self.rules.iter().find(|r| r.weekday == weekday)
    }

    /// Drops malformed rules and keeps at most one rule per weekday.
    pub fn parse_rules(&mut self) {
        self.rules
            .retain(|r| r.open.is_valid() && r.close.is_valid() && r.open < r.close);
        let mut seen = Vec::with_capacity(7);
        self.rules.retain(|r| {
            if seen.contains(&r.weekday) {
                return false;
            }
            seen.push(r.weekday);
            true
        });
        self.rules
            .sort_by_key(|r| r.weekday.num_days_from_monday());
    }
}

/// A bookable treatment offered by a `Venue`. Duration decides the slot
/// grid granularity, price is captured onto appointments at booking time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VenueService {
    pub id: ID,
    pub name: String,
    pub duration_minutes: i64,
    pub price: f64,
}

impl VenueService {
    pub fn duration_millis(&self) -> i64 {
        self.duration_minutes * 60 * 1000
    }
}

/// A staff member that can perform some of the venue services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: ID,
    pub name: String,
    pub service_ids: Vec<ID>,
}

impl Employee {
    pub fn offers(&self, service_id: &ID) -> bool {
        self.service_ids.contains(service_id)
    }
}

#[derive(Debug, Clone)]
pub struct Venue {
    pub id: ID,
    pub name: String,
    pub timezone: Tz,
    pub opening_hours: OpeningHours,
    pub services: Vec<VenueService>,
    pub employees: Vec<Employee>,
}

impl Venue {
    pub fn new(name: &str, timezone: &Tz) -> Self {
        Self {
            id: Default::default(),
            name: name.to_string(),
            timezone: timezone.to_owned(),
            opening_hours: Default::default(),
            services: Default::default(),
            employees: Default::default(),
        }
    }

    pub fn set_timezone(&mut self, timezone: &str) -> bool {
        match timezone.parse::<Tz>() {
            Ok(tzid) => {
                self.timezone = tzid;
                true
            }
            Err(_) => false,
        }
    }

    pub fn find_service(&self, service_id: &ID) -> Option<&VenueService> {
        self.services.iter().find(|s| s.id == *service_id)
    }

    pub fn find_employee(&self, employee_id: &ID) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == *employee_id)
    }

    pub fn employees_for_service(&self, service_id: &ID) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|e| e.offers(service_id))
            .collect()
    }

    /// The UTC window this venue is open on the given day, or `None` when
    /// the venue is closed that day.
    pub fn open_window(&self, day: &Day) -> Option<TimeSpan> {
        let weekday = day.weekday()?;
        let rule = self.opening_hours.interval_for(weekday)?;
        let start = rule.open.to_timestamp_millis(day, &self.timezone)?;
        let end = rule.close.to_timestamp_millis(day, &self.timezone)?;
        if start < end {
            Some(TimeSpan::new(start, end))
        } else {
            None
        }
    }

    /// First instant after the given day at this venue.
    pub fn end_of_day(&self, day: &Day) -> Option<i64> {
        let mut next = day.clone();
        next.inc();
        let midnight = Time::new(0, 0);
        midnight
            .to_timestamp_millis(&next, &self.timezone)
            .or_else(|| midnight.to_timestamp_millis(&next, &chrono_tz::UTC))
    }
}

impl Entity for Venue {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn week_rules(open: Time, close: Time) -> Vec<OpeningHoursRule> {
        vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ]
        .into_iter()
        .map(|weekday| OpeningHoursRule {
            weekday,
            open: open.clone(),
            close: close.clone(),
        })
        .collect()
    }

    #[test]
    fn it_computes_open_window_for_open_day() {
        let mut venue = Venue::new("Hair by Holm", &chrono_tz::UTC);
        venue.opening_hours.rules = week_rules(Time::new(9, 0), Time::new(18, 0));

        // 2030-05-06 is a Monday
        let day = "2030-5-6".parse::<Day>().unwrap();
        let window = venue.open_window(&day).unwrap();
        let expected_start = Utc
            .with_ymd_and_hms(2030, 5, 6, 9, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(window.start(), expected_start);
        assert_eq!(window.duration(), 9 * 60 * 60 * 1000);
    }

    #[test]
    fn it_is_closed_on_days_without_rule() {
        let mut venue = Venue::new("Hair by Holm", &chrono_tz::UTC);
        venue.opening_hours.rules = week_rules(Time::new(9, 0), Time::new(18, 0));

        // 2030-05-05 is a Sunday
        let day = "2030-5-5".parse::<Day>().unwrap();
        assert!(venue.open_window(&day).is_none());
    }

    #[test]
    fn it_resolves_window_in_venue_timezone() {
        let mut venue = Venue::new("Salong Nord", &chrono_tz::Europe::Oslo);
        venue.opening_hours.rules = week_rules(Time::new(9, 0), Time::new(18, 0));

        // CEST on this date, so 09:00 local is 07:00 UTC
        let day = "2030-5-6".parse::<Day>().unwrap();
        let window = venue.open_window(&day).unwrap();
        let expected_start = Utc
            .with_ymd_and_hms(2030, 5, 6, 7, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(window.start(), expected_start);
    }

    #[test]
    fn it_drops_malformed_opening_hours_rules() {
        let mut hours = OpeningHours {
            rules: vec![
                OpeningHoursRule {
                    weekday: Weekday::Mon,
                    open: Time::new(12, 0),
                    close: Time::new(9, 0),
                },
                OpeningHoursRule {
                    weekday: Weekday::Tue,
                    open: Time::new(9, 0),
                    close: Time::new(18, 0),
                },
                OpeningHoursRule {
                    weekday: Weekday::Tue,
                    open: Time::new(10, 0),
                    close: Time::new(16, 0),
                },
                OpeningHoursRule {
                    weekday: Weekday::Mon,
                    open: Time::new(26, 0),
                    close: Time::new(27, 0),
                },
            ],
        };
        hours.parse_rules();
        assert_eq!(hours.rules.len(), 1);
        assert_eq!(hours.rules[0].weekday, Weekday::Tue);
        assert_eq!(hours.rules[0].open, Time::new(9, 0));
    }

    #[test]
    fn it_validates_timezone_updates() {
        let mut venue = Venue::new("Hair by Holm", &chrono_tz::UTC);
        assert!(venue.set_timezone("Europe/Oslo"));
        assert_eq!(venue.timezone, chrono_tz::Europe::Oslo);
        assert!(!venue.set_timezone("Europe/Atlantis"));
        assert_eq!(venue.timezone, chrono_tz::Europe::Oslo);
    }

    #[test]
    fn it_finds_employees_for_service() {
        let mut venue = Venue::new("Hair by Holm", &chrono_tz::UTC);
        let cut = VenueService {
            id: Default::default(),
            name: "Haircut".into(),
            duration_minutes: 60,
            price: 450.0,
        };
        let color = VenueService {
            id: Default::default(),
            name: "Coloring".into(),
            duration_minutes: 120,
            price: 1200.0,
        };
        venue.employees = vec![
            Employee {
                id: Default::default(),
                name: "Maja".into(),
                service_ids: vec![cut.id.clone(), color.id.clone()],
            },
            Employee {
                id: Default::default(),
                name: "Jonas".into(),
                service_ids: vec![cut.id.clone()],
            },
        ];
        venue.services = vec![cut.clone(), color.clone()];

        assert_eq!(venue.employees_for_service(&cut.id).len(), 2);
        assert_eq!(venue.employees_for_service(&color.id).len(), 1);
        assert_eq!(venue.employees_for_service(&ID::new()).len(), 0);
    }
}
