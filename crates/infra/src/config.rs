use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How many days ahead the next-available-date scan is allowed to look
    /// before giving up. Keeps the forward scan bounded.
    pub availability_horizon_days: u32,
    /// How often the background job re-checks pending waitlist requests
    /// for openings.
    pub waitlist_scan_interval_secs: u64,
    /// Webhook that receives waitlist opening notifications. Notifications
    /// are disabled when unset.
    pub waitlist_webhook_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let default_horizon = 60;
        let availability_horizon_days = match std::env::var("AVAILABILITY_HORIZON_DAYS") {
            Ok(horizon) => match horizon.parse::<u32>() {
                Ok(horizon) if horizon > 0 => horizon,
                _ => {
                    warn!(
                        "The given AVAILABILITY_HORIZON_DAYS: {} is not valid, falling back to the default horizon: {} days.",
                        horizon, default_horizon
                    );
                    default_horizon
                }
            },
            Err(_) => default_horizon,
        };

        let default_scan_interval = 60 * 5;
        let waitlist_scan_interval_secs = match std::env::var("WAITLIST_SCAN_INTERVAL_SECS") {
            Ok(interval) => match interval.parse::<u64>() {
                Ok(interval) if interval > 0 => interval,
                _ => {
                    warn!(
                        "The given WAITLIST_SCAN_INTERVAL_SECS: {} is not valid, falling back to the default interval: {} seconds.",
                        interval, default_scan_interval
                    );
                    default_scan_interval
                }
            },
            Err(_) => default_scan_interval,
        };

        let waitlist_webhook_url = match std::env::var("WAITLIST_WEBHOOK_URL") {
            Ok(url) => match url::Url::parse(&url) {
                Ok(parsed_url) => {
                    let allowed_schemes = ["https", "http"];
                    if allowed_schemes.contains(&parsed_url.scheme()) {
                        info!("Waitlist opening notifications will be sent to: {}", url);
                        Some(url)
                    } else {
                        warn!(
                            "The given WAITLIST_WEBHOOK_URL: {} does not use a http(s) scheme, notifications are disabled.",
                            url
                        );
                        None
                    }
                }
                Err(_) => {
                    warn!(
                        "The given WAITLIST_WEBHOOK_URL: {} is not a valid url, notifications are disabled.",
                        url
                    );
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            port,
            availability_horizon_days,
            waitlist_scan_interval_secs,
            waitlist_webhook_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
