use dotenvy::dotenv;
use std::env;

use crate::model::geofence::{Direction, GeofenceConfig};
use crate::model::location::Location;
use crate::rules::leave::LeaveRuleConfig;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_validate_per_min: u32,

    // Geo-fencing, per attendance direction
    pub enable_geofence: bool,
    pub enable_geofence_day_out: bool,
    pub geofence: GeofenceConfig,

    pub leave_rules: LeaveRuleConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let reference = match (opt_f64("COMPANY_LATITUDE"), opt_f64("COMPANY_LONGITUDE")) {
            (Some(latitude), Some(longitude)) => Location::new(latitude, longitude),
            _ => None,
        };

        let defaults = LeaveRuleConfig::default();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),

            rate_validate_per_min: env::var("RATE_VALIDATE_PER_MIN")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .unwrap(),

            enable_geofence: flag("ENABLE_GEOFENCE"),
            enable_geofence_day_out: flag("ENABLE_GEOFENCE_DAY_OUT"),
            geofence: GeofenceConfig {
                reference,
                allowed_radius_meters: env::var("ALLOWED_DISTANCE_M")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .unwrap(),
            },

            leave_rules: LeaveRuleConfig {
                quota_leave_type: env::var("EARNED_LEAVE_TYPE")
                    .unwrap_or(defaults.quota_leave_type),
                sick_leave_type: env::var("SICK_LEAVE_TYPE").unwrap_or(defaults.sick_leave_type),
                monthly_cap_days: opt_f64("EARNED_LEAVE_MONTHLY_CAP")
                    .unwrap_or(defaults.monthly_cap_days),
                proximity_window_days: defaults.proximity_window_days,
                min_gap_working_days: defaults.min_gap_working_days,
            },
        }
    }

    /// Whether geofencing is enforced for the given attendance direction.
    pub fn geofence_enabled(&self, direction: Direction) -> bool {
        match direction {
            Direction::CheckIn => self.enable_geofence,
            Direction::CheckOut => self.enable_geofence_day_out,
        }
    }
}

fn flag(key: &str) -> bool {
    env::var(key)
        .map(|raw| raw == "1" || raw.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn opt_f64(key: &str) -> Option<f64> {
    env::var(key).ok().map(|raw| raw.parse().unwrap())
}
