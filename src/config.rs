//! Planner configuration.
//!
//! Compiled-in defaults, each overridable from a `SUBNET_PLANNER_*`
//! environment variable (`main` loads `.env` through dotenv first).

use crate::models::{address_to_integer, lo_mask};
use chrono_tz::Tz;
use std::error::Error;
use std::net::Ipv4Addr;

/// Longest prefix the equal-size divider may produce.
pub const MAX_SUBNET_PREFIX: u8 = 30;
/// Prefix of every router-to-router serial link.
pub const SERIAL_LINK_PREFIX: u8 = 30;

pub const DEFAULT_SERIAL_POOL: Ipv4Addr = Ipv4Addr::new(10, 10, 10, 0);
pub const DEFAULT_CLOCK_RATE: u32 = 64_000;
pub const DEFAULT_LAN_INTERFACE: &str = "gig0/0";
pub const DEFAULT_SERIAL_INTERFACE_PREFIX: &str = "serial0/0/";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::UTC;
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
/// Upper bound on the equal-size subnet count of one request.
pub const DEFAULT_MAX_SUBNET_COUNT: u32 = 65_536;

pub const ENV_SERIAL_POOL: &str = "SUBNET_PLANNER_SERIAL_POOL";
pub const ENV_CLOCK_RATE: &str = "SUBNET_PLANNER_CLOCK_RATE";
pub const ENV_LAN_INTERFACE: &str = "SUBNET_PLANNER_LAN_INTERFACE";
pub const ENV_SERIAL_INTERFACE_PREFIX: &str = "SUBNET_PLANNER_SERIAL_INTERFACE_PREFIX";
pub const ENV_TIMEZONE: &str = "SUBNET_PLANNER_TZ";
pub const ENV_MAX_SUBNET_COUNT: &str = "SUBNET_PLANNER_MAX_SUBNETS";
pub const ENV_LOG_CONFIG: &str = "SUBNET_PLANNER_LOG_CONFIG";

/// Settings shared by the planner and the renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// First address of the /30 serial link pool.
    pub serial_pool: Ipv4Addr,
    /// `clock rate` written on the DCE side of each serial link.
    pub clock_rate: u32,
    pub lan_interface: String,
    /// Serial interface name without the trailing port number.
    pub serial_interface_prefix: String,
    /// Timezone used to date saved reports.
    pub timezone: Tz,
    /// Requests asking for more equal-size subnets are rejected.
    pub max_subnet_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            serial_pool: DEFAULT_SERIAL_POOL,
            clock_rate: DEFAULT_CLOCK_RATE,
            lan_interface: DEFAULT_LAN_INTERFACE.to_string(),
            serial_interface_prefix: DEFAULT_SERIAL_INTERFACE_PREFIX.to_string(),
            timezone: DEFAULT_TIMEZONE,
            max_subnet_count: DEFAULT_MAX_SUBNET_COUNT,
        }
    }
}

impl Settings {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Settings, Box<dyn Error>> {
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Settings, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(pool) = lookup(ENV_SERIAL_POOL) {
            let pool = Ipv4Addr::from(
                address_to_integer(&pool).map_err(|e| format!("{ENV_SERIAL_POOL}: {e}"))?,
            );
            if lo_mask(pool) > SERIAL_LINK_PREFIX {
                return Err(format!(
                    "{ENV_SERIAL_POOL}: {pool} is not aligned to a /{SERIAL_LINK_PREFIX} boundary"
                )
                .into());
            }
            settings.serial_pool = pool;
        }
        if let Some(rate) = lookup(ENV_CLOCK_RATE) {
            settings.clock_rate = rate
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_CLOCK_RATE}: invalid clock rate '{rate}': {e}"))?;
        }
        if let Some(name) = lookup(ENV_LAN_INTERFACE) {
            settings.lan_interface = name.trim().to_string();
        }
        if let Some(prefix) = lookup(ENV_SERIAL_INTERFACE_PREFIX) {
            settings.serial_interface_prefix = prefix.trim().to_string();
        }
        if let Some(tz) = lookup(ENV_TIMEZONE) {
            settings.timezone = tz
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_TIMEZONE}: unknown timezone '{tz}': {e}"))?;
        }
        if let Some(max) = lookup(ENV_MAX_SUBNET_COUNT) {
            settings.max_subnet_count = max
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_MAX_SUBNET_COUNT}: invalid subnet count '{max}': {e}"))?;
        }

        log::debug!("settings: {:?}", settings);
        Ok(settings)
    }
}

/// Path of the log4rs configuration file.
pub fn log_config_path() -> String {
    std::env::var(ENV_LOG_CONFIG).unwrap_or_else(|_| DEFAULT_LOG_CONFIG.to_string())
}
