use pool_math::FeeConfig;
use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub default_fees: FeeConfig,
    pub ws_ping_secs: u64,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid {} '{}', using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

/// Fees that could not be charged fall back to the defaults
fn fees_or_default(fees: FeeConfig) -> FeeConfig {
    if fees.is_valid() {
        fees
    } else {
        warn!(
            "Invalid fee config (platform {} bps, creator {} bps), using defaults",
            fees.platform_fee_bps, fees.creator_fee_bps
        );
        FeeConfig::default()
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = FeeConfig::default();

        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", 8081),
            default_fees: fees_or_default(FeeConfig {
                platform_fee_bps: env_or("PLATFORM_FEE_BPS", defaults.platform_fee_bps),
                creator_fee_bps: env_or("CREATOR_FEE_BPS", defaults.creator_fee_bps),
            }),
            ws_ping_secs: env_or("WS_PING_SECS", 30),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8081,
            default_fees: FeeConfig::default(),
            ws_ping_secs: 30,
        }
    }
}
