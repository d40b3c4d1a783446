use crate::calculations::pool_odds::is_valid_fee_bps;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 10000 bps = 100%
pub const BPS_DENOMINATOR: f64 = 10_000.0;

pub const DEFAULT_PLATFORM_FEE_BPS: f64 = 250.0;
pub const DEFAULT_CREATOR_FEE_BPS: f64 = 100.0;

pub const DEMO_PROVIDER: &str = "demo-wallet";
pub const CRYPTO_PROVIDER: &str = "crypto-base-usdc";
pub const FIAT_PROVIDER: &str = "fiat-paystack";

/// Pool snapshot plus a candidate stake on one option.
/// Field names match the JSON used by clients: totalPool, optionPool, stake, feeBps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PoolInput {
    pub total_pool: f64,          // Sum of stakes across every option
    pub option_pool: f64,         // Sum of stakes on the chosen option
    #[serde(default)]
    pub stake: f64,
    pub fee_bps: f64,             // Charged on the losing side only
}

impl PoolInput {
    pub fn new(total_pool: f64, option_pool: f64, stake: f64, fee_bps: f64) -> Self {
        Self {
            total_pool,
            option_pool,
            stake,
            fee_bps,
        }
    }

    /// Same snapshot with a different candidate stake.
    pub fn with_stake(self, stake: f64) -> Self {
        Self { stake, ..self }
    }
}

/// Decision-support figures for a stake that is about to be committed.
/// Derived on every call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutPreview {
    pub multiple_pre: Option<f64>,
    pub multiple_post: Option<f64>,
    pub expected_return: f64,
    pub profit: f64,
    pub distributable_pool: f64,
}

/// Fee split charged on losing stakes at settlement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeConfig {
    pub platform_fee_bps: f64,
    pub creator_fee_bps: f64,
}

impl FeeConfig {
    pub fn total_bps(&self) -> f64 {
        self.platform_fee_bps + self.creator_fee_bps
    }

    /// Both parts within 0..=10000 bps and together no more than the whole pool
    pub fn is_valid(&self) -> bool {
        is_valid_fee_bps(self.platform_fee_bps)
            && is_valid_fee_bps(self.creator_fee_bps)
            && self.total_bps() <= BPS_DENOMINATOR
    }
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            platform_fee_bps: DEFAULT_PLATFORM_FEE_BPS,
            creator_fee_bps: DEFAULT_CREATOR_FEE_BPS,
        }
    }
}

/// Funding channel of an entry. Each rail settles independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rail {
    Demo,
    Crypto,
    Fiat,
}

impl Rail {
    pub fn matches_provider(&self, provider: &str) -> bool {
        match self {
            Rail::Demo => provider == DEMO_PROVIDER,
            Rail::Crypto => matches!(provider, CRYPTO_PROVIDER | "base-usdc" | "crypto"),
            Rail::Fiat => provider == FIAT_PROVIDER,
        }
    }
}

/// A single stake on one option of a market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub user_id: String,
    pub option_id: String,
    pub amount: f64,
    #[serde(default)]
    pub provider: Option<String>,
}

impl Entry {
    pub fn new(user_id: &str, option_id: &str, amount: f64, provider: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            option_id: option_id.to_string(),
            amount,
            provider: Some(provider.to_string()),
        }
    }

    pub fn provider(&self) -> &str {
        self.provider.as_deref().unwrap_or_default()
    }
}

/// Totals, fees and per-user payouts for one rail of a resolved market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResult {
    pub rail: Rail,
    pub total_pot: f64,
    pub winners_stake_total: f64,
    pub losers_stake_total: f64,
    pub platform_fee: f64,
    pub creator_fee: f64,
    /// Winners' stakes plus the losing side after fees
    pub distributable_pot: f64,
    /// Winners only; losers are absent
    pub payouts_by_user_id: BTreeMap<String, f64>,
    pub winner_stakes_by_user_id: BTreeMap<String, f64>,
}

impl SettlementResult {
    pub fn empty(rail: Rail) -> Self {
        Self {
            rail,
            total_pot: 0.0,
            winners_stake_total: 0.0,
            losers_stake_total: 0.0,
            platform_fee: 0.0,
            creator_fee: 0.0,
            distributable_pot: 0.0,
            payouts_by_user_id: BTreeMap::new(),
            winner_stakes_by_user_id: BTreeMap::new(),
        }
    }

    pub fn total_payouts(&self) -> f64 {
        self.payouts_by_user_id.values().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StakeMode {
    Demo,
    Real,
}

impl StakeMode {
    /// REAL only counts on-chain USDC entries, DEMO counts everything else
    pub fn includes_provider(&self, provider: Option<&str>) -> bool {
        match self {
            StakeMode::Real => provider == Some(CRYPTO_PROVIDER),
            StakeMode::Demo => provider != Some(CRYPTO_PROVIDER),
        }
    }
}

/// Pool snapshot and user position used to build a stake quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSnapshot {
    pub market_id: String,
    pub outcome_id: String,
    pub amount: f64,
    #[serde(default)]
    pub pricing_model: Option<String>,
    pub total_pool: f64,
    pub option_pool: f64,
    #[serde(default)]
    pub existing_position_stake: f64,
    pub fee_bps: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSide {
    pub user_stake: f64,
    pub odds_or_price: Option<f64>,
    pub est_payout: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeQuote {
    pub market_id: String,
    pub outcome_id: String,
    pub amount: f64,
    pub pricing_model: String,
    pub current: QuoteSide,
    pub after: QuoteSide,
    pub disclaimer: String,
}

/// A user's standing on a market, as far as a new quote is concerned
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExistingPosition {
    pub same_outcome_entry: Option<Entry>,
    pub same_outcome_stake: f64,
    pub other_outcome_entry: Option<Entry>,
}
