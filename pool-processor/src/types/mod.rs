use pool_math::{Entry, FeeConfig, PayoutPreview, PoolInput, Rail};
use serde::{Deserialize, Serialize};

/// Preview request. A missing feeBps means the configured fee, never zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub total_pool: f64,
    pub option_pool: f64,
    #[serde(default)]
    pub stake: f64,
    #[serde(default)]
    pub fee_bps: Option<f64>,
}

impl PreviewRequest {
    pub fn into_pool_input(self, default_fee_bps: f64) -> PoolInput {
        PoolInput::new(
            self.total_pool,
            self.option_pool,
            self.stake,
            self.fee_bps.unwrap_or(default_fee_bps),
        )
    }
}

/// Settlement request for one rail
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRequest {
    pub entries: Vec<Entry>,
    pub winning_option_id: String,
    /// Falls back to the configured fees when absent
    #[serde(default)]
    pub fee_config: Option<FeeConfig>,
    pub rail: Rail,
}

/// Quote request. feeBps is optional here, unlike the library snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub market_id: String,
    pub outcome_id: String,
    pub amount: f64,
    #[serde(default)]
    pub pricing_model: Option<String>,
    pub total_pool: f64,
    pub option_pool: f64,
    #[serde(default)]
    pub existing_position_stake: f64,
    #[serde(default)]
    pub fee_bps: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub error: String,
}

impl ErrorBody {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            error: error.into(),
        }
    }
}

/// Message from a WebSocket client
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientRequest {
    Preview(PreviewRequest),
}

/// WebSocket message to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    Preview {
        preview: Option<PayoutPreview>,
        timestamp: i64,
    },
    Error {
        error: String,
        timestamp: i64,
    },
}

impl WsMessage {
    pub fn preview(preview: Option<PayoutPreview>) -> Self {
        WsMessage::Preview {
            preview,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        WsMessage::Error {
            error: error.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Stats for monitoring
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProcessorStats {
    pub previews_served: u64,
    pub previews_empty: u64,
    pub quotes_served: u64,
    pub settlements_computed: u64,
    pub ws_clients: usize,
    pub uptime_seconds: u64,
}
