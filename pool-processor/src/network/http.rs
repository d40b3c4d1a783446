use super::stream::SharedState;
use crate::types::{ErrorBody, PreviewRequest, QuoteRequest, SettlementRequest};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use pool_math::{
    build_stake_quote, calculate_rail_payouts, payout_preview, PayoutPreview, QuoteSnapshot,
    SettlementResult, StakeQuote,
};
use tracing::{info, warn};

type ApiError = (StatusCode, Json<ErrorBody>);

/// Preview for a candidate stake; 404 with a null body when there is nothing to preview
pub async fn preview(
    State(state): State<SharedState>,
    Json(req): Json<PreviewRequest>,
) -> Result<Json<PayoutPreview>, (StatusCode, Json<Option<PayoutPreview>>)> {
    let input = req.into_pool_input(state.config.default_fees.total_bps());
    let preview = payout_preview(&input);
    state.record_preview(preview.is_some()).await;

    preview
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, Json(None)))
}

pub async fn quote(
    State(state): State<SharedState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<StakeQuote>, ApiError> {
    if !(req.amount.is_finite() && req.amount > 0.0) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("invalid_amount", "Amount must be greater than 0")),
        ));
    }

    let snapshot = QuoteSnapshot {
        market_id: req.market_id,
        outcome_id: req.outcome_id,
        amount: req.amount,
        pricing_model: req.pricing_model,
        total_pool: req.total_pool,
        option_pool: req.option_pool,
        existing_position_stake: req.existing_position_stake,
        fee_bps: req
            .fee_bps
            .unwrap_or_else(|| state.config.default_fees.total_bps()),
    };
    let quote = build_stake_quote(&snapshot);

    state.stats.write().await.quotes_served += 1;
    Ok(Json(quote))
}

pub async fn settlement(
    State(state): State<SharedState>,
    Json(req): Json<SettlementRequest>,
) -> Result<Json<SettlementResult>, ApiError> {
    let fees = req.fee_config.unwrap_or(state.config.default_fees);

    match calculate_rail_payouts(&req.entries, &req.winning_option_id, &fees, req.rail) {
        Ok(result) => {
            info!(
                "💰 Settled {:?} rail: pot {} distributable {} winners {}",
                result.rail,
                result.total_pot,
                result.distributable_pot,
                result.payouts_by_user_id.len()
            );
            state.stats.write().await.settlements_computed += 1;
            Ok(Json(result))
        }
        Err(e) => {
            warn!("Rejected settlement request: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new("invalid_settlement", e.to_string())),
            ))
        }
    }
}

/// Get current stats
pub async fn get_stats(State(state): State<SharedState>) -> impl IntoResponse {
    let mut stats = state.stats.read().await.clone();
    stats.uptime_seconds = state.started_at.elapsed().as_secs();
    Json(stats)
}
