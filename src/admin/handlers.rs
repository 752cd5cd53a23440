use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::admin::AdminState;
use crate::blockchain::ChainError;
use crate::observability::metrics;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub faucet_address: String,
    pub chain_id: u64,
}

/// Liveness of the RPC dependency; unauthenticated.
pub async fn get_health(State(state): State<AdminState>) -> StatusCode {
    let healthy = state.chain.block_number().await.is_ok();
    metrics::record_rpc_health(healthy);
    if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

pub async fn get_status(State(state): State<AdminState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        faucet_address: state.orchestrator.faucet_address().to_string(),
        chain_id: state.chain_id,
    })
}

/// Faucet account and ledger summary.
pub async fn get_faucet(
    State(state): State<AdminState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let address = state.orchestrator.faucet_address();

    let summary = async {
        let balance = state.chain.balance(address).await?;
        let counts = state.chain.transaction_counts(address).await?;
        Ok::<_, ChainError>((balance, counts))
    }
    .await;

    let (balance, counts) = summary.map_err(|e| {
        tracing::error!(error = %e, "Failed to query faucet account");
        (StatusCode::BAD_GATEWAY, e.to_string())
    })?;

    let policy = state.orchestrator.policy();
    Ok(Json(serde_json::json!({
        "address": address.to_string(),
        "balance_wei": balance.to_string(),
        "pending_nonce": counts.pending,
        "latest_nonce": counts.latest,
        "amount_wei": policy.amount.to_string(),
        "gas_price_wei": policy.gas_price.to_string(),
        "cooldown_secs": policy.cooldown.as_secs(),
        "requester_cooldowns": state.orchestrator.requester_cooldowns().len(),
        "address_cooldowns": state.orchestrator.address_cooldowns().len(),
    })))
}
