//! Metrics collection and exposition.
//!
//! # Metrics
//! - `faucet_claims_total` (counter): claim attempts by outcome
//! - `faucet_claim_duration_seconds` (histogram): time spent in `process_claim`
//! - `faucet_membership_checks_total` (counter): gate results
//! - `faucet_cooldown_entries` (gauge): tracked keys per ledger
//! - `faucet_rpc_health` (gauge): 1=reachable, 0=unreachable
//!
//! Recording is a no-op until a recorder is installed, so library code and
//! tests can call these freely.

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_claim(outcome: &'static str, elapsed: Duration) {
    counter!("faucet_claims_total", "outcome" => outcome).increment(1);
    histogram!("faucet_claim_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_membership_check(result: &'static str) {
    counter!("faucet_membership_checks_total", "result" => result).increment(1);
}

pub fn record_cooldown_entries(ledger: &'static str, entries: usize) {
    gauge!("faucet_cooldown_entries", "ledger" => ledger).set(entries as f64);
}

pub fn record_rpc_health(healthy: bool) {
    gauge!("faucet_rpc_health").set(if healthy { 1.0 } else { 0.0 });
}
