use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::{services::catalog_service, state::AppState};

/// Spawn the periodic feed sync owned by the process lifecycle. The first
/// tick fires immediately; a run that outlives its period delays the next
/// tick instead of stacking, and `import_from_feed` itself serializes
/// against manual triggers.
pub fn spawn(state: AppState, period_secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(period_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(period_secs, "catalog sync scheduler started");

        loop {
            ticker.tick().await;
            match catalog_service::import_from_feed(&state).await {
                Ok(response) => {
                    if let Some(summary) = response.data {
                        tracing::info!(
                            created = summary.created,
                            updated = summary.updated,
                            failed = summary.failed,
                            "scheduled catalog sync finished"
                        );
                    }
                }
                // Fail open: log and let the next scheduled run retry.
                Err(err) => tracing::error!(error = %err, "scheduled catalog sync failed"),
            }
        }
    })
}
