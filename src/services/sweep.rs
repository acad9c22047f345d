//! Scheduled expiry sweep
//!
//! A plain timer around `ReservationsService::cancel_due_reservations`; the
//! operation itself is an ordinary public method so tests invoke it directly
//! without waiting on the timer.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::{config::SweepConfig, services::reservations::ReservationsService};

/// Spawn the periodic sweep task. The first run happens after one full
/// period unless `run_on_startup` is set.
pub fn spawn(reservations: ReservationsService, config: SweepConfig) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_secs(config.interval_hours * 3600);
        let mut ticker = tokio::time::interval(period);

        if !config.run_on_startup {
            // the first interval tick fires immediately
            ticker.tick().await;
        }

        loop {
            ticker.tick().await;
            match reservations.cancel_due_reservations().await {
                Ok(outcome) => {
                    tracing::info!(
                        cancelled = outcome.cancelled,
                        failed = outcome.failed,
                        "Reservation expiry sweep finished"
                    );
                }
                Err(e) => {
                    tracing::error!("Reservation expiry sweep failed: {}", e);
                }
            }
        }
    })
}
