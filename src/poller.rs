//! Background task keeping the data source fresh.

use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::snapshot::DataSource;

/// Spawn the poller on the current runtime.
pub fn spawn(source: Arc<DataSource>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(run(source, period))
}

/// Refresh forever, once immediately and then every `period`.
///
/// Failures only get logged; whatever was last published stays visible.
pub async fn run(source: Arc<DataSource>, period: Duration) {
    tracing::info!("poller started (every {:?})", period);
    let mut ticker = time::interval(period);
    // A slow fetch pushes the schedule back instead of firing a burst.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match source.refresh().await {
            Ok(()) => tracing::debug!("refresh ok"),
            Err(e) => tracing::warn!("refresh failed, keeping previous data: {e}"),
        }
    }
}
