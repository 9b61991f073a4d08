//! Latest known station state and the data source that refreshes it.
//!
//! The snapshot lives in a `watch` slot holding an `Arc<IssSnapshot>`. A
//! refresh builds the next snapshot off to the side and swaps it in whole, so
//! readers see either the old value or the new one.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;

use crate::iss::{
    client::{FetchError, IssApi},
    types::Observer,
};

/// Immutable bundle of what the display shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssSnapshot {
    pub latitude: String,
    pub longitude: String,
    /// Crew names in API order.
    pub crew: Vec<String>,
    /// Pass rise times, ascending.
    pub upcoming_passes: Vec<DateTime<Utc>>,
}

impl IssSnapshot {
    /// Earliest known pass, if any.
    pub fn next_pass(&self) -> Option<&DateTime<Utc>> {
        self.upcoming_passes.iter().min()
    }
}

/// Owns the write side of the snapshot slot.
pub struct DataSource {
    api: Arc<dyn IssApi>,
    observer: Observer,
    tx: watch::Sender<Arc<IssSnapshot>>,
}

/// Cheap read handle for activities that only display the snapshot.
#[derive(Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<Arc<IssSnapshot>>,
}

impl DataSource {
    /// Start with the zero-value snapshot.
    pub fn new(api: Arc<dyn IssApi>, observer: Observer) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(IssSnapshot::default()));
        Self { api, observer, tx }
    }

    /// Last published snapshot.
    pub fn current(&self) -> Arc<IssSnapshot> {
        self.tx.borrow().clone()
    }

    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader {
            rx: self.tx.subscribe(),
        }
    }

    /// Query all three backends concurrently and publish the result.
    ///
    /// Sub-fields whose query failed keep their previous value; the rest are
    /// replaced. Nothing is published when every query failed. The first
    /// failure is returned so the caller can log it.
    pub async fn refresh(&self) -> Result<(), FetchError> {
        let (position, crew, passes) = tokio::join!(
            self.api.position(),
            self.api.crew(),
            self.api.passes(self.observer),
        );

        let mut next = IssSnapshot::clone(&self.current());
        let mut first_err: Option<FetchError> = None;
        let mut updated = 0usize;

        match position {
            Ok(p) => {
                next.latitude = p.latitude;
                next.longitude = p.longitude;
                updated += 1;
            }
            Err(e) => {
                tracing::warn!("position fetch failed: {e}");
                first_err.get_or_insert(e);
            }
        }
        match crew {
            Ok(people) => {
                next.crew = people.into_iter().map(|m| m.name).collect();
                updated += 1;
            }
            Err(e) => {
                tracing::warn!("crew fetch failed: {e}");
                first_err.get_or_insert(e);
            }
        }
        match passes {
            Ok(passes) => {
                next.upcoming_passes = passes.into_iter().map(|p| p.rise_time).collect();
                updated += 1;
            }
            Err(e) => {
                tracing::warn!("pass fetch failed: {e}");
                first_err.get_or_insert(e);
            }
        }

        if updated > 0 {
            tracing::debug!(
                "snapshot published: {} crew, {} passes",
                next.crew.len(),
                next.upcoming_passes.len()
            );
            self.tx.send_replace(Arc::new(next));
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl SnapshotReader {
    /// Last published snapshot; never waits on a refresh.
    pub fn current(&self) -> Arc<IssSnapshot> {
        self.rx.borrow().clone()
    }
}
