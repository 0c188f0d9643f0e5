//! Rate provider - owns the effective exchange-rate table and its provenance
//!
//! The table starts from static reference data. A refresh asks a [`RateSource`] for the
//! live local-currency rate and, on success, swaps in a new table with the current month
//! patched. Failures never reach the caller: the table stays as it was, provenance drops
//! back to [`Provenance::Static`] and a status note is emitted.
//!
//! Readers get an `Arc<RateTable>` snapshot, so a computation in progress never observes
//! a half-applied update.

use super::reference::reference_rates;
use super::sources::RateSource;
use super::tables::RateTable;
use crate::calendar::MonthKey;
use crate::finance::constants::LOCAL_CURRENCY_CODE;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Where the current month's exchange rate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Historical/projected reference data only
    Static,
    /// Patched with a live quote
    Live,
}

impl Provenance {
    pub fn is_live(&self) -> bool {
        matches!(self, Provenance::Live)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Static => write!(f, "static"),
            Provenance::Live => write!(f, "live"),
        }
    }
}

/// Receives human-readable notes about rate updates
pub type StatusCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Owner of the effective exchange-rate table
pub struct RateProvider<S: RateSource> {
    source: S,
    currency_code: String,
    table: RwLock<Arc<RateTable>>,
    live: AtomicBool,
    /// Tickets handed out to refreshes, in start order
    issued: AtomicU64,
    /// Newest ticket whose outcome has been applied
    applied: AtomicU64,
    last_updated: RwLock<Option<DateTime<Local>>>,
    on_status_note: Option<StatusCallback>,
}

impl<S: RateSource> RateProvider<S> {
    /// Provider seeded with the static reference rates
    pub fn new(source: S) -> Self {
        Self::with_table(source, reference_rates())
    }

    /// Provider seeded with a caller-supplied table
    pub fn with_table(source: S, table: RateTable) -> Self {
        Self {
            source,
            currency_code: LOCAL_CURRENCY_CODE.to_string(),
            table: RwLock::new(Arc::new(table)),
            live: AtomicBool::new(false),
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
            last_updated: RwLock::new(None),
            on_status_note: None,
        }
    }

    /// Fetch a different local currency from the source
    pub fn with_currency(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = currency_code.into().to_uppercase();
        self
    }

    /// Register a status-note callback
    pub fn with_status_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_status_note = Some(Arc::new(callback));
        self
    }

    /// Consistent snapshot of the current table
    pub fn rates(&self) -> Arc<RateTable> {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&table)
    }

    pub fn provenance(&self) -> Provenance {
        if self.live.load(Ordering::SeqCst) {
            Provenance::Live
        } else {
            Provenance::Static
        }
    }

    /// When the last live quote was applied
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        *self
            .last_updated
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Refresh the current calendar month from the live source
    pub async fn refresh(&self) -> Provenance {
        self.refresh_for(MonthKey::current()).await
    }

    /// Refresh `month` from the live source
    ///
    /// Never fails. If a refresh started later has already been applied, this one's
    /// outcome is discarded.
    pub async fn refresh_for(&self, month: MonthKey) -> Provenance {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!(
            "Refresh #{} of {} for {} via {}",
            ticket,
            self.currency_code,
            month,
            self.source.name()
        );

        let fetched = self.source.fetch_rate(&self.currency_code).await;

        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        if ticket < self.applied.load(Ordering::SeqCst) {
            log::debug!("Discarding stale refresh #{}", ticket);
            return self.provenance();
        }
        self.applied.store(ticket, Ordering::SeqCst);

        let patched = fetched.and_then(|rate| table.with_rate(month, rate).map(|next| (rate, next)));
        match patched {
            Ok((rate, next)) => {
                *table = Arc::new(next);
                drop(table);

                self.live.store(true, Ordering::SeqCst);
                *self
                    .last_updated
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(Local::now());

                log::info!("Live rate applied: {} USD/{} = {:.2}", month, self.currency_code, rate);
                self.note(&format!(
                    "El tipo de cambio de {} se actualizó desde una fuente en tiempo real (cotización actual: {:.2}).",
                    month, rate
                ));
                Provenance::Live
            }
            Err(e) => {
                drop(table);
                self.live.store(false, Ordering::SeqCst);

                log::warn!("Live rate unavailable, keeping static data: {}", e);
                self.note(
                    "Los datos de tipo de cambio provienen de registros históricos. \
                     No se pudo conectar con una fuente en tiempo real.",
                );
                Provenance::Static
            }
        }
    }

    fn note(&self, message: &str) {
        if let Some(callback) = &self.on_status_note {
            callback(message);
        }
    }
}

#[cfg(feature = "async")]
mod task {
    use super::*;
    use std::time::Duration;
    use tokio::task::JoinHandle;
    use tokio::time::MissedTickBehavior;

    /// Background refresh loop; aborted on [`RefreshTask::cancel`] or drop
    pub struct RefreshTask {
        handle: JoinHandle<()>,
    }

    impl RefreshTask {
        pub fn cancel(self) {
            self.handle.abort();
        }

        pub fn is_finished(&self) -> bool {
            self.handle.is_finished()
        }
    }

    impl Drop for RefreshTask {
        fn drop(&mut self) {
            self.handle.abort();
        }
    }

    impl<S: RateSource + 'static> RateProvider<S> {
        /// Refresh now, then every `interval`, until the returned task is cancelled
        ///
        /// Must be called from within a tokio runtime.
        pub fn spawn_refresh_task(self: &Arc<Self>, interval: Duration) -> RefreshTask {
            let provider = Arc::clone(self);
            let period = interval.max(Duration::from_millis(1));

            let handle = tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    provider.refresh().await;
                }
            });

            RefreshTask { handle }
        }
    }
}

#[cfg(feature = "async")]
pub use task::RefreshTask;
