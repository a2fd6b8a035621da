//! Presenter for a single currency: latest rate, history and chart series

use crate::core::metadata::{CurrencyMetadata, MetadataTable};
use crate::core::rate::{ExchangeRate, ExchangeRateClient};
use crate::core::series::{ChartSeries, prepare_series};
use crate::core::state::{QueryState, RequestSequence, RequestTicket};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, instrument};

pub const LATEST_ERROR_MESSAGE: &str = "Error fetching latest rate. Please try again later.";
pub const HISTORY_ERROR_MESSAGE: &str = "Error fetching currency history. Please try again later.";

pub struct CurrencyDetailPresenter {
    client: Arc<dyn ExchangeRateClient>,
    metadata_table: Arc<MetadataTable>,
    code: String,
    metadata: Option<CurrencyMetadata>,
    latest: QueryState<ExchangeRate>,
    history: QueryState<Vec<ExchangeRate>>,
    requests: RequestSequence,
}

impl CurrencyDetailPresenter {
    pub fn new(client: Arc<dyn ExchangeRateClient>, metadata_table: Arc<MetadataTable>) -> Self {
        Self {
            client,
            metadata_table,
            code: String::new(),
            metadata: None,
            latest: QueryState::Idle,
            history: QueryState::Idle,
            requests: RequestSequence::default(),
        }
    }

    /// Shows `code`. An empty code issues nothing and leaves both queries
    /// idle; otherwise latest rate and history are fetched concurrently and
    /// each settles on its own.
    #[instrument(name = "CurrencyDetail", skip(self), fields(code = %code))]
    pub async fn activate(&mut self, code: &str) {
        let Some(ticket) = self.begin(code) else {
            debug!("No currency selected");
            return;
        };

        let client = Arc::clone(&self.client);
        let (latest, history) = futures::join!(
            client.fetch_latest_for_currency(code),
            client.fetch_history(code)
        );

        self.complete_latest(ticket, latest);
        self.complete_history(ticket, history);
    }

    /// Resolves metadata and resets both queries. Returns the ticket for
    /// the new requests, or `None` when there is nothing to fetch.
    pub fn begin(&mut self, code: &str) -> Option<RequestTicket> {
        self.code = code.to_string();
        self.metadata = self.metadata_table.get(code).cloned();
        let ticket = self.requests.issue();

        if code.is_empty() {
            self.latest = QueryState::Idle;
            self.history = QueryState::Idle;
            return None;
        }

        self.latest = QueryState::Loading;
        self.history = QueryState::Loading;
        Some(ticket)
    }

    pub fn complete_latest(&mut self, ticket: RequestTicket, result: Result<ExchangeRate>) {
        if !self.requests.is_current(ticket) {
            return;
        }
        self.latest = match result {
            Ok(rate) => QueryState::Loaded(rate),
            Err(e) => {
                error!(error = ?e, code = %self.code, "Error fetching latest rate");
                QueryState::Failed(LATEST_ERROR_MESSAGE.to_string())
            }
        };
    }

    pub fn complete_history(&mut self, ticket: RequestTicket, result: Result<Vec<ExchangeRate>>) {
        if !self.requests.is_current(ticket) {
            return;
        }
        self.history = match result {
            Ok(history) => {
                debug!(points = history.len(), "Currency history loaded");
                QueryState::Loaded(history)
            }
            Err(e) => {
                error!(error = ?e, code = %self.code, "Error fetching currency history");
                QueryState::Failed(HISTORY_ERROR_MESSAGE.to_string())
            }
        };
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn metadata(&self) -> Option<&CurrencyMetadata> {
        self.metadata.as_ref()
    }

    /// A code was given but the reference table has no entry for it.
    pub fn is_unknown_currency(&self) -> bool {
        !self.code.is_empty() && self.metadata.is_none()
    }

    pub fn latest(&self) -> &QueryState<ExchangeRate> {
        &self.latest
    }

    pub fn history(&self) -> &QueryState<Vec<ExchangeRate>> {
        &self.history
    }

    pub fn chart_series(&self) -> Option<ChartSeries> {
        self.history.value().map(|h| prepare_series(h))
    }
}
