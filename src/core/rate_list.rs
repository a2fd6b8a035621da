//! Presenter for the list of latest rates

use crate::core::metadata::{CurrencyMetadata, MetadataTable};
use crate::core::rate::{ExchangeRate, ExchangeRateClient};
use crate::core::state::{QueryState, RequestSequence, RequestTicket};
use anyhow::Result;
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{debug, error};

pub const LIST_ERROR_MESSAGE: &str = "Error fetching currencies. Please try again later.";

/// Request to show the detail view of one currency. Emitted by the list,
/// acted on by whoever owns navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    ShowCurrency(String),
}

/// A rate joined with its reference data, if any exists.
#[derive(Debug, Clone, Copy)]
pub struct RateRow<'a> {
    pub rate: &'a ExchangeRate,
    pub metadata: Option<&'a CurrencyMetadata>,
}

pub struct RateListPresenter {
    client: Arc<dyn ExchangeRateClient>,
    metadata: Arc<MetadataTable>,
    state: QueryState<Vec<ExchangeRate>>,
    requests: RequestSequence,
}

impl RateListPresenter {
    pub fn new(client: Arc<dyn ExchangeRateClient>, metadata: Arc<MetadataTable>) -> Self {
        Self {
            client,
            metadata,
            state: QueryState::Idle,
            requests: RequestSequence::default(),
        }
    }

    /// Fetches the latest rate set once and settles into `Loaded` or `Failed`.
    pub async fn activate(&mut self) {
        let ticket = self.begin();
        let client = Arc::clone(&self.client);
        let result = client.fetch_latest_rates().await;
        self.complete(ticket, result);
    }

    pub fn begin(&mut self) -> RequestTicket {
        self.state = QueryState::Loading;
        self.requests.issue()
    }

    pub fn complete(&mut self, ticket: RequestTicket, result: Result<Vec<ExchangeRate>>) {
        if !self.requests.is_current(ticket) {
            return;
        }
        self.state = match result {
            Ok(rates) => {
                debug!(count = rates.len(), "Latest rates loaded");
                QueryState::Loaded(rates)
            }
            Err(e) => {
                error!(error = ?e, "Error fetching currencies");
                QueryState::Failed(LIST_ERROR_MESSAGE.to_string())
            }
        };
    }

    pub fn state(&self) -> &QueryState<Vec<ExchangeRate>> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.state.error_message()
    }

    pub fn rates(&self) -> &[ExchangeRate] {
        self.state.value().map(Vec::as_slice).unwrap_or_default()
    }

    /// As-of date of the list. The backend returns every entry for a common
    /// date, so the first one stands in for all of them.
    pub fn as_of(&self) -> Option<NaiveDateTime> {
        self.rates().first().map(|r| r.timestamp)
    }

    pub fn resolve_metadata(&self, code: &str) -> Option<&CurrencyMetadata> {
        self.metadata.get(code)
    }

    pub fn rows(&self) -> Vec<RateRow<'_>> {
        self.rates()
            .iter()
            .map(|rate| RateRow {
                rate,
                metadata: self.resolve_metadata(&rate.currency),
            })
            .collect()
    }

    pub fn select_currency(&self, code: &str) -> NavigationIntent {
        NavigationIntent::ShowCurrency(code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rate::parse_timestamp;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockListClient {
        responses: Mutex<Vec<Result<Vec<ExchangeRate>>>>,
        call_count: AtomicUsize,
    }

    impl MockListClient {
        fn new(responses: Vec<Result<Vec<ExchangeRate>>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                call_count: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ExchangeRateClient for MockListClient {
        async fn fetch_latest_rates(&self) -> Result<Vec<ExchangeRate>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.responses.lock().unwrap().remove(0)
        }

        async fn fetch_history(&self, _currency: &str) -> Result<Vec<ExchangeRate>> {
            Err(anyhow!("not used"))
        }

        async fn convert(&self, _currency: &str, _amount_in_eur: f64) -> Result<f64> {
            Err(anyhow!("not used"))
        }
    }

    fn rate(code: &str, value: f64) -> ExchangeRate {
        ExchangeRate::new(code, value, parse_timestamp("2024-01-02").unwrap())
    }

    fn metadata() -> Arc<MetadataTable> {
        Arc::new(MetadataTable::new(vec![CurrencyMetadata {
            code: "USD".to_string(),
            display_name: "US Dollar".to_string(),
            symbol: None,
            flag: None,
        }]))
    }

    #[tokio::test]
    async fn test_activate_loads_rates_verbatim() {
        let rates = vec![rate("USD", 1.08), rate("JPY", 160.1), rate("GBP", 0.86)];
        let client = Arc::new(MockListClient::new(vec![Ok(rates.clone())]));
        let mut presenter = RateListPresenter::new(client.clone(), metadata());

        assert_eq!(presenter.state(), &QueryState::Idle);
        presenter.activate().await;

        assert_eq!(client.call_count.load(Ordering::SeqCst), 1);
        assert_eq!(presenter.rates(), rates.as_slice());
        assert!(!presenter.is_loading());
        assert!(presenter.error_message().is_none());
        assert_eq!(presenter.as_of(), parse_timestamp("2024-01-02").ok());
    }

    #[tokio::test]
    async fn test_activate_failure_keeps_no_partial_list() {
        let client = Arc::new(MockListClient::new(vec![
            Ok(vec![rate("USD", 1.08)]),
            Err(anyhow!("HTTP error: 500 Internal Server Error")),
        ]));
        let mut presenter = RateListPresenter::new(client, metadata());

        presenter.activate().await;
        assert_eq!(presenter.rates().len(), 1);

        presenter.activate().await;
        assert!(presenter.rates().is_empty());
        assert!(presenter.as_of().is_none());
        assert_eq!(presenter.error_message(), Some(LIST_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_activate_after_failure_clears_error() {
        let client = Arc::new(MockListClient::new(vec![
            Err(anyhow!("HTTP error: 500 Internal Server Error")),
            Ok(vec![rate("USD", 1.08)]),
        ]));
        let mut presenter = RateListPresenter::new(client, metadata());

        presenter.activate().await;
        assert!(presenter.rates().is_empty());
        assert_eq!(presenter.error_message(), Some(LIST_ERROR_MESSAGE));

        presenter.activate().await;
        assert_eq!(presenter.rates().len(), 1);
        assert!(presenter.error_message().is_none());
        assert_eq!(presenter.as_of(), parse_timestamp("2024-01-02").ok());
    }

    #[tokio::test]
    async fn test_unknown_metadata_renders_without_failing() {
        let client = Arc::new(MockListClient::new(vec![Ok(vec![
            rate("USD", 1.08),
            rate("EUR", 1.0),
        ])]));
        let mut presenter = RateListPresenter::new(client, metadata());
        presenter.activate().await;

        assert!(presenter.resolve_metadata("EUR").is_none());
        let rows = presenter.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].metadata.unwrap().display_name, "US Dollar");
        assert_eq!(rows[1].rate.currency, "EUR");
        assert!(rows[1].metadata.is_none());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let client = Arc::new(MockListClient::new(vec![]));
        let mut presenter = RateListPresenter::new(client, metadata());

        let stale = presenter.begin();
        let fresh = presenter.begin();
        presenter.complete(fresh, Ok(vec![rate("USD", 1.09)]));
        presenter.complete(stale, Err(anyhow!("late failure")));

        assert!(presenter.error_message().is_none());
        assert_eq!(presenter.rates()[0].obs_value, 1.09);
    }

    #[test]
    fn test_select_currency_emits_intent() {
        let client = Arc::new(MockListClient::new(vec![]));
        let presenter = RateListPresenter::new(client, metadata());
        assert_eq!(
            presenter.select_currency("USD"),
            NavigationIntent::ShowCurrency("USD".to_string())
        );
    }
}
