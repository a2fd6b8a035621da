use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::core::rate::{ExchangeRate, ExchangeRateClient};

const LATEST_ENDPOINT: &str = "/exchange-rates/latest";
const HISTORY_ENDPOINT: &str = "/exchange-rates/history";
const CONVERT_ENDPOINT: &str = "/exchange-rates/currencycalc";

/// `ExchangeRateClient` backed by the currency-app REST API.
pub struct RestRateClient {
    base_url: String,
    client: Client,
}

impl RestRateClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().user_agent("fxview/0.1").build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Issues one GET and returns the body, or `None` for `204 No Content`.
    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Option<String>> {
        let raw = format!("{}{}", self.base_url, endpoint);
        let url = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        }
        .with_context(|| format!("Invalid backend URL: {raw}"))?;
        debug!("Requesting {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for endpoint: {}", e, endpoint))?;

        let status = response.status();
        debug!(%status, "Received response");
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(anyhow!("HTTP error: {} for endpoint: {}", status, endpoint));
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body for {endpoint}"))?;
        Ok(Some(text))
    }

    fn decode<T: DeserializeOwned>(endpoint: &str, text: &str) -> Result<T> {
        serde_json::from_str(text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", endpoint, e))
    }

    async fn get_rates(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<ExchangeRate>> {
        match self.get(endpoint, params).await? {
            Some(text) => Self::decode(endpoint, &text),
            None => {
                debug!("No content for {}", endpoint);
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl ExchangeRateClient for RestRateClient {
    #[instrument(name = "LatestRatesFetch", skip(self))]
    async fn fetch_latest_rates(&self) -> Result<Vec<ExchangeRate>> {
        self.get_rates(LATEST_ENDPOINT, &[]).await
    }

    #[instrument(name = "HistoryFetch", skip(self), fields(currency = %currency))]
    async fn fetch_history(&self, currency: &str) -> Result<Vec<ExchangeRate>> {
        self.get_rates(HISTORY_ENDPOINT, &[("currency", currency)]).await
    }

    #[instrument(name = "CurrencyConvert", skip(self), fields(currency = %currency))]
    async fn convert(&self, currency: &str, amount_in_eur: f64) -> Result<f64> {
        let euro = amount_in_eur.to_string();
        let text = self
            .get(CONVERT_ENDPOINT, &[("currency", currency), ("euro", euro.as_str())])
            .await?
            .ok_or_else(|| anyhow!("Empty conversion response for currency: {}", currency))?;
        Self::decode(CONVERT_ENDPOINT, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rate::parse_timestamp;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HISTORY_RESPONSE: &str = r#"[
        {"id": 3, "currency": "USD", "currencyDenom": "EUR", "obsValue": 1.0945, "title": "US dollar/Euro", "timestamp": "2024-01-03"},
        {"id": 2, "currency": "USD", "currencyDenom": "EUR", "obsValue": 1.0919, "title": "US dollar/Euro", "timestamp": "2024-01-02"},
        {"id": 1, "currency": "USD", "currencyDenom": "EUR", "obsValue": 1.1017, "title": "US dollar/Euro", "timestamp": "2023-12-29"}
    ]"#;

    async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/currency-app{endpoint}")))
            .respond_with(response)
            .mount(server)
            .await;
    }

    fn client_for(server: &MockServer) -> RestRateClient {
        RestRateClient::new(&format!("{}/currency-app/", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_latest_rates() {
        let mock_server = MockServer::start().await;
        let body = r#"[
            {"currency": "GBP", "obsValue": 0.8652, "timestamp": "2024-01-02"},
            {"currency": "JPY", "obsValue": 155.73, "timestamp": "2024-01-02"},
            {"currency": "USD", "obsValue": 1.0919, "timestamp": "2024-01-02"}
        ]"#;
        mount(
            &mock_server,
            LATEST_ENDPOINT,
            ResponseTemplate::new(200).set_body_string(body),
        )
        .await;

        let rates = client_for(&mock_server).fetch_latest_rates().await.unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates[0].currency, "GBP");
        assert_eq!(rates[2].obs_value, 1.0919);
    }

    #[tokio::test]
    async fn test_fetch_history_sends_currency_param() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/currency-app/exchange-rates/history"))
            .and(query_param("currency", "USD"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HISTORY_RESPONSE))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let history = client.fetch_history("USD").await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].timestamp, parse_timestamp("2023-12-29").unwrap());

        let latest = client.fetch_latest_for_currency("USD").await.unwrap();
        assert_eq!(latest, history[0]);
    }

    #[tokio::test]
    async fn test_no_content_is_empty_list() {
        let mock_server = MockServer::start().await;
        mount(
            &mock_server,
            HISTORY_ENDPOINT,
            ResponseTemplate::new(204),
        )
        .await;

        let client = client_for(&mock_server);
        assert!(client.fetch_history("XXX").await.unwrap().is_empty());
        assert!(client.fetch_latest_for_currency("XXX").await.is_err());
    }

    #[tokio::test]
    async fn test_convert_sends_amount_and_reads_bare_number() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/currency-app/exchange-rates/currencycalc"))
            .and(query_param("currency", "USD"))
            .and(query_param("euro", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_string("109.19"))
            .mount(&mock_server)
            .await;

        let value = client_for(&mock_server).convert("USD", 100.0).await.unwrap();
        assert_eq!(value, 109.19);
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let mock_server = MockServer::start().await;
        mount(&mock_server, LATEST_ENDPOINT, ResponseTemplate::new(500)).await;

        let result = client_for(&mock_server).fetch_latest_rates().await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for endpoint: /exchange-rates/latest"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = MockServer::start().await;
        mount(
            &mock_server,
            CONVERT_ENDPOINT,
            ResponseTemplate::new(200).set_body_string(r#"{"sum": 1.0}"#),
        )
        .await;

        let result = client_for(&mock_server).convert("USD", 1.0).await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for /exchange-rates/currencycalc")
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let client = RestRateClient::new("http://127.0.0.1:9").unwrap();
        let result = client.fetch_latest_rates().await;
        assert!(result.unwrap_err().to_string().starts_with("Request error:"));
    }
}
