//! Exchange rate types and the client abstraction over the rate backend

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One observed rate: units of `currency` per 1 EUR at `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub currency: String,
    pub obs_value: f64,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_denom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_compl: Option<String>,
}

impl ExchangeRate {
    pub fn new(currency: &str, obs_value: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            currency: currency.to_string(),
            obs_value,
            timestamp,
            currency_denom: None,
            title: None,
            title_compl: None,
        }
    }
}

/// Parses the timestamp forms the backend may emit: an ISO local date
/// (read as midnight), a naive date-time, or an RFC 3339 date-time
/// (normalized to UTC).
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_utc())
        .map_err(|_| anyhow!("Invalid timestamp: {}", value))
}

/// Formats a timestamp for display; midnight values print as a bare date.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    if ts.time() == NaiveTime::MIN {
        ts.format("%Y-%m-%d").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(D::Error::custom)
    }
}

/// Typed, single-shot access to the rate backend. No call retries or
/// caches; each one is an independent round trip.
#[async_trait]
pub trait ExchangeRateClient: Send + Sync {
    /// Most recent rate of every currency.
    async fn fetch_latest_rates(&self) -> Result<Vec<ExchangeRate>>;

    /// All observations for one currency. Order is not part of the contract.
    async fn fetch_history(&self, currency: &str) -> Result<Vec<ExchangeRate>>;

    /// Converts `amount_in_eur` into `currency`, unrounded.
    async fn convert(&self, currency: &str, amount_in_eur: f64) -> Result<f64>;

    /// Latest rate for one currency, taken as the first history entry.
    ///
    /// Only correct when the backend returns history newest-first. The
    /// assumption is checked on every call and a breach is logged, but the
    /// first entry is still what gets returned.
    async fn fetch_latest_for_currency(&self, currency: &str) -> Result<ExchangeRate> {
        let history = self.fetch_history(currency).await?;
        let first = history
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("No history data found for currency: {}", currency))?;

        if let Some(newer) = history.iter().skip(1).find(|r| r.timestamp > first.timestamp) {
            warn!(
                currency,
                first = %format_timestamp(&first.timestamp),
                newer = %format_timestamp(&newer.timestamp),
                "History is not newest-first; latest rate may be stale"
            );
        } else {
            debug!(currency, "History order is newest-first");
        }

        Ok(first)
    }
}
