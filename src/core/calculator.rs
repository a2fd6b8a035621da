//! EUR to target currency conversion

use crate::core::rate::ExchangeRateClient;
use crate::core::state::{RequestSequence, RequestTicket};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error};

pub const CONVERT_ERROR_MESSAGE: &str = "Error converting currency. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalculationOutcome {
    /// Input was rejected before any request; state is unchanged.
    Ignored,
    Converted(f64),
    Failed,
    /// A newer calculation started while this one was in flight.
    Superseded,
}

/// Parses a user-entered EUR amount. Returns `None` for anything that is
/// not a finite, non-negative number. Parsing is strict: trailing text such
/// as `"100abc"` is rejected rather than read as a numeric prefix.
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}

pub struct Calculator {
    client: Arc<dyn ExchangeRateClient>,
    result: Option<(String, f64)>,
    pending_currency: String,
    error_message: Option<String>,
    requests: RequestSequence,
}

impl Calculator {
    pub fn new(client: Arc<dyn ExchangeRateClient>) -> Self {
        Self {
            client,
            result: None,
            pending_currency: String::new(),
            error_message: None,
            requests: RequestSequence::default(),
        }
    }

    /// Converts `input` EUR into `currency`. Invalid input or an empty
    /// currency is a silent no-op.
    pub async fn calculate(&mut self, input: &str, currency: &str) -> CalculationOutcome {
        let Some((ticket, amount)) = self.begin(input, currency) else {
            return CalculationOutcome::Ignored;
        };

        let client = Arc::clone(&self.client);
        let result = client.convert(currency, amount).await;
        self.complete(ticket, result)
    }

    pub fn begin(&mut self, input: &str, currency: &str) -> Option<(RequestTicket, f64)> {
        let amount = parse_amount(input).filter(|_| !currency.is_empty());
        let Some(amount) = amount else {
            debug!(input, currency, "Ignoring invalid conversion input");
            return None;
        };

        self.error_message = None;
        self.pending_currency = currency.to_string();
        Some((self.requests.issue(), amount))
    }

    pub fn complete(&mut self, ticket: RequestTicket, result: Result<f64>) -> CalculationOutcome {
        if !self.requests.is_current(ticket) {
            return CalculationOutcome::Superseded;
        }
        match result {
            Ok(value) => {
                self.result = Some((self.pending_currency.clone(), value));
                CalculationOutcome::Converted(value)
            }
            Err(e) => {
                error!(error = ?e, "Error calculating currency");
                self.result = None;
                self.error_message = Some(CONVERT_ERROR_MESSAGE.to_string());
                CalculationOutcome::Failed
            }
        }
    }

    pub fn result(&self) -> Option<f64> {
        self.result.as_ref().map(|(_, value)| *value)
    }

    /// Currency the current result was converted into.
    pub fn result_currency(&self) -> Option<&str> {
        self.result.as_ref().map(|(currency, _)| currency.as_str())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
