//! Query state shared by the presenters

use tracing::debug;

/// Lifecycle of one asynchronous query. `Loaded` and `Failed` are the
/// two terminal outcomes; a failure carries the user-facing message only.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            QueryState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            QueryState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one issued request within a presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Monotonic request counter. Only the most recently issued ticket is
/// current; responses carrying an older ticket are stale.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        let current = ticket.0 == self.latest;
        if !current {
            debug!(
                ticket = ticket.0,
                latest = self.latest,
                "Discarding stale response"
            );
        }
        current
    }
}
