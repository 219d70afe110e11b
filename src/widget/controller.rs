use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::scoring::ScoreCalculator;

use super::state::{reduce, Action, Rejection, WidgetSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculateOutcome {
    Published(Arc<WidgetSnapshot>),
    Skipped(Rejection),
}

/// Owns the current snapshot and runs calculations against it.
///
/// The lock is only held to apply a transition, never across an await, so a
/// second `calculate` observes `Calculating` and returns immediately.
pub struct ScoreWidget {
    state: Mutex<Arc<WidgetSnapshot>>,
    calculator: ScoreCalculator,
}

impl ScoreWidget {
    pub fn new(calculator: ScoreCalculator) -> Self {
        Self {
            state: Mutex::new(Arc::new(WidgetSnapshot::default())),
            calculator,
        }
    }

    pub fn snapshot(&self) -> Arc<WidgetSnapshot> {
        self.state.lock().clone()
    }

    pub fn set_url(&self, url: impl Into<String>) -> Arc<WidgetSnapshot> {
        // SetUrl is accepted in every phase.
        self.apply(Action::SetUrl(url.into()))
            .unwrap_or_else(|_| self.snapshot())
    }

    pub fn reset(&self) -> Result<Arc<WidgetSnapshot>, Rejection> {
        let result = self.apply(Action::Reset);
        if let Err(reason) = &result {
            debug!(target: "score", reason = reason.label(), "reset refused");
        }
        result
    }

    pub async fn calculate(&self) -> CalculateOutcome {
        let started = match self.apply(Action::Begin) {
            Ok(started) => started,
            Err(reason) => {
                debug!(target: "score", reason = reason.label(), "calculation skipped");
                return CalculateOutcome::Skipped(reason);
            }
        };

        info!(target: "score", url = %started.url, "calculating");
        let outcome = self.calculator.calculate(&started.url).await;

        match self.apply(Action::Publish(outcome)) {
            Ok(published) => CalculateOutcome::Published(published),
            // Only this task can leave Calculating, so Publish cannot be refused.
            Err(reason) => CalculateOutcome::Skipped(reason),
        }
    }

    fn apply(&self, action: Action) -> Result<Arc<WidgetSnapshot>, Rejection> {
        let mut guard = self.state.lock();
        let next = Arc::new(reduce(&guard, action)?);
        *guard = next.clone();
        Ok(next)
    }
}
