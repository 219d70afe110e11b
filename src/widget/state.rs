use crate::domain::{ScoreBreakdown, ScoreOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Calculating,
    /// Idle with a published breakdown.
    Ready,
}

/// The whole UI state. Replaced wholesale on every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub url: String,
    pub breakdown: Option<ScoreBreakdown>,
    pub logo_url: String,
    pub phase: Phase,
    pub last_calculated_url: String,
}

impl Default for WidgetSnapshot {
    fn default() -> Self {
        Self {
            url: String::new(),
            breakdown: None,
            logo_url: String::new(),
            phase: Phase::Idle,
            last_calculated_url: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    SetUrl(String),
    Begin,
    Publish(ScoreOutcome),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    AlreadyCalculating,
    AlreadyCalculated,
    NotCalculating,
}

impl Rejection {
    pub fn label(&self) -> &'static str {
        match self {
            Rejection::AlreadyCalculating => "a calculation is already running",
            Rejection::AlreadyCalculated => "this URL was just scored",
            Rejection::NotCalculating => "no calculation is running",
        }
    }
}

/// Pure transition function. Rejected actions leave the snapshot untouched.
pub fn reduce(state: &WidgetSnapshot, action: Action) -> Result<WidgetSnapshot, Rejection> {
    match action {
        Action::SetUrl(url) => Ok(WidgetSnapshot {
            url,
            ..state.clone()
        }),
        Action::Begin => {
            if state.phase == Phase::Calculating {
                return Err(Rejection::AlreadyCalculating);
            }
            if state.url == state.last_calculated_url {
                return Err(Rejection::AlreadyCalculated);
            }
            Ok(WidgetSnapshot {
                phase: Phase::Calculating,
                last_calculated_url: state.url.clone(),
                ..state.clone()
            })
        }
        Action::Publish(outcome) => {
            if state.phase != Phase::Calculating {
                return Err(Rejection::NotCalculating);
            }
            Ok(WidgetSnapshot {
                breakdown: Some(outcome.breakdown),
                logo_url: outcome.logo_url,
                phase: Phase::Ready,
                ..state.clone()
            })
        }
        Action::Reset => {
            if state.phase == Phase::Calculating {
                return Err(Rejection::AlreadyCalculating);
            }
            Ok(WidgetSnapshot::default())
        }
    }
}
