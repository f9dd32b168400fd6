//! State machine of a single forecasting run.

use serde::Serialize;

/// Stage of a forecasting run.
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> Idle
///     Idle --> Preparing
///     Preparing --> SelectingOrder
///     SelectingOrder --> Fitting
///     Fitting --> Forecasting
///     Forecasting --> Done
///     Idle --> Failed
///     Preparing --> Failed
///     SelectingOrder --> Failed
///     Fitting --> Failed
///     Forecasting --> Failed
///     Failed --> Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Preparing,
    SelectingOrder,
    Fitting,
    Forecasting,
    Failed,
    Done,
}

impl RunState {
    /// Whether `self -> next` is a legal transition.
    pub fn can_transition_to(self, next: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, next),
            (Idle, Preparing)
                | (Preparing, SelectingOrder)
                | (SelectingOrder, Fitting)
                | (Fitting, Forecasting)
                | (Forecasting, Done)
                | (Failed, Done)
        ) || (next == Failed && !matches!(self, Failed | Done))
    }
}

/// Records the states a run passes through.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRun {
    states: Vec<RunState>,
}

impl Default for ForecastRun {
    fn default() -> Self {
        Self {
            states: vec![RunState::Idle],
        }
    }
}

impl ForecastRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.states.last().copied().unwrap_or(RunState::Idle)
    }

    /// Every state visited, starting with `Idle`.
    pub fn states(&self) -> &[RunState] {
        &self.states
    }

    /// Moves to `next`. Illegal transitions are ignored and return `false`.
    pub fn advance(&mut self, next: RunState) -> bool {
        if !self.state().can_transition_to(next) {
            return false;
        }
        self.states.push(next);
        true
    }

    /// `Failed -> Done` from any non-terminal state.
    pub(crate) fn fail(&mut self) {
        self.advance(RunState::Failed);
        self.advance(RunState::Done);
    }

    /// Returns `true` once the run reached `Done`.
    pub fn is_done(&self) -> bool {
        self.state() == RunState::Done
    }

    /// Returns `true` if the run went through `Failed`.
    pub fn failed(&self) -> bool {
        self.states.contains(&RunState::Failed)
    }
}
