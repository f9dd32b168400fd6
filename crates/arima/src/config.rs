//! Configuration for automatic ARIMA order selection.

use crate::error::ArimaError;
use crate::stationarity::critical_value;

/// Criterion used to rank candidate models (lower is better).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InformationCriterion {
    /// Akaike Information Criterion.
    #[default]
    Aic,
    /// Small-sample corrected AIC.
    Aicc,
    /// Bayesian (Schwarz) Information Criterion.
    Bic,
}

impl InformationCriterion {
    /// Lower-case name, as used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Aic => "aic",
            Self::Aicc => "aicc",
            Self::Bic => "bic",
        }
    }
}

/// How the `(p, q)` plane is explored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Greedy neighbourhood search from a small initial set.
    #[default]
    Stepwise,
    /// Every `(p, q)` with `p <= max_p`, `q <= max_q`.
    Grid,
}

/// Bounds and options for [`select_order`](crate::select_order).
///
/// # Example
///
/// ```
/// use vaxcast_arima::{InformationCriterion, SearchStrategy, SelectionConfig};
///
/// let config = SelectionConfig::default()
///     .with_max_orders(2, 2)
///     .with_criterion(InformationCriterion::Bic)
///     .with_strategy(SearchStrategy::Grid);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    max_p: usize,
    max_q: usize,
    max_d: usize,
    start_p: usize,
    start_q: usize,
    criterion: InformationCriterion,
    strategy: SearchStrategy,
    max_steps: usize,
    d: Option<usize>,
    alpha: f64,
}

impl Default for SelectionConfig {
    /// `max_p = 3`, `max_q = 3`, `max_d = 2`, start at `(1, 1)`, AIC,
    /// stepwise with at most 100 moves, `d` from KPSS at `alpha = 0.05`.
    fn default() -> Self {
        Self {
            max_p: 3,
            max_q: 3,
            max_d: 2,
            start_p: 1,
            start_q: 1,
            criterion: InformationCriterion::Aic,
            strategy: SearchStrategy::Stepwise,
            max_steps: 100,
            d: None,
            alpha: 0.05,
        }
    }
}

impl SelectionConfig {
    /// Sets the maximum AR and MA orders.
    pub fn with_max_orders(mut self, max_p: usize, max_q: usize) -> Self {
        self.max_p = max_p;
        self.max_q = max_q;
        self
    }

    /// Sets the maximum number of differences KPSS may choose.
    pub fn with_max_d(mut self, max_d: usize) -> Self {
        self.max_d = max_d;
        self
    }

    /// Sets the first candidate of the stepwise search.
    pub fn with_start(mut self, start_p: usize, start_q: usize) -> Self {
        self.start_p = start_p;
        self.start_q = start_q;
        self
    }

    /// Sets the ranking criterion.
    pub fn with_criterion(mut self, criterion: InformationCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Caps the number of stepwise moves.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Fixes the differencing order instead of testing for it.
    pub fn with_d(mut self, d: Option<usize>) -> Self {
        self.d = d;
        self
    }

    /// Sets the KPSS significance level.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Maximum AR order.
    pub fn max_p(&self) -> usize {
        self.max_p
    }

    /// Maximum MA order.
    pub fn max_q(&self) -> usize {
        self.max_q
    }

    /// Maximum differencing order.
    pub fn max_d(&self) -> usize {
        self.max_d
    }

    /// Stepwise starting order `(p, q)`, clamped to the bounds.
    pub fn start(&self) -> (usize, usize) {
        (self.start_p.min(self.max_p), self.start_q.min(self.max_q))
    }

    /// Ranking criterion.
    pub fn criterion(&self) -> InformationCriterion {
        self.criterion
    }

    /// Search strategy.
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Maximum stepwise moves.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Fixed differencing order, if any.
    pub fn d(&self) -> Option<usize> {
        self.d
    }

    /// KPSS significance level.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Validates this configuration.
    ///
    /// Rejects an untabulated KPSS `alpha` and a fixed `d` above `max_d`.
    pub fn validate(&self) -> Result<(), ArimaError> {
        critical_value(self.alpha)?;
        if let Some(d) = self.d
            && d > self.max_d
        {
            return Err(ArimaError::InvalidConfig {
                reason: format!("fixed d = {d} exceeds max_d = {}", self.max_d),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SelectionConfig::default();
        assert_eq!((cfg.max_p(), cfg.max_q(), cfg.max_d()), (3, 3, 2));
        assert_eq!(cfg.start(), (1, 1));
        assert_eq!(cfg.criterion(), InformationCriterion::Aic);
        assert_eq!(cfg.strategy(), SearchStrategy::Stepwise);
        assert_eq!(cfg.max_steps(), 100);
        assert_eq!(cfg.d(), None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn start_is_clamped() {
        let cfg = SelectionConfig::default().with_max_orders(0, 2).with_start(3, 3);
        assert_eq!(cfg.start(), (0, 2));
    }

    #[test]
    fn rejects_bad_alpha() {
        let cfg = SelectionConfig::default().with_alpha(0.2);
        assert!(matches!(cfg.validate(), Err(ArimaError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_fixed_d_above_max() {
        let cfg = SelectionConfig::default().with_max_d(1).with_d(Some(2));
        assert!(matches!(cfg.validate(), Err(ArimaError::InvalidConfig { .. })));
    }

    #[test]
    fn criterion_names() {
        assert_eq!(InformationCriterion::Aic.name(), "aic");
        assert_eq!(InformationCriterion::Aicc.name(), "aicc");
        assert_eq!(InformationCriterion::Bic.name(), "bic");
    }
}
