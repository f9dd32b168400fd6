//! Automatic ARIMA order selection.

use std::collections::HashMap;

use tracing::{debug, info};
use vaxcast_stats::is_constant;

use crate::config::{InformationCriterion, SearchStrategy, SelectionConfig};
use crate::difference::difference;
use crate::error::ArimaError;
use crate::fit::ArimaFit;
use crate::spec::ArimaSpec;
use crate::stationarity::ndiffs;

/// Stepwise moves in visiting order.
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
];

/// One evaluated candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    /// `(p, d, q)` order of the candidate.
    pub order: (usize, usize, usize),
    /// Criterion value, `None` if the fit failed.
    pub score: Option<f64>,
}

/// Result of [`select_order`]: the winning fit plus the search trace.
#[derive(Debug, Clone)]
pub struct Selection {
    fit: ArimaFit,
    criterion: InformationCriterion,
    score: f64,
    trace: Vec<CandidateScore>,
}

impl Selection {
    /// The selected model.
    pub fn fit(&self) -> &ArimaFit {
        &self.fit
    }

    /// Consumes the selection, returning the selected model.
    pub fn into_fit(self) -> ArimaFit {
        self.fit
    }

    /// `(p, d, q)` of the selected model.
    pub fn order(&self) -> (usize, usize, usize) {
        self.fit.order()
    }

    /// Criterion used for ranking.
    pub fn criterion(&self) -> InformationCriterion {
        self.criterion
    }

    /// Criterion value of the selected model.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Every candidate evaluated, in evaluation order.
    pub fn trace(&self) -> &[CandidateScore] {
        &self.trace
    }
}

/// Chooses `(p, d, q)` for `data` and returns the fitted winner.
///
/// `d` comes from [`ndiffs`] unless fixed in the config. A series that is
/// exactly constant after `d >= 1` differences is a deterministic trend and
/// is returned as the exact `(0, d, 0)` fit with drift. Otherwise `(p, q)` is
/// searched per [`SearchStrategy`]; candidates that fail to fit are skipped.
///
/// The stepwise search is a heuristic: the result is a local optimum of the
/// criterion, not necessarily the global one.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ArimaError::InvalidConfig`] | config fails validation |
/// | [`ArimaError::EmptyData`] | `data` is empty |
/// | [`ArimaError::NonFiniteData`] | NaN or infinity in `data` |
/// | [`ArimaError::ConstantData`] | `data` has zero variance |
/// | [`ArimaError::AllCandidatesFailed`] | no candidate could be fitted |
pub fn select_order(data: &[f64], config: &SelectionConfig) -> Result<Selection, ArimaError> {
    config.validate()?;
    if data.is_empty() {
        return Err(ArimaError::EmptyData);
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(ArimaError::NonFiniteData);
    }
    if is_constant(data) {
        return Err(ArimaError::ConstantData);
    }

    let d = match config.d() {
        Some(d) => d,
        None => ndiffs(data, config.alpha(), config.max_d())?,
    };
    debug!(d, n = data.len(), "differencing order chosen");

    let mut search = Search::new(data, d, config.criterion());

    if d > 0 && is_constant(&difference(data, d)) {
        search.evaluate_spec(ArimaSpec::new(0, d, 0).with_constant(true));
    } else {
        match config.strategy() {
            SearchStrategy::Stepwise => search.stepwise(config),
            SearchStrategy::Grid => search.grid(config),
        }
    }

    let Search {
        best, trace, criterion, ..
    } = search;
    let Some((fit, score)) = best else {
        return Err(ArimaError::AllCandidatesFailed {
            d,
            max_p: config.max_p(),
            max_q: config.max_q(),
        });
    };
    let (p, d, q) = fit.order();
    info!(
        p,
        d,
        q,
        criterion = criterion.name(),
        score,
        candidates = trace.len(),
        "selected ARIMA order"
    );

    Ok(Selection {
        fit,
        criterion,
        score,
        trace,
    })
}

struct Search<'a> {
    data: &'a [f64],
    d: usize,
    criterion: InformationCriterion,
    scores: HashMap<(usize, usize), Option<f64>>,
    trace: Vec<CandidateScore>,
    best: Option<(ArimaFit, f64)>,
}

impl<'a> Search<'a> {
    fn new(data: &'a [f64], d: usize, criterion: InformationCriterion) -> Self {
        Self {
            data,
            d,
            criterion,
            scores: HashMap::new(),
            trace: Vec::new(),
            best: None,
        }
    }

    fn best_score(&self) -> Option<f64> {
        self.best.as_ref().map(|(_, s)| *s)
    }

    /// Fits `(p, d, q)` once; repeated calls return the cached score.
    fn evaluate(&mut self, p: usize, q: usize) -> Option<f64> {
        if let Some(score) = self.scores.get(&(p, q)) {
            return *score;
        }
        self.evaluate_spec(ArimaSpec::new(p, self.d, q))
    }

    fn evaluate_spec(&mut self, spec: ArimaSpec) -> Option<f64> {
        let (p, d, q) = spec.order();
        let score = match spec.fit(self.data) {
            Ok(fit) => {
                let score = fit.criterion(self.criterion);
                // +inf (AICc on tiny samples) and NaN are unusable.
                if score < f64::INFINITY {
                    if self.best_score().is_none_or(|best| score < best) {
                        self.best = Some((fit, score));
                    }
                    Some(score)
                } else {
                    None
                }
            }
            Err(e) => {
                debug!(p, d, q, error = %e, "candidate skipped");
                None
            }
        };
        self.scores.insert((p, q), score);
        self.trace.push(CandidateScore {
            order: (p, d, q),
            score,
        });
        score
    }

    fn grid(&mut self, config: &SelectionConfig) {
        for p in 0..=config.max_p() {
            for q in 0..=config.max_q() {
                self.evaluate(p, q);
            }
        }
    }

    fn stepwise(&mut self, config: &SelectionConfig) {
        let initial = [config.start(), (0, 0), (1, 0), (0, 1)];
        for (p, q) in initial {
            if p <= config.max_p() && q <= config.max_q() {
                self.evaluate(p, q);
            }
        }

        let Some(((mut p, _, mut q), mut current_score)) =
            self.best.as_ref().map(|(fit, s)| (fit.order(), *s))
        else {
            return;
        };

        for step in 0..config.max_steps() {
            let mut improved: Option<((usize, usize), f64)> = None;
            for (dp, dq) in NEIGHBOURS {
                let (Some(np), Some(nq)) = (p.checked_add_signed(dp), q.checked_add_signed(dq))
                else {
                    continue;
                };
                if np > config.max_p() || nq > config.max_q() || self.scores.contains_key(&(np, nq))
                {
                    continue;
                }
                if let Some(score) = self.evaluate(np, nq)
                    && score < current_score
                    && improved.is_none_or(|(_, s)| score < s)
                {
                    improved = Some(((np, nq), score));
                }
            }
            match improved {
                Some(((np, nq), score)) => {
                    debug!(step, p = np, q = nq, score, "stepwise move");
                    (p, q) = (np, nq);
                    current_score = score;
                }
                None => break,
            }
        }
    }
}
