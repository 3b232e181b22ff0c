//! Forward power calculation.
//!
//! For each [`TestFamily`] the engine derives degrees of freedom, the
//! non-centrality parameter and the critical value of the null distribution,
//! then evaluates the probability of landing in the rejection region under
//! the alternative:
//!
//! | Family          | df                     | ncp                       |
//! |-----------------|------------------------|---------------------------|
//! | Two-sample t    | `2n - 2`               | `d·√(n/2)`                |
//! | Paired t        | `n - 1`                | `d·√n`                    |
//! | One-way ANOVA   | `(k - 1, k(n - 1))`    | `n·k·f²`                  |
//! | Regression      | `(p, n - p - 1)`       | `r²/(1 - r²)·(n - p - 1)` |
//!
//! [`compute_power`] reports domain violations as `NaN` so a search loop can
//! keep probing; [`try_compute_power`] and [`analyze`] say why.

use core::fmt;

use log::debug;
use powerlab_core::{PowerError, Result, Scored, Summarizable};

use crate::design::{Design, PowerParameters, Tail, TestFamily};
use crate::distribution::{Distribution, FisherF, StudentT};

/// Degrees of freedom of the test statistic.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DegreesOfFreedom {
    /// t statistic.
    Single(f64),
    /// F statistic (numerator, denominator).
    Pair { df1: f64, df2: f64 },
}

impl fmt::Display for DegreesOfFreedom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegreesOfFreedom::Single(df) => write!(f, "{df}"),
            DegreesOfFreedom::Pair { df1, df2 } => write!(f, "({df1}, {df2})"),
        }
    }
}

/// Every intermediate quantity of one forward power calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerAnalysis {
    pub family: TestFamily,
    pub df: DegreesOfFreedom,
    /// Non-centrality of the alternative distribution.
    pub ncp: f64,
    /// Rejection boundary of the null distribution.
    pub critical_value: f64,
    pub tail: Tail,
    /// Probability of rejecting the null under the alternative.
    pub power: f64,
}

impl Scored for PowerAnalysis {
    fn score(&self) -> f64 {
        self.power
    }
}

impl Summarizable for PowerAnalysis {
    fn summary(&self) -> String {
        format!(
            "{}: power={:.4}, df={}, ncp={:.4}, critical={:.4}",
            self.family, self.power, self.df, self.ncp, self.critical_value,
        )
    }
}

/// Degrees of freedom implied by the sample size and design.
///
/// Computed in floating point; the result is only meaningful for parameters
/// that pass [`PowerParameters::validate`].
pub fn degrees_of_freedom(params: &PowerParameters) -> DegreesOfFreedom {
    let n = params.n as f64;
    match params.design {
        Design::TwoSampleT { .. } => DegreesOfFreedom::Single(2.0 * n - 2.0),
        Design::PairedT { .. } => DegreesOfFreedom::Single(n - 1.0),
        Design::OneWayAnova { groups, .. } => {
            let k = groups as f64;
            DegreesOfFreedom::Pair {
                df1: k - 1.0,
                df2: k * (n - 1.0),
            }
        }
        Design::LinearRegression { predictors, .. } => {
            let p = predictors as f64;
            DegreesOfFreedom::Pair {
                df1: p,
                df2: n - p - 1.0,
            }
        }
    }
}

/// Non-centrality parameter of the test statistic under the alternative.
pub fn noncentrality(params: &PowerParameters) -> f64 {
    let n = params.n as f64;
    match params.design {
        Design::TwoSampleT { effect_size, .. } => effect_size * (n / 2.0).sqrt(),
        Design::PairedT { effect_size, .. } => effect_size * n.sqrt(),
        Design::OneWayAnova {
            effect_size,
            groups,
        } => n * groups as f64 * effect_size * effect_size,
        Design::LinearRegression { predictors, r2 } => {
            let f2 = r2 / (1.0 - r2);
            f2 * (n - predictors as f64 - 1.0)
        }
    }
}

/// Boundary of the rejection region of the null distribution.
///
/// t statistics use the central t quantile at `1 - alpha` (upper tail) or
/// `1 - alpha/2` (two-sided). F statistics always use the upper tail at
/// `1 - alpha`.
pub fn critical_value(alpha: f64, tail: Tail, df: DegreesOfFreedom) -> f64 {
    match df {
        DegreesOfFreedom::Single(df) => {
            let p = match tail {
                Tail::Upper => 1.0 - alpha,
                Tail::TwoSided => 1.0 - alpha / 2.0,
            };
            StudentT::central(df).quantile(p)
        }
        DegreesOfFreedom::Pair { df1, df2 } => FisherF::central(df1, df2).quantile(1.0 - alpha),
    }
}

/// Probability of exceeding `crit` under the alternative distribution.
fn rejection_probability(df: DegreesOfFreedom, ncp: f64, crit: f64, tail: Tail) -> f64 {
    match df {
        DegreesOfFreedom::Single(df) => {
            let alt = StudentT::noncentral(df, ncp);
            match tail {
                Tail::Upper => 1.0 - alt.cdf(crit),
                Tail::TwoSided => 1.0 - (alt.cdf(crit) - alt.cdf(-crit)),
            }
        }
        DegreesOfFreedom::Pair { df1, df2 } => 1.0 - FisherF::noncentral(df1, df2, ncp).cdf(crit),
    }
}

/// Run the full forward derivation.
///
/// # Errors
///
/// [`PowerError::InvalidInput`] when a domain guard trips,
/// [`PowerError::NonFinite`] when the distribution evaluation breaks down.
pub fn analyze(params: &PowerParameters) -> Result<PowerAnalysis> {
    params.validate()?;

    let df = degrees_of_freedom(params);
    let ncp = noncentrality(params);
    let tail = params.design.tail();
    let crit = critical_value(params.alpha, tail, df);
    if !crit.is_finite() {
        return Err(PowerError::NonFinite(format!(
            "critical value for df={df}, alpha={}",
            params.alpha
        )));
    }

    let power = rejection_probability(df, ncp, crit, tail);
    if !power.is_finite() {
        return Err(PowerError::NonFinite(format!(
            "power for df={df}, ncp={ncp}"
        )));
    }

    Ok(PowerAnalysis {
        family: params.family(),
        df,
        ncp,
        critical_value: crit,
        tail,
        power,
    })
}

/// Power of the test, or the reason it could not be computed.
pub fn try_compute_power(params: &PowerParameters) -> Result<f64> {
    analyze(params).map(|a| a.power)
}

/// Power of the test in [0, 1], or `NaN` for out-of-domain parameters.
///
/// # Example
///
/// ```
/// use powerlab_stats::{compute_power, Design, PowerParameters};
///
/// let params = PowerParameters::new(30, 0.05, Design::two_sample_t(0.5, false));
/// let power = compute_power(&params);
/// assert!((power - 0.478).abs() < 1e-3);
/// ```
pub fn compute_power(params: &PowerParameters) -> f64 {
    match try_compute_power(params) {
        Ok(power) => power,
        Err(e) => {
            debug!("compute_power: {e}");
            f64::NAN
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
