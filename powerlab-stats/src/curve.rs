//! Plot-ready samples of the test distributions and of power against `n`.

use log::debug;
use powerlab_core::{PowerError, Result};

use crate::design::{Design, PowerParameters, Tail, TestFamily};
use crate::distribution::{Distribution, FisherF, StudentT};
use crate::power::{analyze, compute_power, DegreesOfFreedom};

/// Default number of x samples per distribution curve.
pub const DEFAULT_CURVE_POINTS: usize = 1000;

/// Largest number of sample sizes a power curve evaluates.
pub const MAX_POWER_CURVE_POINTS: usize = 100_000;

// ── Distribution curves ─────────────────────────────────────────────────────

/// One `(x, density)` sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    pub x: f64,
    /// Density at `x`.
    pub y: f64,
}

/// Null and alternative densities sampled on a shared grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionCurve {
    pub family: TestFamily,
    pub df: DegreesOfFreedom,
    pub ncp: f64,
    pub critical_value: f64,
    pub one_tailed: bool,
    /// Plot window `(lo, hi)`.
    pub x_range: (f64, f64),
    /// Central density, `ncp = 0`.
    pub null_curve: Vec<CurvePoint>,
    /// Non-central density at the design's `ncp`.
    pub alternative_curve: Vec<CurvePoint>,
}

/// Sample both densities at [`DEFAULT_CURVE_POINTS`] points.
///
/// # Errors
///
/// Fails when the parameters are invalid or the analysis is non-finite.
pub fn distribution_curve(params: &PowerParameters) -> Result<DistributionCurve> {
    distribution_curve_with(params, DEFAULT_CURVE_POINTS)
}

/// Sample both densities at `points` evenly spaced x values.
///
/// t-tests span `[-4, max(8, crit + 5))` one-tailed and
/// `[-max(8, |crit| + 5), max(8, crit + 5))` two-tailed. F-tests span
/// `[0.001, max(20, 3·crit))`, with the reported window starting at 0.
///
/// # Errors
///
/// Fails when `points` is zero, the parameters are invalid or the analysis is
/// non-finite.
pub fn distribution_curve_with(params: &PowerParameters, points: usize) -> Result<DistributionCurve> {
    if points == 0 {
        return Err(PowerError::InvalidInput(
            "curve needs at least one point".into(),
        ));
    }
    let analysis = analyze(params)?;
    let crit = analysis.critical_value;
    let ncp = analysis.ncp;
    let one_tailed = analysis.tail == Tail::Upper;

    let (x_range, null_curve, alternative_curve) = match analysis.df {
        DegreesOfFreedom::Single(df) => {
            let lo = if one_tailed { -4.0 } else { -(8.0f64).max(crit.abs() + 5.0) };
            let hi = (8.0f64).max(crit + 5.0);
            let xs = x_grid(lo, (hi - lo) / points as f64, points);
            (
                (lo, hi),
                sample(&StudentT::central(df), &xs),
                sample(&StudentT::noncentral(df, ncp), &xs),
            )
        }
        DegreesOfFreedom::Pair { df1, df2 } => {
            let hi = (20.0f64).max(3.0 * crit);
            let xs = x_grid(0.001, hi / points as f64, points);
            (
                (0.0, hi),
                sample(&FisherF::central(df1, df2), &xs),
                sample(&FisherF::noncentral(df1, df2, ncp), &xs),
            )
        }
    };

    Ok(DistributionCurve {
        family: analysis.family,
        df: analysis.df,
        ncp,
        critical_value: crit,
        one_tailed,
        x_range,
        null_curve,
        alternative_curve,
    })
}

fn x_grid(first: f64, step: f64, points: usize) -> Vec<f64> {
    (0..points).map(|k| first + k as f64 * step).collect()
}

fn sample<D: Distribution>(dist: &D, xs: &[f64]) -> Vec<CurvePoint> {
    xs.iter().map(|&x| CurvePoint { x, y: dist.pdf(x) }).collect()
}

// ── Power curves ────────────────────────────────────────────────────────────

/// Power at one sample size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerPoint {
    /// Sample size.
    pub n: usize,
    /// Power at `n`.
    pub power: f64,
}

/// Power at `min_n, min_n + step, ..., <= max_n`.
///
/// Sample sizes where power is undefined (below the design minimum) are
/// skipped.
///
/// # Errors
///
/// Fails on a zero step, an empty range, a grid longer than
/// [`MAX_POWER_CURVE_POINTS`], or an invalid design or significance level.
pub fn power_curve(
    design: &Design,
    alpha: f64,
    min_n: usize,
    max_n: usize,
    step: usize,
) -> Result<Vec<PowerPoint>> {
    if step == 0 {
        return Err(PowerError::InvalidInput("curve step must be positive".into()));
    }
    if min_n > max_n {
        return Err(PowerError::InvalidInput(format!(
            "empty sample size range {min_n}..={max_n}"
        )));
    }
    let len = (max_n - min_n) / step + 1;
    if len > MAX_POWER_CURVE_POINTS {
        return Err(PowerError::InvalidInput(format!(
            "power curve of {len} points exceeds the limit of {MAX_POWER_CURVE_POINTS}"
        )));
    }
    PowerParameters::new(max_n, alpha, *design).validate()?;

    let base = PowerParameters::new(min_n, alpha, *design);
    let grid: Vec<usize> = (min_n..=max_n).step_by(step).collect();

    #[cfg(feature = "parallel")]
    let points: Vec<PowerPoint> = {
        use rayon::prelude::*;
        grid.par_iter()
            .map(|&n| PowerPoint { n, power: compute_power(&base.with_n(n)) })
            .filter(|p| p.power.is_finite())
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let points: Vec<PowerPoint> = grid
        .iter()
        .map(|&n| PowerPoint { n, power: compute_power(&base.with_n(n)) })
        .filter(|p| p.power.is_finite())
        .collect();

    debug!(
        "{}: power curve with {} of {} points",
        design.family(),
        points.len(),
        grid.len()
    );
    Ok(points)
}

/// Sample-size grid used to plot power around a chosen `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerCurveWindow {
    /// First sample size on the grid.
    pub min_n: usize,
    /// Last sample size considered.
    pub max_n: usize,
    /// Grid spacing.
    pub step: usize,
}

impl PowerCurveWindow {
    /// Grid that widens and coarsens with `n`, always containing `n`.
    pub fn around(n: usize, design: &Design) -> Self {
        let (max_n, step) = match n {
            0..=20 => (100.max(3 * n), 1),
            21..=50 => (150.max(2 * n), 2),
            51..=200 => (300.max(n + n / 2), 5),
            _ => (500.max(n.saturating_add(n / 5)), 10),
        };
        let mut min_n = design.min_sample_size();
        let mut max_n = max_n;
        if n < min_n {
            min_n = n.saturating_sub(10).max(2);
        }
        if n > max_n {
            max_n = n.saturating_add(50);
        }
        Self { min_n, max_n, step }
    }
}

/// Power curve over [`PowerCurveWindow::around`] `n`, with the point at `n`
/// itself always present.
///
/// # Errors
///
/// As [`power_curve`]; a very large `n` gives a grid over the point limit.
pub fn power_curve_around(design: &Design, alpha: f64, n: usize) -> Result<Vec<PowerPoint>> {
    let window = PowerCurveWindow::around(n, design);
    let mut points = power_curve(design, alpha, window.min_n, window.max_n, window.step)?;
    if !points.iter().any(|p| p.n == n) {
        let power = compute_power(&PowerParameters::new(n, alpha, *design));
        if power.is_finite() {
            points.push(PowerPoint { n, power });
            points.sort_by_key(|p| p.n);
        }
    }
    Ok(points)
}
