//! Inverse power calculation: the smallest sample size reaching a target.
//!
//! Power is treated as non-decreasing in `n`, so a binary search over the
//! admissible range finds the boundary. The non-central series carry a small
//! truncation error, so the result is confirmed by a short linear rescan
//! below the boundary.

use log::{debug, trace};
use powerlab_core::{PowerError, Result};

use crate::design::{check_unit_interval, Design, PowerParameters};
use crate::power::compute_power;

/// Number of sample sizes below the binary-search boundary that are rescanned.
pub const DEFAULT_RESCAN_WINDOW: usize = 10;

/// Inclusive range searched by [`find_sample_size_within`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchBounds {
    /// Smallest sample size tried.
    pub min_n: usize,
    /// Largest sample size tried.
    pub max_n: usize,
    /// Sizes below the binary-search boundary checked one by one.
    pub rescan_window: usize,
}

impl SearchBounds {
    /// Default range for a design.
    ///
    /// t-tests search `2..=10000`, ANOVA `2..=5000` and regression
    /// `predictors + 2..=5000`.
    pub fn for_design(design: &Design) -> Self {
        let max_n = if design.family().is_t_test() { 10_000 } else { 5_000 };
        Self {
            min_n: design.min_sample_size(),
            max_n,
            rescan_window: DEFAULT_RESCAN_WINDOW,
        }
    }

    /// Replace the lower bound.
    pub fn with_min_n(mut self, min_n: usize) -> Self {
        self.min_n = min_n;
        self
    }

    /// Replace the upper bound.
    pub fn with_max_n(mut self, max_n: usize) -> Self {
        self.max_n = max_n;
        self
    }

    /// Replace the rescan width. Zero trusts the binary search alone.
    pub fn with_rescan_window(mut self, rescan_window: usize) -> Self {
        self.rescan_window = rescan_window;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.min_n == 0 || self.min_n > self.max_n {
            return Err(PowerError::InvalidInput(format!(
                "search bounds must satisfy 1 <= min_n <= max_n, got {}..={}",
                self.min_n, self.max_n
            )));
        }
        Ok(())
    }
}

/// Smallest `n` whose power reaches `target`, searching the default bounds.
///
/// Returns `None` when the target cannot be reached inside the bounds or the
/// inputs are invalid. Use [`try_find_sample_size`] to tell the two apart.
///
/// ```
/// use powerlab_stats::{find_sample_size, Design};
///
/// let n = find_sample_size(&Design::two_sample_t(0.5, false), 0.05, 0.8);
/// assert_eq!(n, Some(64));
/// ```
pub fn find_sample_size(design: &Design, alpha: f64, target: f64) -> Option<usize> {
    find_sample_size_within(design, alpha, target, SearchBounds::for_design(design))
}

/// [`find_sample_size`] over explicit bounds.
pub fn find_sample_size_within(
    design: &Design,
    alpha: f64,
    target: f64,
    bounds: SearchBounds,
) -> Option<usize> {
    match try_find_sample_size_within(design, alpha, target, bounds) {
        Ok(n) => n,
        Err(e) => {
            debug!("sample size search rejected: {e}");
            None
        }
    }
}

/// Fallible variant of [`find_sample_size`].
///
/// # Errors
///
/// Returns [`PowerError::InvalidInput`] for an invalid design, significance
/// level or target. An unreachable target is `Ok(None)`.
pub fn try_find_sample_size(design: &Design, alpha: f64, target: f64) -> Result<Option<usize>> {
    try_find_sample_size_within(design, alpha, target, SearchBounds::for_design(design))
}

/// Fallible variant of [`find_sample_size_within`].
///
/// # Errors
///
/// As [`try_find_sample_size`], plus inverted or empty bounds.
pub fn try_find_sample_size_within(
    design: &Design,
    alpha: f64,
    target: f64,
    bounds: SearchBounds,
) -> Result<Option<usize>> {
    check_unit_interval(target, "target power")?;
    bounds.validate()?;
    PowerParameters::new(bounds.max_n, alpha, *design).validate()?;

    let base = PowerParameters::new(bounds.min_n, alpha, *design);
    // NaN (for instance below the design minimum) never passes.
    let reaches = |n: usize| {
        let p = compute_power(&base.with_n(n));
        trace!("n={n} power={p}");
        p >= target
    };

    if !reaches(bounds.max_n) {
        debug!(
            "{}: target power {target} not reached by n={}",
            design.family(),
            bounds.max_n
        );
        return Ok(None);
    }
    if reaches(bounds.min_n) {
        return Ok(Some(bounds.min_n));
    }

    // Invariant: reaches(high) && !reaches(low).
    let (mut low, mut high) = (bounds.min_n, bounds.max_n);
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        if reaches(mid) {
            high = mid;
        } else {
            low = mid;
        }
    }

    let start = high.saturating_sub(bounds.rescan_window).max(bounds.min_n);
    let n = (start..high).find(|&n| reaches(n)).unwrap_or(high);
    debug!(
        "{}: n={n} reaches power {target} at alpha={alpha}",
        design.family()
    );
    Ok(Some(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::init_test_logger;

    fn power(n: usize, alpha: f64, design: Design) -> f64 {
        compute_power(&PowerParameters::new(n, alpha, design))
    }

    #[test]
    fn default_bounds() {
        let t = SearchBounds::for_design(&Design::two_sample_t(0.5, false));
        assert_eq!((t.min_n, t.max_n, t.rescan_window), (2, 10_000, 10));
        let a = SearchBounds::for_design(&Design::one_way_anova(0.25, 3));
        assert_eq!((a.min_n, a.max_n), (2, 5_000));
        let r = SearchBounds::for_design(&Design::linear_regression(3, 0.2));
        assert_eq!((r.min_n, r.max_n), (5, 5_000));
    }

    #[test]
    fn two_sample_medium_effect() {
        init_test_logger();
        assert_eq!(find_sample_size(&Design::two_sample_t(0.5, false), 0.05, 0.8), Some(64));
    }

    #[test]
    fn paired_medium_effect() {
        assert_eq!(find_sample_size(&Design::paired_t(0.5, false), 0.05, 0.8), Some(34));
    }

    #[test]
    fn anova_three_groups() {
        assert_eq!(find_sample_size(&Design::one_way_anova(0.25, 3), 0.05, 0.8), Some(53));
    }

    #[test]
    fn regression_three_predictors() {
        assert_eq!(find_sample_size(&Design::linear_regression(3, 0.2), 0.05, 0.8), Some(52));
    }

    #[test]
    fn result_is_minimal() {
        let designs = [
            Design::two_sample_t(0.5, false),
            Design::two_sample_t(0.3, true),
            Design::paired_t(0.8, false),
            Design::one_way_anova(0.3, 4),
            Design::linear_regression(2, 0.1),
        ];
        for design in designs {
            for target in [0.5, 0.8, 0.9, 0.95] {
                let n = find_sample_size(&design, 0.05, target).unwrap();
                assert!(power(n, 0.05, design) >= target, "{design:?} {target}");
                if n > design.min_sample_size() {
                    assert!(power(n - 1, 0.05, design) < target, "{design:?} {target}");
                }
            }
        }
    }

    #[test]
    fn known_sizes_for_other_targets() {
        let d = Design::two_sample_t(0.5, false);
        assert_eq!(find_sample_size(&d, 0.05, 0.5), Some(32));
        assert_eq!(find_sample_size(&d, 0.05, 0.9), Some(86));
        assert_eq!(find_sample_size(&d, 0.05, 0.95), Some(105));
        let a = Design::one_way_anova(0.3, 4);
        assert_eq!(find_sample_size(&a, 0.05, 0.5), Some(18));
        assert_eq!(find_sample_size(&a, 0.05, 0.9), Some(41));
    }

    #[test]
    fn huge_effect_returns_lower_bound() {
        // Power at n = 2 is 0.30, so a 0.25 target is met immediately.
        assert_eq!(find_sample_size(&Design::two_sample_t(2.5, false), 0.05, 0.25), Some(2));
    }

    #[test]
    fn unreachable_target() {
        let d = Design::two_sample_t(0.01, false);
        assert_eq!(find_sample_size(&d, 0.05, 0.99), None);
        assert_eq!(try_find_sample_size(&d, 0.05, 0.99), Ok(None));
    }

    #[test]
    fn narrow_bounds() {
        let d = Design::two_sample_t(0.5, false);
        let bounds = SearchBounds::for_design(&d).with_max_n(50);
        assert_eq!(try_find_sample_size_within(&d, 0.05, 0.8, bounds), Ok(None));
        let bounds = bounds.with_min_n(60).with_max_n(70).with_rescan_window(0);
        assert_eq!(find_sample_size_within(&d, 0.05, 0.8, bounds), Some(64));
    }

    #[test]
    fn huge_predictor_count_is_rejected() {
        let design = Design::linear_regression(usize::MAX, 0.2);
        assert_eq!(SearchBounds::for_design(&design).min_n, usize::MAX);
        assert_eq!(find_sample_size(&design, 0.05, 0.8), None);
        assert!(matches!(
            try_find_sample_size(&design, 0.05, 0.8),
            Err(PowerError::InvalidInput(_))
        ));
    }

    #[test]
    fn invalid_inputs() {
        let d = Design::two_sample_t(0.5, false);
        assert!(try_find_sample_size(&d, 0.0, 0.8).is_err());
        assert!(try_find_sample_size(&d, 0.05, 1.0).is_err());
        assert!(try_find_sample_size(&d, 0.05, f64::NAN).is_err());
        assert!(try_find_sample_size(&Design::two_sample_t(-1.0, false), 0.05, 0.8).is_err());
        let inverted = SearchBounds::for_design(&d).with_min_n(100).with_max_n(10);
        assert!(try_find_sample_size_within(&d, 0.05, 0.8, inverted).is_err());
        assert_eq!(find_sample_size(&d, 1.5, 0.8), None);
    }
}
