//! Test families and the parameter bundles that drive the power engine.
//!
//! A [`Design`] carries every family-specific field a calculation needs, so
//! nothing is defaulted inside the formulas. [`PowerParameters`] adds the
//! sample size and significance level and is validated once, at the
//! boundary, by [`PowerParameters::validate`].

use core::fmt;

use powerlab_core::{PowerError, Result};

/// The hypothesis tests supported by the power engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TestFamily {
    /// Independent two-sample t-test with equal group sizes.
    TwoSampleT,
    /// Paired (dependent samples) t-test.
    PairedT,
    /// One-way analysis of variance with equal group sizes.
    OneWayAnova,
    /// Overall F-test of a multiple linear regression.
    LinearRegression,
}

impl TestFamily {
    /// Every supported family.
    pub const ALL: [TestFamily; 4] = [
        TestFamily::TwoSampleT,
        TestFamily::PairedT,
        TestFamily::OneWayAnova,
        TestFamily::LinearRegression,
    ];

    /// Human-readable test name.
    pub fn name(&self) -> &'static str {
        match self {
            TestFamily::TwoSampleT => "Two-Sample t-Test",
            TestFamily::PairedT => "Paired t-Test",
            TestFamily::OneWayAnova => "One-Way ANOVA",
            TestFamily::LinearRegression => "Linear Regression",
        }
    }

    /// Whether the test statistic follows a t distribution.
    pub fn is_t_test(&self) -> bool {
        matches!(self, TestFamily::TwoSampleT | TestFamily::PairedT)
    }
}

impl fmt::Display for TestFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which side(s) of the null distribution form the rejection region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Tail {
    /// Reject for large statistics only. F-tests are always upper-tailed.
    Upper,
    /// Reject for large |t|.
    TwoSided,
}

/// Family-specific study design, without the sample size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "family", rename_all = "snake_case")
)]
pub enum Design {
    /// Two independent groups of `n` each; `effect_size` is Cohen's d.
    TwoSampleT { effect_size: f64, one_tailed: bool },
    /// `n` pairs; `effect_size` is Cohen's d of the differences.
    PairedT { effect_size: f64, one_tailed: bool },
    /// `groups` groups of `n` each; `effect_size` is Cohen's f.
    OneWayAnova { effect_size: f64, groups: usize },
    /// `n` observations and `predictors` regressors explaining `r2` of the variance.
    LinearRegression { predictors: usize, r2: f64 },
}

impl Design {
    /// Two-sample t-test design.
    pub fn two_sample_t(effect_size: f64, one_tailed: bool) -> Self {
        Design::TwoSampleT {
            effect_size,
            one_tailed,
        }
    }

    /// Paired t-test design.
    pub fn paired_t(effect_size: f64, one_tailed: bool) -> Self {
        Design::PairedT {
            effect_size,
            one_tailed,
        }
    }

    /// One-way ANOVA design.
    pub fn one_way_anova(effect_size: f64, groups: usize) -> Self {
        Design::OneWayAnova {
            effect_size,
            groups,
        }
    }

    /// Linear regression design.
    pub fn linear_regression(predictors: usize, r2: f64) -> Self {
        Design::LinearRegression { predictors, r2 }
    }

    /// The test family this design belongs to.
    pub fn family(&self) -> TestFamily {
        match self {
            Design::TwoSampleT { .. } => TestFamily::TwoSampleT,
            Design::PairedT { .. } => TestFamily::PairedT,
            Design::OneWayAnova { .. } => TestFamily::OneWayAnova,
            Design::LinearRegression { .. } => TestFamily::LinearRegression,
        }
    }

    /// Rejection region of the test.
    pub fn tail(&self) -> Tail {
        match self {
            Design::TwoSampleT { one_tailed, .. } | Design::PairedT { one_tailed, .. } => {
                if *one_tailed {
                    Tail::Upper
                } else {
                    Tail::TwoSided
                }
            }
            Design::OneWayAnova { .. } | Design::LinearRegression { .. } => Tail::Upper,
        }
    }

    /// Cohen's f² for regression designs, `r² / (1 - r²)`.
    pub fn cohens_f2(&self) -> Option<f64> {
        match self {
            Design::LinearRegression { r2, .. } => Some(r2 / (1.0 - r2)),
            _ => None,
        }
    }

    /// Smallest sample size that gives positive degrees of freedom.
    pub fn min_sample_size(&self) -> usize {
        match self {
            Design::LinearRegression { predictors, .. } => predictors.saturating_add(2),
            _ => 2,
        }
    }

    /// Check the family-specific fields.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Design::TwoSampleT { effect_size, .. } | Design::PairedT { effect_size, .. } => {
                check_effect_size(effect_size)
            }
            Design::OneWayAnova {
                effect_size,
                groups,
            } => {
                if groups < 2 {
                    return Err(PowerError::InvalidInput(
                        "number of groups must be at least 2".into(),
                    ));
                }
                check_effect_size(effect_size)
            }
            Design::LinearRegression { predictors, r2 } => {
                if predictors < 1 {
                    return Err(PowerError::InvalidInput(
                        "number of predictors must be at least 1".into(),
                    ));
                }
                if !(r2 > 0.0 && r2 < 1.0) {
                    return Err(PowerError::InvalidInput(
                        "R² must be between 0 and 1".into(),
                    ));
                }
                Ok(())
            }
        }
    }
}

fn check_effect_size(effect_size: f64) -> Result<()> {
    if effect_size > 0.0 && effect_size.is_finite() {
        Ok(())
    } else {
        Err(PowerError::InvalidInput("effect size must be positive".into()))
    }
}

/// Check a significance level or target power lies strictly inside (0, 1).
pub(crate) fn check_unit_interval(value: f64, what: &str) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(PowerError::InvalidInput(format!(
            "{what} must be between 0 and 1"
        )))
    }
}

/// Complete input of a forward power calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerParameters {
    /// Sample size per group (total observations for regression).
    pub n: usize,
    /// Significance level in (0, 1).
    pub alpha: f64,
    /// Family-specific fields.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub design: Design,
}

impl PowerParameters {
    /// Bundle a sample size, significance level and design.
    pub fn new(n: usize, alpha: f64, design: Design) -> Self {
        Self { n, alpha, design }
    }

    /// The same parameters at a different sample size.
    pub fn with_n(&self, n: usize) -> Self {
        Self { n, ..*self }
    }

    /// The test family of the design.
    pub fn family(&self) -> TestFamily {
        self.design.family()
    }

    /// Check every domain guard of the power engine.
    ///
    /// # Errors
    ///
    /// Returns [`PowerError::InvalidInput`] naming the first violated guard.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(PowerError::InvalidInput(
                "sample size must be positive".into(),
            ));
        }
        check_unit_interval(self.alpha, "significance level")?;
        self.design.validate()?;

        match self.design {
            Design::LinearRegression { predictors, .. } => {
                if self.n.saturating_sub(1) <= predictors {
                    return Err(PowerError::InvalidInput(
                        "sample size must be greater than number of predictors + 1".into(),
                    ));
                }
            }
            _ => {
                if self.n < 2 {
                    return Err(PowerError::InvalidInput(
                        "sample size must be at least 2".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}
