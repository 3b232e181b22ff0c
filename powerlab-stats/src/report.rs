//! Human-readable summaries of power and sample-size results.

use core::fmt;

use powerlab_core::{Result, Summarizable};

use crate::design::{Design, PowerParameters};
use crate::power::{analyze, PowerAnalysis};

/// Conventional minimum power for a well-designed study.
pub const RECOMMENDED_POWER: f64 = 0.8;

/// Power result together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerReport {
    /// Inputs of the calculation.
    pub params: PowerParameters,
    /// Derived quantities and the resulting power.
    pub analysis: PowerAnalysis,
}

impl PowerReport {
    /// Run the analysis and keep it alongside its parameters.
    ///
    /// # Errors
    ///
    /// Fails when [`analyze`] does.
    pub fn new(params: &PowerParameters) -> Result<Self> {
        Ok(Self {
            params: *params,
            analysis: analyze(params)?,
        })
    }

    /// Computed power.
    pub fn power(&self) -> f64 {
        self.analysis.power
    }

    /// Whether power reaches [`RECOMMENDED_POWER`].
    pub fn is_adequate(&self) -> bool {
        self.analysis.power >= RECOMMENDED_POWER
    }

    /// Heading naming the test, e.g. "Power Analysis for a Paired t-Test".
    pub fn title(&self) -> String {
        format!("Power Analysis for {}", with_article(&self.params.design))
    }
}

fn with_article(design: &Design) -> String {
    match design {
        Design::LinearRegression { .. } => design.family().name().to_string(),
        _ => format!("a {}", design.family().name()),
    }
}

impl fmt::Display for PowerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let power = self.analysis.power;
        writeln!(f, "{}", self.title())?;
        writeln!(f)?;
        writeln!(f, "Computed Power = {power:.4}")?;
        writeln!(f, "Parameters:")?;
        writeln!(f, "  Sample Size per group (n): {}", self.params.n)?;
        match self.params.design {
            Design::TwoSampleT {
                effect_size,
                one_tailed,
            }
            | Design::PairedT {
                effect_size,
                one_tailed,
            } => {
                writeln!(f, "  Effect Size (Cohen's d): {effect_size:.4}")?;
                let tails = if one_tailed { "One-tailed" } else { "Two-tailed" };
                writeln!(f, "  Test type: {tails}")?;
            }
            Design::OneWayAnova {
                effect_size,
                groups,
            } => {
                writeln!(f, "  Number of groups (k): {groups}")?;
                writeln!(f, "  Effect Size (Cohen's f): {effect_size:.4}")?;
            }
            Design::LinearRegression { predictors, r2 } => {
                writeln!(f, "  Number of predictors: {predictors}")?;
                writeln!(f, "  R²: {r2:.4}")?;
                writeln!(f, "  Effect size (f²): {:.4}", r2 / (1.0 - r2))?;
            }
        }
        writeln!(f, "  Significance level (α): {:.3}", self.params.alpha)?;
        writeln!(f)?;
        writeln!(f, "Interpretation:")?;
        let pct = power * 100.0;
        if self.is_adequate() {
            write!(
                f,
                "  The current power ({pct:.1}%) meets or exceeds the commonly recommended 80% threshold."
            )
        } else {
            writeln!(
                f,
                "  The current power ({pct:.1}%) is below the commonly recommended 80% threshold."
            )?;
            write!(
                f,
                "  Consider increasing sample size or expecting a larger effect size."
            )
        }
    }
}

impl Summarizable for PowerReport {
    fn summary(&self) -> String {
        self.analysis.summary()
    }
}

/// Outcome of a sample-size search phrased for display.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSizeReport {
    /// Power the search aimed for.
    pub target_power: f64,
    /// Smallest sufficient sample size, `None` when unreachable.
    pub n: Option<usize>,
}

impl SampleSizeReport {
    /// Wrap the result of a sample-size search.
    pub fn new(target_power: f64, n: Option<usize>) -> Self {
        Self { target_power, n }
    }
}

impl fmt::Display for SampleSizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            Some(n) => write!(
                f,
                "Required sample size to achieve {:.0}% power: n = {n}",
                self.target_power * 100.0
            ),
            None => write!(
                f,
                "Unable to reach {:.0}% power within the searched sample sizes.",
                self.target_power * 100.0
            ),
        }
    }
}

impl Summarizable for SampleSizeReport {
    fn summary(&self) -> String {
        self.to_string()
    }
}
