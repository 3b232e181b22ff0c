//! Power analysis with JSON input/output.
//!
//! Parameters arrive as the serde form of [`PowerParameters`]:
//!
//! ```json
//! {"n": 30, "alpha": 0.05, "family": "two_sample_t", "effect_size": 0.5, "one_tailed": false}
//! ```
//!
//! and designs as the same object without `n` and `alpha`.

use serde::Serialize;

use powerlab_core::Result;
use powerlab_stats::curve::{self, PowerCurveWindow, PowerPoint};
use powerlab_stats::power::{self, DegreesOfFreedom, PowerAnalysis};
use powerlab_stats::report::PowerReport;
use powerlab_stats::sample_size;
use powerlab_stats::{Design, PowerParameters, Tail};

use crate::error::{parse_json, wasm_result};

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

// ── Wrapper types ────────────────────────────────────────────────────────

/// Flat mirror of [`PowerAnalysis`] for JavaScript callers.
#[derive(Debug, Serialize)]
pub struct JsPowerResult {
    pub family: String,
    pub power: f64,
    /// `[df]` for t-tests, `[df1, df2]` for F-tests.
    pub df: Vec<f64>,
    pub ncp: f64,
    pub critical_value: f64,
    pub one_tailed: bool,
}

impl From<PowerAnalysis> for JsPowerResult {
    fn from(a: PowerAnalysis) -> Self {
        let df = match a.df {
            DegreesOfFreedom::Single(df) => vec![df],
            DegreesOfFreedom::Pair { df1, df2 } => vec![df1, df2],
        };
        Self {
            family: a.family.name().to_string(),
            power: a.power,
            df,
            ncp: a.ncp,
            critical_value: a.critical_value,
            one_tailed: a.tail == Tail::Upper,
        }
    }
}

/// Power series around a chosen sample size.
#[derive(Debug, Serialize)]
pub struct JsPowerCurve {
    pub n: usize,
    pub min_n: usize,
    pub max_n: usize,
    pub step: usize,
    pub points: Vec<PowerPoint>,
}

/// Rendered power report.
#[derive(Debug, Serialize)]
pub struct JsPowerReport {
    pub title: String,
    pub text: String,
    pub power: f64,
    pub adequate: bool,
}

impl From<PowerReport> for JsPowerReport {
    fn from(r: PowerReport) -> Self {
        Self {
            title: r.title(),
            text: r.to_string(),
            power: r.power(),
            adequate: r.is_adequate(),
        }
    }
}

// ── JSON boundary functions ──────────────────────────────────────────────

fn parse_params(json: &str) -> Result<PowerParameters> {
    parse_json(json, "parameters")
}

fn parse_design(json: &str) -> Result<Design> {
    parse_json(json, "design")
}

/// Forward power calculation.
///
/// Output: JSON [`JsPowerResult`].
#[cfg_attr(feature = "wasm", wasm_bindgen)]
pub fn compute_power(params_json: &str) -> String {
    wasm_result(parse_params(params_json).and_then(|p| power::analyze(&p)).map(JsPowerResult::from))
}

/// Smallest sample size reaching `target_power`, or `{"ok": null}` when the
/// default search range is not enough.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
pub fn find_sample_size(design_json: &str, alpha: f64, target_power: f64) -> String {
    wasm_result(
        parse_design(design_json)
            .and_then(|d| sample_size::try_find_sample_size(&d, alpha, target_power)),
    )
}

/// Null and alternative density curves for plotting.
///
/// Output: JSON [`powerlab_stats::DistributionCurve`].
#[cfg_attr(feature = "wasm", wasm_bindgen)]
pub fn distribution_curve(params_json: &str) -> String {
    wasm_result(parse_params(params_json).and_then(|p| curve::distribution_curve(&p)))
}

/// Power against sample size on a grid chosen around `n`.
///
/// Output: JSON [`JsPowerCurve`].
#[cfg_attr(feature = "wasm", wasm_bindgen)]
pub fn power_curve(design_json: &str, alpha: f64, n: usize) -> String {
    wasm_result(parse_design(design_json).and_then(|d| {
        let window = PowerCurveWindow::around(n, &d);
        let points = curve::power_curve_around(&d, alpha, n)?;
        Ok(JsPowerCurve {
            n,
            min_n: window.min_n,
            max_n: window.max_n,
            step: window.step,
            points,
        })
    }))
}

/// Plain-text report of a power calculation.
///
/// Output: JSON [`JsPowerReport`].
#[cfg_attr(feature = "wasm", wasm_bindgen)]
pub fn power_report(params_json: &str) -> String {
    wasm_result(
        parse_params(params_json)
            .and_then(|p| PowerReport::new(&p))
            .map(JsPowerReport::from),
    )
}
