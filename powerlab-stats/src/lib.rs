//! Statistical power analysis for the common parametric tests.
//!
//! - **Distributions**: central and non-central Student-t and F
//! - **Power**: forward power of two-sample and paired t-tests, one-way
//!   ANOVA and the overall F-test of a linear regression
//! - **Sample size**: smallest `n` reaching a target power
//! - **Curves**: null/alternative densities and power-vs-`n` series
//! - **Reports**: plain-text summaries of the above
//!
//! ```
//! use powerlab_stats::{compute_power, find_sample_size, Design, PowerParameters};
//!
//! let design = Design::two_sample_t(0.5, false);
//! let power = compute_power(&PowerParameters::new(30, 0.05, design));
//! assert!((power - 0.478).abs() < 1e-3);
//! assert_eq!(find_sample_size(&design, 0.05, 0.8), Some(64));
//! ```

pub mod curve;
pub mod design;
pub mod distribution;
pub mod power;
pub mod report;
pub mod sample_size;

pub use curve::{
    distribution_curve, distribution_curve_with, power_curve, power_curve_around, CurvePoint,
    DistributionCurve, PowerCurveWindow, PowerPoint, DEFAULT_CURVE_POINTS, MAX_POWER_CURVE_POINTS,
};
pub use design::{Design, PowerParameters, Tail, TestFamily};
pub use distribution::{Distribution, FisherF, StudentT};
pub use power::{
    analyze, compute_power, critical_value, degrees_of_freedom, noncentrality, try_compute_power,
    DegreesOfFreedom, PowerAnalysis,
};
pub use report::{PowerReport, SampleSizeReport, RECOMMENDED_POWER};
pub use sample_size::{
    find_sample_size, find_sample_size_within, try_find_sample_size, try_find_sample_size_within,
    SearchBounds, DEFAULT_RESCAN_WINDOW,
};

#[cfg(test)]
pub(crate) mod test_util {
    use std::io::Write;
    use std::sync::Once;

    use env_logger::Builder;
    use log::LevelFilter;

    static INIT: Once = Once::new();

    /// Route `log` output through the test harness once per process.
    pub fn init_test_logger() {
        INIT.call_once(|| {
            let _ = Builder::new()
                .is_test(true)
                .filter_level(LevelFilter::Trace)
                .format(|buf, record| {
                    writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
                })
                .try_init();
        });
    }
}
