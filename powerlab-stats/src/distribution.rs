//! Central and non-central Student-t and F distributions.
//!
//! Provides the [`Distribution`] trait and its two implementations,
//! [`StudentT`] and [`FisherF`]. Each covers both the central case
//! (`ncp == 0`) and the non-central case, so power calculations can call a
//! single `cdf` and get the exact central path when the effect is zero.
//!
//! Special functions (regularized incomplete beta, ln Γ, erfc) and the central
//! CDF/PDF come from [`statrs`]. The non-central CDFs use the classic series:
//!
//! - non-central t: Lenth (1989), AS 243, twin series in the incomplete beta
//!   function, with a normal approximation for huge `df` or `ncp`;
//! - non-central F: Poisson mixture of incomplete beta functions summed upward
//!   from near the Poisson mode (AS 226 with Frick's AS R84 modification).
//!
//! Nothing here returns an error. Out-of-domain parameters (`df <= 0`, NaN,
//! negative F non-centrality) yield `NaN`, so a search loop can keep probing
//! other candidates.

use core::f64::consts::{FRAC_1_SQRT_2, LN_2, PI};

use log::warn;
use statrs::distribution::{Continuous, ContinuousCDF, FisherSnedecor, StudentsT};
use statrs::function::beta::checked_beta_reg;
use statrs::function::erf::erfc;
use statrs::function::gamma::ln_gamma;

/// ln(√π)
const LN_SQRT_PI: f64 = 0.572_364_942_924_700_1;
/// √(2/π)
const SQRT_2_OVER_PI: f64 = 0.797_884_560_802_865_4;

const QUANTILE_MAX_ITER: usize = 200;
const QUANTILE_NEWTON_STEPS: usize = 6;
const QUANTILE_REL_TOL: f64 = 1e-12;
const BRACKET_MAX_STEPS: usize = 1000;

const NCT_MAX_ITER: usize = 1000;
const NCT_ERR_MAX: f64 = 1e-12;

const NCF_MAX_ITER: f64 = 10_000.0;
const NCF_ERR_MAX: f64 = 1e-9;

const NCBETA_PDF_EPS: f64 = 1e-15;
const NCBETA_PDF_MAX_TERMS: usize = 100_000;

// ── Numerical helpers ──────────────────────────────────────────────────────

/// Standard normal CDF Φ(x).
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal density φ(x).
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Regularized incomplete beta function I_x(a, b).
///
/// Returns `NaN` when `a <= 0`, `b <= 0` or `x ∉ [0, 1]`.
pub fn beta_reg(a: f64, b: f64, x: f64) -> f64 {
    checked_beta_reg(a, b, x).unwrap_or(f64::NAN)
}

/// Log density of Beta(a, b) at `x ∈ (0, 1)`.
fn ln_beta_pdf(x: f64, a: f64, b: f64) -> f64 {
    (a - 1.0) * x.ln() + (b - 1.0) * (-x).ln_1p() - (ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b))
}

/// Log Poisson mass at `k` for rate `lambda > 0`.
fn ln_poisson_pmf(k: f64, lambda: f64) -> f64 {
    if k == 0.0 {
        -lambda
    } else {
        -lambda + k * lambda.ln() - ln_gamma(k + 1.0)
    }
}

/// Map the probability edges shared by every quantile function.
///
/// `NaN` or `p ∉ [0, 1]` give `NaN`, `p == 0` the lower end of the support and
/// `p == 1` gives `+∞`. Returns `None` for an interior `p`.
fn quantile_edge(p: f64, support_min: f64) -> Option<f64> {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        Some(f64::NAN)
    } else if p == 0.0 {
        Some(support_min)
    } else if p == 1.0 {
        Some(f64::INFINITY)
    } else {
        None
    }
}

/// Central quantile from statrs, polished with Newton steps against the CDF.
fn central_quantile<D>(dist: &D, p: f64) -> f64
where
    D: Continuous<f64, f64> + ContinuousCDF<f64, f64>,
{
    let mut x = dist.inverse_cdf(p);
    let mut err = dist.cdf(x) - p;
    for _ in 0..QUANTILE_NEWTON_STEPS {
        let density = dist.pdf(x);
        if err == 0.0 || !(density > 0.0 && density.is_finite()) {
            break;
        }
        let next = x - err / density;
        if !next.is_finite() {
            break;
        }
        // Stop if the step leaves the support or overshoots.
        let next_err = dist.cdf(next) - p;
        if next_err.abs() >= err.abs() {
            break;
        }
        x = next;
        err = next_err;
    }
    x
}

/// Invert a non-central CDF by bracketing and bisection.
///
/// statrs has no non-central t or F, so their quantiles are found here.
/// `p` must lie strictly inside (0, 1). `support_min` is the lower end of the
/// support (`-∞` for the t family, `0` for F). Returns `NaN` if the CDF is
/// undefined or no bracket is found.
fn invert_cdf<F>(cdf: F, p: f64, support_min: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let bounded_below = support_min.is_finite();
    let mut lo = if bounded_below { support_min } else { -1.0 };
    let mut hi = lo.max(0.0) + 1.0;
    let mut steps = 0;

    if !bounded_below {
        loop {
            let c = cdf(lo);
            if c.is_nan() {
                return f64::NAN;
            }
            if c <= p {
                break;
            }
            hi = lo;
            lo *= 2.0;
            steps += 1;
            if steps > BRACKET_MAX_STEPS {
                return f64::NAN;
            }
        }
    }
    loop {
        let c = cdf(hi);
        if c.is_nan() {
            return f64::NAN;
        }
        if c >= p {
            break;
        }
        lo = hi;
        hi *= 2.0;
        steps += 1;
        if steps > BRACKET_MAX_STEPS {
            return f64::NAN;
        }
    }

    for _ in 0..QUANTILE_MAX_ITER {
        let mid = 0.5 * (lo + hi);
        if cdf(mid) < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= QUANTILE_REL_TOL * hi.abs().max(1.0) {
            break;
        }
    }
    0.5 * (lo + hi)
}

// ── Distribution trait ─────────────────────────────────────────────────────

/// A continuous distribution used by the power engine.
///
/// All methods return `NaN` rather than failing when the distribution's
/// parameters are out of domain.
pub trait Distribution {
    /// Probability density at `x`.
    fn pdf(&self, x: f64) -> f64;

    /// Cumulative distribution function at `x`.
    fn cdf(&self, x: f64) -> f64;

    /// Inverse CDF: the smallest `x` with `cdf(x) >= p`.
    fn quantile(&self, p: f64) -> f64;

    /// Distribution mean.
    fn mean(&self) -> f64;

    /// Distribution variance.
    fn variance(&self) -> f64;

    /// Distribution standard deviation (default: sqrt of variance).
    fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

// ── Student-t ──────────────────────────────────────────────────────────────

/// Student-t distribution with `df` degrees of freedom and non-centrality
/// `ncp` (zero for the central distribution).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudentT {
    df: f64,
    ncp: f64,
}

impl StudentT {
    /// Central t with `df` degrees of freedom.
    pub fn central(df: f64) -> Self {
        Self { df, ncp: 0.0 }
    }

    /// Non-central t. `ncp` may be negative.
    pub fn noncentral(df: f64, ncp: f64) -> Self {
        Self { df, ncp }
    }

    /// Degrees of freedom.
    pub fn df(&self) -> f64 {
        self.df
    }

    /// Non-centrality parameter.
    pub fn ncp(&self) -> f64 {
        self.ncp
    }

    /// Whether this is the central distribution.
    pub fn is_central(&self) -> bool {
        self.ncp == 0.0
    }

    fn is_valid(&self) -> bool {
        self.df > 0.0 && self.ncp.is_finite()
    }
}

impl Distribution for StudentT {
    fn pdf(&self, x: f64) -> f64 {
        if !self.is_valid() || x.is_nan() {
            return f64::NAN;
        }
        if self.is_central() {
            return StudentsT::new(0.0, 1.0, self.df).map_or(f64::NAN, |t| t.pdf(x));
        }
        noncentral_t_pdf(x, self.df, self.ncp)
    }

    fn cdf(&self, x: f64) -> f64 {
        if !self.is_valid() || x.is_nan() {
            return f64::NAN;
        }
        if self.is_central() {
            return StudentsT::new(0.0, 1.0, self.df).map_or(f64::NAN, |t| t.cdf(x));
        }
        noncentral_t_cdf(x, self.df, self.ncp)
    }

    fn quantile(&self, p: f64) -> f64 {
        if !self.is_valid() {
            return f64::NAN;
        }
        if let Some(edge) = quantile_edge(p, f64::NEG_INFINITY) {
            return edge;
        }
        if self.is_central() {
            return StudentsT::new(0.0, 1.0, self.df).map_or(f64::NAN, |t| central_quantile(&t, p));
        }
        invert_cdf(|x| self.cdf(x), p, f64::NEG_INFINITY)
    }

    fn mean(&self) -> f64 {
        if !self.is_valid() || self.df <= 1.0 {
            return f64::NAN;
        }
        if self.is_central() {
            return 0.0;
        }
        let df = self.df;
        self.ncp * (df / 2.0).sqrt() * (ln_gamma((df - 1.0) / 2.0) - ln_gamma(df / 2.0)).exp()
    }

    fn variance(&self) -> f64 {
        if !self.is_valid() || self.df <= 1.0 {
            return f64::NAN;
        }
        if self.df <= 2.0 {
            return f64::INFINITY;
        }
        let df = self.df;
        let mean = self.mean();
        df * (1.0 + self.ncp * self.ncp) / (df - 2.0) - mean * mean
    }
}

/// Non-central t CDF, AS 243.
fn noncentral_t_cdf(t: f64, df: f64, ncp: f64) -> f64 {
    if t == f64::INFINITY {
        return 1.0;
    }
    if t == f64::NEG_INFINITY {
        return 0.0;
    }

    // Left tail: P(T <= t; ncp) = 1 - P(T <= -t; -ncp). Extreme left tails
    // are bounded by P(T <= 0) = Φ(-ncp) and return 0 directly.
    let (negdel, tt, del) = if t >= 0.0 {
        (false, t, ncp)
    } else {
        if ncp > 40.0 {
            return 0.0;
        }
        (true, -t, -ncp)
    };

    if df > 4e5 || del * del > 2.0 * LN_2 * 1021.0 {
        // Abramowitz & Stegun 26.7.10
        let s = 1.0 / (4.0 * df);
        let z = (tt * (1.0 - s) - del) / (1.0 + tt * tt * 2.0 * s).sqrt();
        let p = normal_cdf(z);
        return if negdel { 1.0 - p } else { p };
    }

    let x = t * t / (t * t + df);
    let mut tnc = 0.0;
    if x > 0.0 {
        let lambda = del * del;
        let mut p = 0.5 * (-0.5 * lambda).exp();
        if p == 0.0 {
            warn!("noncentral_t_cdf: Poisson weight underflow (df={df}, ncp={ncp})");
            return if negdel { 1.0 } else { 0.0 };
        }
        let mut q = SQRT_2_OVER_PI * p * del;
        let mut s = 0.5 - p;
        if s < 1e-7 {
            s = -0.5 * (-0.5 * lambda).exp_m1();
        }
        let mut a = 0.5;
        let b = 0.5 * df;
        let rxb = (df / (t * t + df)).powf(b);
        let albeta = LN_SQRT_PI + ln_gamma(b) - ln_gamma(0.5 + b);
        let mut xodd = beta_reg(a, b, x);
        let mut godd = 2.0 * rxb * (a * x.ln() - albeta).exp();
        let bx = b * x;
        let mut xeven = if bx < f64::EPSILON { bx } else { 1.0 - rxb };
        let mut geven = bx * rxb;
        tnc = p * xodd + q * xeven;

        let mut converged = false;
        for it in 1..=NCT_MAX_ITER {
            let it = it as f64;
            a += 1.0;
            xodd -= godd;
            xeven -= geven;
            godd *= x * (a + b - 1.0) / a;
            geven *= x * (a + b - 0.5) / (a + 0.5);
            p *= lambda / (2.0 * it);
            q *= lambda / (2.0 * it + 1.0);
            tnc += p * xodd + q * xeven;
            s -= p;
            if s < -1e-10 {
                warn!("noncentral_t_cdf: rounding error in series (t={t}, df={df}, ncp={ncp})");
                converged = true;
                break;
            }
            if s <= 0.0 && it > 1.0 {
                converged = true;
                break;
            }
            let errbd = 2.0 * s * (xodd - godd);
            if errbd.abs() < NCT_ERR_MAX {
                converged = true;
                break;
            }
        }
        if !converged {
            warn!("noncentral_t_cdf: series did not converge (t={t}, df={df}, ncp={ncp})");
        }
    }

    let tnc = (tnc + normal_cdf(-del)).clamp(0.0, 1.0);
    if negdel {
        1.0 - tnc
    } else {
        tnc
    }
}

/// Non-central t density from the CDF recurrence
/// `f(x) = df/x · [F(x·√(1+2/df); df+2) - F(x; df)]`.
fn noncentral_t_pdf(x: f64, df: f64, ncp: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    if df > 1e8 {
        return normal_pdf(x - ncp);
    }
    if x.abs() > (df * f64::EPSILON).sqrt() {
        let upper = noncentral_t_cdf(x * ((df + 2.0) / df).sqrt(), df + 2.0, ncp);
        let lower = noncentral_t_cdf(x, df, ncp);
        let u = df.ln() - x.abs().ln() + (upper - lower).abs().ln();
        u.exp()
    } else {
        let u = ln_gamma((df + 1.0) / 2.0)
            - ln_gamma(df / 2.0)
            - (LN_SQRT_PI + 0.5 * (df.ln() + ncp * ncp));
        u.exp()
    }
}

// ── F ──────────────────────────────────────────────────────────────────────

/// F-distribution with `df1` and `df2` degrees of freedom and non-centrality
/// `ncp >= 0` (zero for the central distribution).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FisherF {
    df1: f64,
    df2: f64,
    ncp: f64,
}

impl FisherF {
    /// Central F with `df1` and `df2` degrees of freedom.
    pub fn central(df1: f64, df2: f64) -> Self {
        Self { df1, df2, ncp: 0.0 }
    }

    /// Non-central F. `ncp` must be non-negative.
    pub fn noncentral(df1: f64, df2: f64, ncp: f64) -> Self {
        Self { df1, df2, ncp }
    }

    /// Numerator degrees of freedom.
    pub fn df1(&self) -> f64 {
        self.df1
    }

    /// Denominator degrees of freedom.
    pub fn df2(&self) -> f64 {
        self.df2
    }

    /// Non-centrality parameter.
    pub fn ncp(&self) -> f64 {
        self.ncp
    }

    /// Whether this is the central distribution.
    pub fn is_central(&self) -> bool {
        self.ncp == 0.0
    }

    fn is_valid(&self) -> bool {
        self.df1 > 0.0 && self.df2 > 0.0 && self.ncp >= 0.0 && self.ncp.is_finite()
    }
}

impl Distribution for FisherF {
    fn pdf(&self, x: f64) -> f64 {
        if !self.is_valid() || x.is_nan() {
            return f64::NAN;
        }
        if x < 0.0 || x == f64::INFINITY {
            return 0.0;
        }
        if x == 0.0 {
            // Only the Poisson k = 0 term can be non-zero at the origin.
            return if self.df1 < 2.0 {
                f64::INFINITY
            } else if self.df1 == 2.0 {
                (-0.5 * self.ncp).exp()
            } else {
                0.0
            };
        }
        if self.is_central() {
            return FisherSnedecor::new(self.df1, self.df2).map_or(f64::NAN, |f| f.pdf(x));
        }
        noncentral_f_pdf(x, self.df1, self.df2, self.ncp)
    }

    fn cdf(&self, x: f64) -> f64 {
        if !self.is_valid() || x.is_nan() {
            return f64::NAN;
        }
        if x <= 0.0 {
            return 0.0;
        }
        if x == f64::INFINITY {
            return 1.0;
        }
        if self.is_central() {
            return FisherSnedecor::new(self.df1, self.df2).map_or(f64::NAN, |f| f.cdf(x));
        }
        noncentral_f_cdf(x, self.df1, self.df2, self.ncp)
    }

    fn quantile(&self, p: f64) -> f64 {
        if !self.is_valid() {
            return f64::NAN;
        }
        if let Some(edge) = quantile_edge(p, 0.0) {
            return edge;
        }
        if self.is_central() {
            return FisherSnedecor::new(self.df1, self.df2)
                .map_or(f64::NAN, |f| central_quantile(&f, p));
        }
        invert_cdf(|x| self.cdf(x), p, 0.0)
    }

    fn mean(&self) -> f64 {
        if !self.is_valid() {
            return f64::NAN;
        }
        if self.df2 > 2.0 {
            self.df2 * (self.df1 + self.ncp) / (self.df1 * (self.df2 - 2.0))
        } else {
            f64::INFINITY
        }
    }

    fn variance(&self) -> f64 {
        if !self.is_valid() {
            return f64::NAN;
        }
        if self.df2 > 4.0 {
            let (d1, d2, l) = (self.df1, self.df2, self.ncp);
            2.0 * (d2 / d1).powi(2) * ((d1 + l).powi(2) + (d1 + 2.0 * l) * (d2 - 2.0))
                / ((d2 - 2.0).powi(2) * (d2 - 4.0))
        } else {
            f64::INFINITY
        }
    }
}

/// Non-central F CDF via the non-central beta distribution.
fn noncentral_f_cdf(x: f64, df1: f64, df2: f64, ncp: f64) -> f64 {
    let y = df1 / df2 * x;
    noncentral_beta_cdf(y / (1.0 + y), 1.0 / (1.0 + y), df1 / 2.0, df2 / 2.0, ncp)
}

/// Non-central beta CDF; `o_x = 1 - x` is passed separately for accuracy
/// near 1.
fn noncentral_beta_cdf(x: f64, o_x: f64, a: f64, b: f64, ncp: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if o_x <= 0.0 {
        return 1.0;
    }

    let c = ncp / 2.0;

    // Start at the Poisson term x0 ≈ c - 7√c; the mass below it is negligible.
    let x0 = (c - 7.0 * c.sqrt()).max(0.0).floor();
    let a0 = a + x0;
    let ln_beta = ln_gamma(a0) + ln_gamma(b) - ln_gamma(a0 + b);
    let mut temp = beta_reg(a0, b, x);
    let ln_o_x = if x < 0.5 { (-x).ln_1p() } else { o_x.ln() };
    let mut gx = (a0 * x.ln() + b * ln_o_x - ln_beta - a0.ln()).exp();
    let mut q = if a0 > a {
        (-c + x0 * c.ln() - ln_gamma(x0 + 1.0)).exp()
    } else {
        (-c).exp()
    };
    let mut sumq = 1.0 - q;
    let mut ans = q * temp;

    let mut j = x0;
    loop {
        j += 1.0;
        temp -= gx;
        gx *= x * (a + b + j - 1.0) / (a + j);
        q *= c / j;
        sumq -= q;
        ans += temp * q;
        let errbd = (temp - gx) * sumq;
        if errbd <= NCF_ERR_MAX {
            break;
        }
        if j >= NCF_MAX_ITER + x0 {
            warn!("noncentral_beta_cdf: series did not converge (a={a}, b={b}, ncp={ncp})");
            break;
        }
    }

    ans.clamp(0.0, 1.0)
}

/// Non-central F density, `x > 0`.
fn noncentral_f_pdf(x: f64, df1: f64, df2: f64, ncp: f64) -> f64 {
    let y = df1 / df2 * x;
    let z = noncentral_beta_pdf(y / (1.0 + y), df1 / 2.0, df2 / 2.0, ncp);
    z * (df1 / df2) / (1.0 + y) / (1.0 + y)
}

/// Non-central beta density for `x ∈ (0, 1)` and `ncp > 0`, summed outward
/// from the largest Poisson-weighted term.
fn noncentral_beta_pdf(x: f64, a: f64, b: f64, ncp: f64) -> f64 {
    let ncp2 = 0.5 * ncp;
    let dx2 = ncp2 * x;
    let d = (dx2 - a - 1.0) / 2.0;
    let disc = d * d + dx2 * (a + b) - a;
    let k_max = if disc <= 0.0 {
        0.0
    } else {
        (d + disc.sqrt()).ceil().max(0.0)
    };

    let ln_term = ln_beta_pdf(x, a + k_max, b);
    let ln_weight = ln_poisson_pmf(k_max, ncp2);
    if !ln_term.is_finite() || !ln_weight.is_finite() {
        return (ln_weight + ln_term).exp();
    }

    let mut sum = 1.0;
    let mut term = 1.0;
    let mut k = k_max;
    while k > 0.0 && term > sum * NCBETA_PDF_EPS {
        k -= 1.0;
        term *= (k + 1.0) * (k + a) / (k + a + b) / dx2;
        sum += term;
    }

    term = 1.0;
    k = k_max;
    for _ in 0..NCBETA_PDF_MAX_TERMS {
        term *= dx2 * (k + a + b) / (k + a) / (k + 1.0);
        k += 1.0;
        sum += term;
        if term <= sum * NCBETA_PDF_EPS {
            break;
        }
    }

    (ln_weight + ln_term + sum.ln()).exp()
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    /// Trapezoid integral of `f` over `[a, b]`.
    fn integrate<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, steps: usize) -> f64 {
        let h = (b - a) / steps as f64;
        let mut sum = 0.5 * (f(a) + f(b));
        for i in 1..steps {
            sum += f(a + i as f64 * h);
        }
        sum * h
    }

    #[test]
    fn normal_cdf_known_values() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-12);
        assert!((normal_cdf(1.0) - 0.841_344_746_068_543).abs() < 1e-9);
        assert!((normal_cdf(-1.96) - 0.024_997_895_148_220_4).abs() < 1e-9);
    }

    #[test]
    fn beta_reg_uniform_and_domain() {
        assert!((beta_reg(1.0, 1.0, 0.3) - 0.3).abs() < 1e-12);
        assert!(beta_reg(0.0, 1.0, 0.5).is_nan());
        assert!(beta_reg(1.0, 1.0, 1.5).is_nan());
    }

    // ── Student-t ──────────────────────────────────────────────────────

    #[test]
    fn central_t_cdf_symmetric() {
        let t = StudentT::central(7.0);
        assert!((t.cdf(0.0) - 0.5).abs() < 1e-12);
        assert!((t.cdf(1.3) + t.cdf(-1.3) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn central_t_quantiles() {
        assert!((StudentT::central(10.0).quantile(0.975) - 2.228_138_852).abs() < 1e-7);
        assert!((StudentT::central(58.0).quantile(0.975) - 2.001_717_484).abs() < 1e-7);
        assert!((StudentT::central(19.0).quantile(0.95) - 1.729_132_812).abs() < 1e-7);
    }

    #[test]
    fn t_quantile_edges() {
        let t = StudentT::central(5.0);
        assert_eq!(t.quantile(0.0), f64::NEG_INFINITY);
        assert_eq!(t.quantile(1.0), f64::INFINITY);
        assert!(t.quantile(1.5).is_nan());
        assert!(t.quantile(f64::NAN).is_nan());
        assert!(t.quantile(0.5).abs() < 1e-8);
    }

    #[test]
    fn noncentral_t_zero_ncp_is_central() {
        let central = StudentT::central(12.0);
        let zero = StudentT::noncentral(12.0, 0.0);
        for &x in &[-3.0, -1.0, 0.0, 0.5, 2.2] {
            assert_eq!(central.cdf(x), zero.cdf(x));
        }
    }

    #[test]
    fn noncentral_t_reference_values() {
        assert!((StudentT::noncentral(10.0, 1.0).cdf(2.0) - 0.807_611_562_53).abs() < 1e-8);
        assert!((StudentT::noncentral(10.0, 1.0).cdf(-1.0) - 0.026_801_856_77).abs() < 1e-8);
        assert!((StudentT::noncentral(3.0, -2.0).cdf(0.5) - 0.992_199_698_92).abs() < 1e-8);
    }

    #[test]
    fn noncentral_t_at_zero_is_normal_tail() {
        // P(T <= 0) = Φ(-ncp) for every df.
        let t = StudentT::noncentral(7.0, 1.3);
        assert!((t.cdf(0.0) - normal_cdf(-1.3)).abs() < 1e-12);
    }

    #[test]
    fn noncentral_t_large_df_approaches_normal() {
        let t = StudentT::noncentral(1e4, 1.0);
        assert!((t.cdf(2.0) - normal_cdf(1.0)).abs() < 1e-3);
        // Past 4e5 df the normal approximation branch is used.
        let t = StudentT::noncentral(1e6, 1.0);
        assert!((t.cdf(2.0) - normal_cdf(1.0)).abs() < 1e-5);
    }

    #[test]
    fn noncentral_t_cdf_monotone() {
        let t = StudentT::noncentral(15.0, 2.5);
        let mut prev = 0.0;
        for i in -40..=80 {
            let c = t.cdf(i as f64 * 0.1);
            assert!(c >= prev - 1e-12, "cdf decreased at x={}", i as f64 * 0.1);
            assert!((0.0..=1.0).contains(&c));
            prev = c;
        }
    }

    #[test]
    fn noncentral_t_pdf_integrates_to_cdf() {
        let t = StudentT::noncentral(9.0, 1.5);
        let mass = integrate(|x| t.pdf(x), -1.0, 3.0, 4000);
        assert!((mass - (t.cdf(3.0) - t.cdf(-1.0))).abs() < 1e-5, "mass={}", mass);
    }

    #[test]
    fn t_moments() {
        let t = StudentT::central(6.0);
        assert_eq!(t.mean(), 0.0);
        assert!((t.variance() - 1.5).abs() < TOL);
        assert!(StudentT::central(1.0).mean().is_nan());
        assert_eq!(StudentT::central(2.0).variance(), f64::INFINITY);

        // Mean of the non-central t exceeds ncp for small df.
        let nct = StudentT::noncentral(10.0, 2.0);
        assert!(nct.mean() > 2.0);
        assert!(nct.variance() > 1.0);
    }

    #[test]
    fn t_invalid_df_is_nan() {
        assert!(StudentT::central(0.0).cdf(1.0).is_nan());
        assert!(StudentT::noncentral(-3.0, 1.0).cdf(1.0).is_nan());
        assert!(StudentT::central(0.0).pdf(1.0).is_nan());
        assert!(StudentT::central(0.0).quantile(0.5).is_nan());
        assert!(StudentT::noncentral(5.0, f64::NAN).cdf(1.0).is_nan());
    }

    // ── F ──────────────────────────────────────────────────────────────

    #[test]
    fn central_f_quantiles() {
        assert!((FisherF::central(2.0, 87.0).quantile(0.95) - 3.101_295_757).abs() < 1e-6);
        assert!((FisherF::central(5.0, 10.0).quantile(0.95) - 3.325_834_530).abs() < 1e-6);
    }

    #[test]
    fn central_quantiles_invert_cdf() {
        for p in [0.001, 0.05, 0.5, 0.9, 0.975, 0.999] {
            let t = StudentT::central(3.0);
            assert!((t.cdf(t.quantile(p)) - p).abs() < 1e-10, "t p={p}");
            let f = FisherF::central(4.0, 20.0);
            assert!((f.cdf(f.quantile(p)) - p).abs() < 1e-10, "F p={p}");
        }
    }

    #[test]
    fn noncentral_quantiles_invert_cdf() {
        let t = StudentT::noncentral(10.0, 1.0);
        let f = FisherF::noncentral(4.0, 20.0, 10.0);
        for p in [0.05, 0.5, 0.95] {
            assert!((t.cdf(t.quantile(p)) - p).abs() < 1e-8, "t p={p}");
            assert!((f.cdf(f.quantile(p)) - p).abs() < 1e-8, "F p={p}");
        }
        assert!(f.quantile(1.2).is_nan());
        assert_eq!(f.quantile(1.0), f64::INFINITY);
    }

    #[test]
    fn f_cdf_support() {
        let f = FisherF::noncentral(3.0, 12.0, 4.0);
        assert_eq!(f.cdf(-1.0), 0.0);
        assert_eq!(f.cdf(0.0), 0.0);
        assert_eq!(f.cdf(f64::INFINITY), 1.0);
        assert_eq!(f.pdf(-0.5), 0.0);
        assert_eq!(f.quantile(0.0), 0.0);
    }

    #[test]
    fn noncentral_f_reference_values() {
        assert!((FisherF::noncentral(2.0, 87.0, 5.625).cdf(3.0) - 0.443_720_217_1).abs() < 1e-7);
        assert!((FisherF::noncentral(4.0, 20.0, 10.0).cdf(3.0) - 0.427_638_858_6).abs() < 1e-7);
        assert!((FisherF::noncentral(3.0, 40.0, 30.0).cdf(2.5) - 0.002_062_384_75).abs() < 1e-8);
    }

    #[test]
    fn noncentral_f_zero_ncp_is_central() {
        let central = FisherF::central(4.0, 30.0);
        let zero = FisherF::noncentral(4.0, 30.0, 0.0);
        for &x in &[0.1, 1.0, 2.7, 6.0] {
            assert_eq!(central.cdf(x), zero.cdf(x));
        }
    }

    #[test]
    fn noncentral_f_tiny_ncp_close_to_central() {
        let central = FisherF::central(3.0, 25.0);
        let near = FisherF::noncentral(3.0, 25.0, 1e-8);
        assert!((central.cdf(2.0) - near.cdf(2.0)).abs() < 1e-7);
    }

    #[test]
    fn noncentral_f_pdf_integrates_to_cdf() {
        let f = FisherF::noncentral(4.0, 20.0, 6.0);
        let mass = integrate(|x| f.pdf(x), 0.2, 6.0, 4000);
        assert!((mass - (f.cdf(6.0) - f.cdf(0.2))).abs() < 1e-5, "mass={}", mass);
    }

    #[test]
    fn f_pdf_at_origin() {
        assert_eq!(FisherF::central(5.0, 10.0).pdf(0.0), 0.0);
        assert!((FisherF::central(2.0, 10.0).pdf(0.0) - 1.0).abs() < 1e-12);
        assert!((FisherF::noncentral(2.0, 10.0, 2.0).pdf(0.0) - (-1.0_f64).exp()).abs() < 1e-12);
        assert_eq!(FisherF::central(1.0, 10.0).pdf(0.0), f64::INFINITY);
    }

    #[test]
    fn f_moments() {
        let f = FisherF::central(4.0, 8.0);
        assert!((f.mean() - 8.0 / 6.0).abs() < TOL);
        let ncf = FisherF::noncentral(4.0, 8.0, 2.0);
        assert!((ncf.mean() - 8.0 * 6.0 / (4.0 * 6.0)).abs() < TOL);
        assert_eq!(FisherF::central(4.0, 2.0).mean(), f64::INFINITY);
        assert_eq!(FisherF::central(4.0, 4.0).variance(), f64::INFINITY);
        // Central variance: 2·d2²·(d1+d2-2) / (d1·(d2-2)²·(d2-4))
        let f = FisherF::central(5.0, 10.0);
        let expected = 2.0 * 100.0 * 13.0 / (5.0 * 64.0 * 6.0);
        assert!((f.variance() - expected).abs() < TOL);
    }

    #[test]
    fn f_invalid_is_nan() {
        assert!(FisherF::central(0.0, 5.0).cdf(1.0).is_nan());
        assert!(FisherF::central(5.0, 0.0).cdf(1.0).is_nan());
        assert!(FisherF::noncentral(2.0, 5.0, -1.0).cdf(1.0).is_nan());
        assert!(FisherF::noncentral(2.0, 5.0, -1.0).pdf(1.0).is_nan());
        assert!(FisherF::central(0.0, 5.0).quantile(0.9).is_nan());
    }
}
