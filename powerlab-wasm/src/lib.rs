//! JSON and WebAssembly bindings for powerlab.
//!
//! Every public function accepts simple types (`&str`, `f64`, `usize`) and
//! returns a JSON `String`:
//!
//! - Success: `{"ok": <value>}`
//! - Failure: `{"error": "<message>"}`
//!
//! `#[wasm_bindgen]` exports are added by the `wasm` feature.
//!
//! # Modules
//!
//! - [`power`]: power, sample size, curves and reports
//!
//! # Example
//!
//! ```
//! let json = powerlab_wasm::compute_power(
//!     r#"{"n":30,"alpha":0.05,"family":"two_sample_t","effect_size":0.5,"one_tailed":false}"#,
//! );
//! let v: serde_json::Value = serde_json::from_str(&json).unwrap();
//! assert!(v["ok"]["power"].as_f64().unwrap() > 0.47);
//! ```

pub mod error;
pub mod power;

/// Crate version (set from Cargo.toml at compile time).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Re-exports ───────────────────────────────────────────────────────────

pub use error::{wasm_err, wasm_ok, wasm_result};
pub use power::{
    compute_power, distribution_curve, find_sample_size, power_curve, power_report,
    JsPowerCurve, JsPowerReport, JsPowerResult,
};
