//! JSON result envelope for the WASM boundary.
//!
//! Every public function in `powerlab-wasm` returns a `String` containing JSON.
//! Success → `{"ok": <value>}`, failure → `{"error": "<message>"}`.

use std::fmt::Display;

use powerlab_core::PowerError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize a success value as `{"ok": val}`.
pub fn wasm_ok<T: Serialize>(val: &T) -> String {
    #[derive(Serialize)]
    struct Ok<'a, T: Serialize> {
        ok: &'a T,
    }
    serde_json::to_string(&Ok { ok: val }).unwrap_or_else(|e| wasm_err(e))
}

/// Serialize an error as `{"error": "msg"}`.
pub fn wasm_err(msg: impl Display) -> String {
    #[derive(Serialize)]
    struct Err {
        error: String,
    }
    serde_json::to_string(&Err {
        error: msg.to_string(),
    })
    .unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.into())
}

/// Map a `powerlab_core::Result<T>` into the JSON envelope.
pub fn wasm_result<T: Serialize>(r: powerlab_core::Result<T>) -> String {
    match r {
        Ok(val) => wasm_ok(&val),
        Err(e) => wasm_err(e),
    }
}

/// Deserialize a JSON argument, naming it in the error.
pub fn parse_json<T: DeserializeOwned>(json: &str, what: &str) -> powerlab_core::Result<T> {
    serde_json::from_str(json).map_err(|e| PowerError::Parse(format!("invalid {what} JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_serialization() {
        let json = wasm_ok(&0.5);
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["ok"], 0.5);
    }

    #[test]
    fn ok_none_is_null() {
        assert_eq!(wasm_ok(&None::<usize>), r#"{"ok":null}"#);
    }

    #[test]
    fn err_serialization() {
        let json = wasm_err("something broke");
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["error"], "something broke");
    }

    #[test]
    fn result_err_variant() {
        let r: powerlab_core::Result<f64> =
            Err(PowerError::InvalidInput("effect size must be positive".into()));
        let json = wasm_result(r);
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["error"], "invalid input: effect size must be positive");
    }

    #[test]
    fn parse_error_names_argument() {
        let r: powerlab_core::Result<Vec<f64>> = parse_json("[1,", "design");
        match r {
            Err(PowerError::Parse(msg)) => assert!(msg.starts_with("invalid design JSON")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
