//! Replaying adapters that serve recorded interactions from cassettes.

pub mod clock;
pub mod cluster;

pub use clock::ReplayingClock;
pub use cluster::ReplayingCluster;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::ClusterError;

/// Pull the next recorded output for `port::method`.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output.clone()
}

/// Decode a recorded `{"Ok": v}` / `{"Err": e}` output.
///
/// Mirror of `recording::record_result`. A malformed payload is reported as
/// a decode error rather than a panic so the command can print it.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, ClusterError> {
    let decode = |e: serde_json::Error| ClusterError::Decode { message: e.to_string() };
    match output {
        serde_json::Value::Object(mut map) => {
            if let Some(err) = map.remove("Err") {
                let err: ClusterError = serde_json::from_value(err).map_err(decode)?;
                return Err(err);
            }
            let ok = map.remove("Ok").ok_or_else(|| ClusterError::Decode {
                message: "recorded output has neither Ok nor Err".to_string(),
            })?;
            serde_json::from_value(ok).map_err(decode)
        }
        other => Err(ClusterError::Decode {
            message: format!("recorded output is not an object: {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replays_ok_payload() {
        let value: Vec<u32> = replay_result(json!({"Ok": [1, 2]})).unwrap();
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn replays_structured_error() {
        let output = json!({"Err": {"type": "not_found", "resource": "namespaces", "name": "foo"}});
        let err = replay_result::<()>(output).unwrap_err();
        assert_eq!(err, ClusterError::namespace_not_found("foo"));
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let err = replay_result::<()>(json!("oops")).unwrap_err();
        assert!(matches!(err, ClusterError::Decode { .. }));
    }
}
