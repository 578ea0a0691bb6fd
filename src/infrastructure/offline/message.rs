//! Messages a page can post to the worker.

use serde::Deserialize;

/// Control messages understood by the worker, tagged by `type`.
///
/// ```json
/// { "type": "SKIP_WAITING" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerMessage {
    /// Activate an installed worker without waiting.
    SkipWaiting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skip_waiting() {
        let message: WorkerMessage = serde_json::from_str(r#"{"type":"SKIP_WAITING"}"#).unwrap();
        assert_eq!(message, WorkerMessage::SkipWaiting);
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_str::<WorkerMessage>(r#"{"type":"CLAIM"}"#).is_err());
        assert!(serde_json::from_str::<WorkerMessage>(r#"{"kind":"SKIP_WAITING"}"#).is_err());
    }
}
