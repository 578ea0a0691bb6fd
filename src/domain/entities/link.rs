//! Link records exchanged with the shortening backend.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Link metadata returned by `GET /api/v1/info/{code}`.
///
/// The backend owns this record; the frontend only reads it. Every field is
/// optional so that partial or unexpected bodies still deserialize, and
/// unknown fields are kept in [`LinkInfo::extra`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkInfo {
    pub success: bool,
    pub long_url: Option<String>,
    pub short_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LinkInfo {
    /// Reads a link record out of an arbitrary JSON body.
    ///
    /// Bodies that are not objects, or whose known fields have the wrong type,
    /// yield an empty record (`success == false`).
    pub fn from_json(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }

    /// Returns the redirect target when the backend reported success and
    /// supplied a non-empty long URL.
    pub fn redirect_target(&self) -> Option<&str> {
        if !self.success {
            return None;
        }

        self.long_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Input for `POST /api/v1/shorten`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub long_url: String,
    pub custom_alias: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewLink {
    /// Creates a link request without alias or expiry.
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            custom_alias: None,
            expires_at: None,
        }
    }

    /// Builds the JSON object sent to the backend.
    ///
    /// Optional fields are omitted when unset; `expiresAt` is RFC 3339.
    pub fn to_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("longUrl".into(), Value::String(self.long_url.clone()));

        if let Some(alias) = &self.custom_alias {
            payload.insert("customAlias".into(), Value::String(alias.clone()));
        }

        if let Some(expires_at) = self.expires_at {
            payload.insert(
                "expiresAt".into(),
                Value::String(expires_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
            );
        }

        payload
    }
}
