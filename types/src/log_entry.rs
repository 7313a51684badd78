//! Detection log entry.

use serde::{Deserialize, Serialize};

use crate::error::{is_present, ValidationError};

/// One detection/scan event as recorded by the frontend.
///
/// `gait` and `auth` are simulated confidence percentages (e.g. `"93.10%"`)
/// and `time` is the client's locale-formatted timestamp; the server stores
/// them verbatim. Entries are immutable once appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gait: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub time: String,
}

impl LogEntry {
    /// Create an entry with only the required fields set.
    pub fn new(name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gait: None,
            auth: None,
            status: None,
            time: time.into(),
        }
    }

    pub fn with_gait(mut self, gait: impl Into<String>) -> Self {
        self.gait = Some(gait.into());
        self
    }

    pub fn with_auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Check the fields required for acceptance: `name` and `time`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_present(&self.name) {
            return Err(ValidationError::MissingField("name"));
        }
        if !is_present(&self.time) {
            return Err(ValidationError::MissingField("time"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_entry_is_valid() {
        let entry = LogEntry::new("Known User", "10/16/2026, 9:41:00 AM")
            .with_gait("91.20%")
            .with_auth("88.05%")
            .with_status("Access Granted");
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn missing_name_is_rejected() {
        let entry = LogEntry::new("", "10/16/2026");
        assert_eq!(entry.validate(), Err(ValidationError::MissingField("name")));
    }

    #[test]
    fn empty_time_is_rejected() {
        let entry = LogEntry::new("Unknown Visitor", "");
        assert_eq!(entry.validate(), Err(ValidationError::MissingField("time")));
    }

    #[test]
    fn whitespace_fields_are_present() {
        assert!(LogEntry::new(" ", "   ").validate().is_ok());
    }

    #[test]
    fn optional_metrics_are_omitted_from_json() {
        let entry = LogEntry::new("Known User", "t0");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Known User", "time": "t0" }));
    }

    #[test]
    fn frontend_payload_deserializes() {
        let raw = r#"{
            "name": "Unknown Visitor",
            "gait": "84.12%",
            "auth": "71.90%",
            "status": "Alert",
            "time": "10/16/2026, 9:41:00 AM"
        }"#;
        let entry: LogEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.gait.as_deref(), Some("84.12%"));
        assert_eq!(entry.status.as_deref(), Some("Alert"));
    }
}
