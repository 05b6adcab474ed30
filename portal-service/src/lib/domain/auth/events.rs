use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

/// Security-relevant events emitted by the auth facade.
///
/// Consumed by the audit log adapter; the retained entries are also served
/// back over the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    LoginSucceeded { email: String },
    LoginFailed { identifier: String, reason: String },
    LoginThrottled { identifier: String },
    RegistrationSucceeded { email: String },
    RegistrationFailed { email: String, reason: String },
    LoggedOut { email: String },
}

impl AuditEvent {
    /// Get the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            AuditEvent::LoginSucceeded { .. } => "login_succeeded",
            AuditEvent::LoginFailed { .. } => "login_failed",
            AuditEvent::LoginThrottled { .. } => "login_throttled",
            AuditEvent::RegistrationSucceeded { .. } => "registration_succeeded",
            AuditEvent::RegistrationFailed { .. } => "registration_failed",
            AuditEvent::LoggedOut { .. } => "logged_out",
        }
    }
}

/// A retained audit entry: the event plus when it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: AuditEvent,
}

impl AuditEntry {
    pub fn new(event: AuditEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_tag() {
        let entry = AuditEntry::new(AuditEvent::LoginFailed {
            identifier: "ghost@uniportal.ru".to_string(),
            reason: "user not found".to_string(),
        });

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"], "login_failed");
        assert_eq!(json["identifier"], "ghost@uniportal.ru");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn event_type_matches_variant() {
        let event = AuditEvent::LoggedOut {
            email: "student@uniportal.ru".to_string(),
        };
        assert_eq!(event.event_type(), "logged_out");
    }
}
