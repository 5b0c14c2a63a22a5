//! Domain entities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One persisted chat message.
///
/// A record keeps every string field the sender supplied (`message`, `role`,
/// `action`, `chat_id`, ...). Fields are kept sorted by key so the encoded
/// form is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryRecord(BTreeMap<String, String>);

impl HistoryRecord {
    pub const MESSAGE: &'static str = "message";
    pub const ROLE: &'static str = "role";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Message body, empty when the sender left it out.
    pub fn message(&self) -> &str {
        self.get(Self::MESSAGE).unwrap_or_default()
    }

    pub fn role(&self) -> Option<&str> {
        self.get(Self::ROLE)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for HistoryRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_record_encodes_fields_sorted_by_key() {
        // checks: history record encodes fields sorted by key
        // given (precondition):
        let record = HistoryRecord::new()
            .with_field("role", "user")
            .with_field("message", "hi")
            .with_field("action", "send_message");

        // when (operation):
        let json = serde_json::to_string(&record).unwrap();

        // then (expected result):
        assert_eq!(
            json,
            r#"{"action":"send_message","message":"hi","role":"user"}"#
        );
    }

    #[test]
    fn test_history_record_accessors() {
        // checks: history record accessors
        // given (precondition):
        let record: HistoryRecord = [("message", "hi")].into_iter().collect();

        // when (operation) / then (expected result):
        assert_eq!(record.message(), "hi");
        assert_eq!(record.role(), None);
        assert_eq!(record.len(), 1);
        assert_eq!(HistoryRecord::new().message(), "");
    }

    #[test]
    fn test_history_record_rejects_non_string_values() {
        // checks: history record rejects non string values
        assert!(serde_json::from_str::<HistoryRecord>(r#"{"message":1}"#).is_err());
    }
}
