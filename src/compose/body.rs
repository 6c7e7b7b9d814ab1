//! Request body encoding.

use crate::request::Payload;

/// Encode request data to its wire-ready form.
///
/// Absent data produces no body at all — never an empty string. Text passes
/// through unchanged so pre-encoded form payloads survive verbatim; JSON is
/// serialized, and a serialization failure propagates before any network
/// call is attempted.
pub fn encode(data: Option<&Payload>) -> Result<Option<String>, serde_json::Error> {
    match data {
        None => Ok(None),
        Some(Payload::Text(text)) => Ok(Some(text.clone())),
        Some(Payload::Json(value)) => Ok(Some(serde_json::to_string(value)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_data_has_no_body() {
        assert_eq!(encode(None).unwrap(), None);
    }

    #[test]
    fn text_passes_through_unchanged() {
        let form = Payload::Text("grant_type=password&username=foo".to_string());
        assert_eq!(
            encode(Some(&form)).unwrap(),
            Some("grant_type=password&username=foo".to_string())
        );
    }

    #[test]
    fn json_serializes_to_text() {
        let payload = Payload::Json(serde_json::json!({"name": "a"}));
        assert_eq!(encode(Some(&payload)).unwrap(), Some(r#"{"name":"a"}"#.to_string()));
    }

    #[test]
    fn empty_text_still_sets_a_body() {
        // An explicitly empty string is caller intent, distinct from absent data.
        let empty = Payload::Text(String::new());
        assert_eq!(encode(Some(&empty)).unwrap(), Some(String::new()));
    }
}
