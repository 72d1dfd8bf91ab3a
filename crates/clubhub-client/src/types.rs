//! Wire types for the ClubHub API

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::Result;

// =============================================================================
// Credentials
// =============================================================================

/// Opaque bearer credential, forwarded verbatim in `Authorization`
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token text, for building the header
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(****)")
    }
}

impl From<String> for BearerToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for BearerToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

// =============================================================================
// Clubs
// =============================================================================

/// Club identifier. The server may send it as a number or a string; we keep
/// the textual form and never interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClubId(String);

impl ClubId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ClubId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => ClubId(text),
            RawId::Number(number) => ClubId(number.to_string()),
        })
    }
}

/// Club
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
}

/// Body of the club listing endpoint
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClubList {
    #[serde(default)]
    pub clubs: Vec<Club>,
}

// =============================================================================
// School registration
// =============================================================================

/// Payload for `POST /group/school/register`.
///
/// Field names follow the server's casing exactly, including `phoneNUmber`.
/// A missing group id goes out as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SchoolRegistration {
    #[serde(rename = "groupId")]
    pub group_id: Option<i64>,
    pub clubs: String,
    pub list_of_classes: String,
    pub no_of_students: i64,
    #[serde(rename = "phoneNUmber")]
    pub phone_number: i64,
}

// =============================================================================
// Request bodies
// =============================================================================

/// Body of a submit request. The caller picks the encoding.
pub enum RequestBody {
    /// Serialized as JSON with `Content-Type: application/json`
    Json(serde_json::Value),
    /// Passed through as `multipart/form-data`
    Multipart(reqwest::multipart::Form),
    /// Raw bytes with an optional content type
    Bytes {
        content: Vec<u8>,
        content_type: Option<String>,
    },
}

impl RequestBody {
    /// Encode any serializable value as a JSON body
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(RequestBody::Json(serde_json::to_value(value)?))
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => "json",
            RequestBody::Multipart(_) => "multipart",
            RequestBody::Bytes { .. } => "bytes",
        }
    }
}

/// JavaScript-style truthiness of a decoded response.
///
/// The registration endpoint signals success with any truthy value.
pub fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_club_id_accepts_numbers_and_strings() {
        let list: ClubList = serde_json::from_value(json!({
            "clubs": [
                { "id": 7, "name": "Eco Club" },
                { "id": "b-12", "name": "Robotics" }
            ]
        }))
        .unwrap();

        assert_eq!(list.clubs[0].id.as_str(), "7");
        assert_eq!(list.clubs[1].id.as_str(), "b-12");
    }

    #[test]
    fn test_club_list_defaults_when_key_missing() {
        let list: ClubList = serde_json::from_value(json!({})).unwrap();
        assert!(list.clubs.is_empty());
    }

    #[test]
    fn test_registration_wire_names() {
        let payload = SchoolRegistration {
            group_id: None,
            clubs: "7,9".into(),
            list_of_classes: "Math".into(),
            no_of_students: 30,
            phone_number: 5550100,
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "groupId": null,
                "clubs": "7,9",
                "list_of_classes": "Math",
                "no_of_students": 30,
                "phoneNUmber": 5550100
            })
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("ok")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = BearerToken::from("secret-value");
        assert_eq!(format!("{:?}", token), "BearerToken(****)");
        assert_eq!(token.expose(), "secret-value");
    }
}
