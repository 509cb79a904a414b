use std::{collections::HashMap, str::FromStr};

use enum_iterator::{Sequence, all};
use serde_json::{Map, Value};

use crate::error::{REASON_NOT_STRING, ValidationError};
use crate::model::{
    Audience, GenerationRequest, Industry, Language, Length, Purpose, ReplyType, Tone, Urgency,
};

/// Untyped input as it arrives from a form or a JSON body.
pub type RawParams = HashMap<String, String>;

pub const MAX_KEY_POINTS_CHARS: usize = 2000;
pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_INCOMING_EMAIL_CHARS: usize = 10_000;

/// Input field names.
pub mod fields {
    pub const TONE: &str = "tone";
    pub const LENGTH: &str = "length";
    pub const PURPOSE: &str = "purpose";
    pub const LANGUAGE: &str = "language";
    pub const AUDIENCE: &str = "audience";
    pub const INDUSTRY: &str = "industry";
    pub const URGENCY: &str = "urgency";
    pub const REPLY_TYPE: &str = "reply_type";
    pub const KEY_POINTS: &str = "key_points";
    pub const RECIPIENT_NAME: &str = "recipient_name";
    pub const SENDER_NAME: &str = "sender_name";
    pub const INCOMING_EMAIL: &str = "incoming_email";
}

/// Validate raw parameters into a [`GenerationRequest`].
///
/// Fields are checked in a fixed order and the first failure is returned.
/// An empty string counts as absent. Accepted values are stored verbatim.
pub fn validate(raw: &RawParams) -> Result<GenerationRequest, ValidationError> {
    let tone: Tone = required_choice(raw, fields::TONE)?;
    let length: Length = required_choice(raw, fields::LENGTH)?;
    let purpose: Purpose = required_choice(raw, fields::PURPOSE)?;
    let language: Language = required_choice(raw, fields::LANGUAGE)?;
    let audience: Audience = required_choice(raw, fields::AUDIENCE)?;
    let industry: Industry = required_choice(raw, fields::INDUSTRY)?;
    let urgency: Urgency = required_choice(raw, fields::URGENCY)?;
    let reply_type: ReplyType = optional_choice(raw, fields::REPLY_TYPE)?.unwrap_or_default();

    let key_points = present(raw, fields::KEY_POINTS)
        .ok_or_else(|| ValidationError::required(fields::KEY_POINTS))?;
    check_bound(fields::KEY_POINTS, key_points, MAX_KEY_POINTS_CHARS)?;

    let recipient_name = optional_text(raw, fields::RECIPIENT_NAME, MAX_NAME_CHARS)?;
    let sender_name = optional_text(raw, fields::SENDER_NAME, MAX_NAME_CHARS)?;
    let incoming_email = optional_text(raw, fields::INCOMING_EMAIL, MAX_INCOMING_EMAIL_CHARS)?;
    if reply_type == ReplyType::Reply && incoming_email.is_none() {
        return Err(ValidationError::required(fields::INCOMING_EMAIL));
    }

    Ok(GenerationRequest {
        tone,
        length,
        purpose,
        language,
        audience,
        industry,
        urgency,
        reply_type,
        key_points: key_points.to_string(),
        recipient_name,
        sender_name,
        incoming_email,
    })
}

/// Every legal wire value of a categorical field, in declaration order.
pub fn allowed_values<T>() -> Vec<&'static str>
where
    T: Sequence + Into<&'static str>,
{
    all::<T>().map(Into::into).collect()
}

/// Flatten a JSON object into [`RawParams`].
///
/// `null` is dropped; any non-string value is rejected for its field.
pub fn raw_params_from_json(map: &Map<String, Value>) -> Result<RawParams, ValidationError> {
    let mut raw = RawParams::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::String(s) => {
                raw.insert(key.clone(), s.clone());
            }
            _ => return Err(ValidationError::new(key.as_str(), REASON_NOT_STRING)),
        }
    }
    Ok(raw)
}

fn present<'a>(raw: &'a RawParams, field: &str) -> Option<&'a str> {
    raw.get(field).map(String::as_str).filter(|v| !v.is_empty())
}

fn required_choice<T>(raw: &RawParams, field: &'static str) -> Result<T, ValidationError>
where
    T: Sequence + FromStr + Into<&'static str>,
{
    optional_choice(raw, field)?.ok_or_else(|| ValidationError::required(field))
}

fn optional_choice<T>(raw: &RawParams, field: &'static str) -> Result<Option<T>, ValidationError>
where
    T: Sequence + FromStr + Into<&'static str>,
{
    present(raw, field)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|_| ValidationError::not_allowed(field, allowed_values::<T>()))
        })
        .transpose()
}

fn optional_text(
    raw: &RawParams,
    field: &'static str,
    max_chars: usize,
) -> Result<Option<String>, ValidationError> {
    present(raw, field)
        .map(|value| check_bound(field, value, max_chars).map(|_| value.to_string()))
        .transpose()
}

fn check_bound(field: &'static str, value: &str, max_chars: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max_chars {
        return Err(ValidationError::too_long(field, max_chars));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{REASON_NOT_ALLOWED, REASON_REQUIRED};
    use serde_json::json;

    pub(crate) fn follow_up_params() -> RawParams {
        [
            ("tone", "formal"),
            ("length", "short"),
            ("purpose", "follow-up"),
            ("language", "English"),
            ("audience", "client"),
            ("industry", "sales"),
            ("urgency", "normal"),
            ("key_points", "thank them for the meeting"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_validate_round_trips_field_values() {
        let mut raw = follow_up_params();
        raw.insert("recipient_name".into(), "Ms. Rivera".into());
        raw.insert("sender_name".into(), "Tom".into());

        let req = validate(&raw).unwrap();
        assert_eq!(req.tone(), Tone::Formal);
        assert_eq!(req.length(), Length::Short);
        assert_eq!(req.purpose(), Purpose::FollowUp);
        assert_eq!(req.language(), Language::English);
        assert_eq!(req.audience(), Audience::Client);
        assert_eq!(req.industry(), Industry::Sales);
        assert_eq!(req.urgency(), Urgency::Normal);
        assert_eq!(req.reply_type(), ReplyType::New);
        assert_eq!(req.key_points(), "thank them for the meeting");
        assert_eq!(req.recipient_name(), Some("Ms. Rivera"));
        assert_eq!(req.sender_name(), Some("Tom"));
        assert_eq!(req.incoming_email(), None);
    }

    #[test]
    fn test_validate_accepts_every_enumerated_value() {
        for tone in allowed_values::<Tone>() {
            for purpose in allowed_values::<Purpose>() {
                let mut raw = follow_up_params();
                raw.insert("tone".into(), tone.into());
                raw.insert("purpose".into(), purpose.into());
                let req = validate(&raw).unwrap();
                let got_tone: &'static str = req.tone().into();
                let got_purpose: &'static str = req.purpose().into();
                assert_eq!((got_tone, got_purpose), (tone, purpose));
            }
        }
        for language in allowed_values::<Language>() {
            let mut raw = follow_up_params();
            raw.insert("language".into(), language.into());
            assert_eq!(validate(&raw).unwrap().language().to_string(), language);
        }
    }

    #[test]
    fn test_missing_key_points_is_required() {
        let mut raw = follow_up_params();
        raw.remove("key_points");
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field, "key_points");
        assert_eq!(err.reason, REASON_REQUIRED);
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut raw = follow_up_params();
        raw.insert("urgency".into(), String::new());
        let err = validate(&raw).unwrap_err();
        assert_eq!(err, ValidationError::required("urgency"));
    }

    #[test]
    fn test_unknown_value_lists_allowed_set() {
        let mut raw = follow_up_params();
        raw.insert("length".into(), "epic".into());
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field, "length");
        assert_eq!(err.reason, REASON_NOT_ALLOWED);
        assert_eq!(err.allowed_values, vec!["short", "medium", "long"]);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let mut raw = follow_up_params();
        raw.insert("language".into(), "english".into());
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field, "language");
        assert_eq!(err.allowed_values.len(), 12);
    }

    #[test]
    fn test_key_points_bounds() {
        let mut raw = follow_up_params();
        raw.insert("key_points".into(), "x".repeat(MAX_KEY_POINTS_CHARS));
        assert!(validate(&raw).is_ok());

        raw.insert("key_points".into(), "x".repeat(MAX_KEY_POINTS_CHARS + 1));
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field, "key_points");
        assert_eq!(err.reason, "must be at most 2000 characters");

        raw.insert("key_points".into(), "x".into());
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn test_key_points_bound_counts_characters_not_bytes() {
        let mut raw = follow_up_params();
        raw.insert("key_points".into(), "é".repeat(MAX_KEY_POINTS_CHARS));
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn test_whitespace_key_points_kept_verbatim() {
        let mut raw = follow_up_params();
        raw.insert("key_points".into(), "  \n\t ".into());
        let req = validate(&raw).unwrap();
        assert_eq!(req.key_points(), "  \n\t ");

        raw.insert("key_points".into(), String::new());
        let err = validate(&raw).unwrap_err();
        assert_eq!(err, ValidationError::required("key_points"));
    }

    #[test]
    fn test_name_bound() {
        let mut raw = follow_up_params();
        raw.insert("sender_name".into(), "n".repeat(MAX_NAME_CHARS + 1));
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field, "sender_name");
    }

    #[test]
    fn test_reply_requires_incoming_email() {
        let mut raw = follow_up_params();
        raw.insert("reply_type".into(), "reply".into());
        assert_eq!(
            validate(&raw).unwrap_err(),
            ValidationError::required("incoming_email")
        );

        raw.insert("incoming_email".into(), "Can we meet Tuesday?".into());
        let req = validate(&raw).unwrap();
        assert_eq!(req.reply_type(), ReplyType::Reply);
        assert_eq!(req.incoming_email(), Some("Can we meet Tuesday?"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut raw = follow_up_params();
        raw.insert("favourite_colour".into(), "teal".into());
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn test_validate_is_deterministic() {
        let raw = follow_up_params();
        assert_eq!(validate(&raw).unwrap(), validate(&raw).unwrap());
    }

    #[test]
    fn test_raw_params_from_json() {
        let body = json!({"tone": "formal", "recipient_name": null});
        let raw = raw_params_from_json(body.as_object().unwrap()).unwrap();
        assert_eq!(raw.get("tone").map(String::as_str), Some("formal"));
        assert!(!raw.contains_key("recipient_name"));

        let body = json!({"tone": 50});
        let err = raw_params_from_json(body.as_object().unwrap()).unwrap_err();
        assert_eq!(err, ValidationError::new("tone", REASON_NOT_STRING));
    }
}
