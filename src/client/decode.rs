use image::DynamicImage;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::DecodeError;

pub const SEED_HEADER: &str = "x-seed";
pub const DETAIL_FIELD: &str = "detail";

pub fn decode_image(body: &[u8]) -> Result<DynamicImage, DecodeError> {
    Ok(image::load_from_memory(body)?)
}

/// Pulls the `detail` value out of a JSON error body, whatever its type.
pub fn decode_error_details(body: &[u8]) -> Result<Value, DecodeError> {
    let mut json: Value = serde_json::from_slice(body)?;

    json.get_mut(DETAIL_FIELD)
        .map(Value::take)
        .ok_or(DecodeError::MissingDetail)
}

/// `Ok(None)` when the header is absent.
pub fn decode_seed(headers: &HeaderMap) -> Result<Option<i64>, DecodeError> {
    let Some(raw) = headers.get(SEED_HEADER) else {
        return Ok(None);
    };

    let text = raw.to_str().map_err(|_| DecodeError::Seed(format!("{:?}", raw)))?;
    text.trim()
        .parse()
        .map(Some)
        .map_err(|_| DecodeError::Seed(text.to_string()))
}

/// Turns a step result into an optional field, logging why it is missing.
pub fn degrade<T>(step: &str, result: Result<T, DecodeError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Leaving {} empty: {}", step, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use serde_json::json;

    #[test]
    fn detail_string_is_extracted() {
        let details = decode_error_details(br#"{"detail": "not found"}"#).unwrap();
        assert_eq!(details, json!("not found"));
    }

    #[test]
    fn structured_detail_passes_through() {
        let details =
            decode_error_details(br#"{"detail": [{"msg": "field required"}]}"#).unwrap();
        assert_eq!(details, json!([{"msg": "field required"}]));
    }

    #[test]
    fn non_json_and_missing_detail_are_distinct() {
        assert!(matches!(
            decode_error_details(b"Internal Server Error"),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            decode_error_details(br#"{"message": "nope"}"#),
            Err(DecodeError::MissingDetail)
        ));
        assert!(matches!(
            decode_error_details(br#"["detail"]"#),
            Err(DecodeError::MissingDetail)
        ));
    }

    #[test]
    fn garbage_is_not_an_image() {
        assert!(matches!(
            decode_image(b"definitely not a jpeg"),
            Err(DecodeError::Image(_))
        ));
    }

    #[test]
    fn seed_header_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(decode_seed(&headers).unwrap(), None);

        headers.insert(SEED_HEADER, HeaderValue::from_static("123456"));
        assert_eq!(decode_seed(&headers).unwrap(), Some(123456));

        headers.insert(SEED_HEADER, HeaderValue::from_static("lucky"));
        assert!(matches!(decode_seed(&headers), Err(DecodeError::Seed(_))));
        assert_eq!(degrade("seed", decode_seed(&headers)), None);
    }
}
