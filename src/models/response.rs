use image::DynamicImage;
use serde_json::Value;

/// Status code used when no HTTP response was received at all.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// Result of one `try_on` call.
#[derive(Debug, Clone, Default)]
pub struct TryOnResponse {
    pub status_code: u16,
    pub image: Option<DynamicImage>,
    pub raw_bytes: Option<Vec<u8>>,
    pub error_details: Option<Value>,
    pub seed: Option<i64>,
    /// Image decoding was skipped on request; a 200 body lives in `raw_bytes`.
    pub raw_response: bool,
}

/// What a [`TryOnResponse`] amounts to, derived from its fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome<'a> {
    Image {
        image: &'a DynamicImage,
        seed: Option<i64>,
    },
    /// 200, but the body did not decode as an image.
    UndecodableImage,
    /// 200 in raw-response mode.
    Raw { body: &'a [u8], seed: Option<i64> },
    ApiError {
        status: u16,
        details: Option<&'a Value>,
    },
    TransportFailure,
}

impl TryOnResponse {
    pub fn transport_failure() -> Self {
        TryOnResponse {
            status_code: TRANSPORT_FAILURE_STATUS,
            ..Default::default()
        }
    }

    pub fn outcome(&self) -> ResponseOutcome<'_> {
        match (self.status_code, &self.image, &self.raw_bytes) {
            (TRANSPORT_FAILURE_STATUS, _, _) => ResponseOutcome::TransportFailure,
            (200, Some(image), _) => ResponseOutcome::Image {
                image,
                seed: self.seed,
            },
            (200, None, Some(body)) if self.raw_response => ResponseOutcome::Raw {
                body,
                seed: self.seed,
            },
            (200, None, _) => ResponseOutcome::UndecodableImage,
            (status, _, _) => ResponseOutcome::ApiError {
                status,
                details: self.error_details.as_ref(),
            },
        }
    }

    /// `error_details` as display text: strings verbatim, anything else as compact JSON.
    pub fn error_message(&self) -> Option<String> {
        self.error_details.as_ref().map(|details| match details {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use serde_json::json;

    #[test]
    fn transport_failure_is_empty() {
        let response = TryOnResponse::transport_failure();
        assert_eq!(response.status_code, 0);
        assert!(response.image.is_none());
        assert!(response.raw_bytes.is_none());
        assert!(response.error_details.is_none());
        assert!(response.seed.is_none());
        assert_eq!(response.outcome(), ResponseOutcome::TransportFailure);
    }

    #[test]
    fn success_without_image_is_distinct_from_transport_failure() {
        let response = TryOnResponse {
            status_code: 200,
            raw_bytes: Some(b"garbage".to_vec()),
            ..Default::default()
        };
        assert_eq!(response.outcome(), ResponseOutcome::UndecodableImage);
    }

    #[test]
    fn success_with_image() {
        let response = TryOnResponse {
            status_code: 200,
            image: Some(DynamicImage::ImageRgb8(RgbImage::new(2, 2))),
            seed: Some(42),
            ..Default::default()
        };
        assert!(matches!(
            response.outcome(),
            ResponseOutcome::Image { seed: Some(42), .. }
        ));
    }

    #[test]
    fn raw_mode_keeps_body() {
        let response = TryOnResponse {
            status_code: 200,
            raw_bytes: Some(vec![1, 2, 3]),
            raw_response: true,
            ..Default::default()
        };
        assert_eq!(
            response.outcome(),
            ResponseOutcome::Raw {
                body: &[1, 2, 3],
                seed: None
            }
        );
    }

    #[test]
    fn error_message_passes_structured_details_through() {
        let mut response = TryOnResponse {
            status_code: 422,
            error_details: Some(json!("bad seed")),
            ..Default::default()
        };
        assert_eq!(response.error_message().as_deref(), Some("bad seed"));

        response.error_details = Some(json!([{"loc": ["seed"], "msg": "invalid"}]));
        assert_eq!(
            response.error_message().as_deref(),
            Some(r#"[{"loc":["seed"],"msg":"invalid"}]"#)
        );
        assert!(matches!(
            response.outcome(),
            ResponseOutcome::ApiError {
                status: 422,
                details: Some(_)
            }
        ));
    }
}
