use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::DynamicImage;

use crate::{
    client::form::encode_jpeg,
    error::{Result, TryOnError},
    models::{ResponseOutcome, TryOnResponse},
};

pub const UNDECODABLE_IMAGE_MESSAGE: &str = "Result image could not be decoded";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "The try-on service could not be reached";

/// Status panel HTML for a finished call.
pub fn render_details(response: &TryOnResponse) -> String {
    match response.outcome() {
        ResponseOutcome::Image { seed, .. } | ResponseOutcome::Raw { seed, .. } => {
            let seed = seed.map_or_else(|| "n/a".to_string(), |s| s.to_string());
            format!("<h3>Success</h3><p>Seed: {}</p>", seed)
        }
        ResponseOutcome::UndecodableImage => render_error(200, Some(UNDECODABLE_IMAGE_MESSAGE)),
        ResponseOutcome::TransportFailure => render_error(0, Some(TRANSPORT_FAILURE_MESSAGE)),
        ResponseOutcome::ApiError { status, .. } => {
            render_error(status, response.error_message().as_deref())
        }
    }
}

pub fn render_error(status: u16, details: Option<&str>) -> String {
    let mut html = format!("<h3>Error {}</h3>", status);
    if let Some(details) = details {
        html.push_str(&format!("<p>{}</p>", escape_html(details)));
    }
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn image_to_data_url(image: &DynamicImage) -> Result<String> {
    let jpeg = encode_jpeg(image)?;
    Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(jpeg)))
}

/// Decodes an uploaded image given as a `data:` URL or bare base64.
pub fn decode_upload(field: &str, encoded: &str) -> Result<DynamicImage> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };

    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| TryOnError::Upload(format!("{} is not valid base64: {}", field, e)))?;

    image::load_from_memory(&bytes)
        .map_err(|e| TryOnError::Upload(format!("{} is not a readable image: {}", field, e)))
}
