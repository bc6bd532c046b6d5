use std::time::Instant;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    page::render_page,
    render::{decode_upload, image_to_data_url, render_details, render_error},
    AppState,
};
use crate::{
    error::Result,
    models::{AvatarSex, TryOnRequest, RANDOM_SEED},
};

/// Body of `POST /api/try-on`. Images are base64 data URLs.
#[derive(Debug, Default, Deserialize)]
pub struct TryOnForm {
    pub clothing_image: Option<String>,
    pub clothing_prompt: Option<String>,
    pub avatar_image: Option<String>,
    pub avatar_prompt: Option<String>,
    pub avatar_sex: Option<String>,
    pub background_image: Option<String>,
    pub background_prompt: Option<String>,
    pub seed: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TryOnView {
    pub image: Option<String>,
    pub details: String,
}

impl TryOnForm {
    /// Blank prompts count as absent; any negative seed means random.
    pub fn into_request(self) -> Result<TryOnRequest> {
        let mut request = TryOnRequest::new()
            .avatar_sex(AvatarSex::from(self.avatar_sex.as_deref()))
            .seed(self.seed.filter(|seed| *seed >= 0).unwrap_or(RANDOM_SEED));

        request.clothing_image = decode_optional("clothing_image", self.clothing_image)?;
        request.avatar_image = decode_optional("avatar_image", self.avatar_image)?;
        request.background_image = decode_optional("background_image", self.background_image)?;

        request.clothing_prompt = non_blank(self.clothing_prompt);
        request.avatar_prompt = non_blank(self.avatar_prompt);
        request.background_prompt = non_blank(self.background_prompt);

        Ok(request)
    }
}

fn decode_optional(field: &str, encoded: Option<String>) -> Result<Option<image::DynamicImage>> {
    match encoded.as_deref().map(str::trim) {
        Some(encoded) if !encoded.is_empty() => decode_upload(field, encoded).map(Some),
        _ => Ok(None),
    }
}

fn non_blank(prompt: Option<String>) -> Option<String> {
    prompt.filter(|p| !p.trim().is_empty())
}

pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(state.show_gateway_link))
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

pub async fn try_on(state: web::Data<AppState>, form: web::Json<TryOnForm>) -> HttpResponse {
    let request_id = Uuid::new_v4();

    let request = match form.into_inner().into_request() {
        Ok(request) => request,
        Err(e) => {
            log::warn!("[{}] Rejected upload: {}", request_id, e);
            return HttpResponse::BadRequest().json(TryOnView {
                image: None,
                details: render_error(400, Some(&e.to_string())),
            });
        }
    };

    // Waits for a free slot rather than rejecting.
    let permit = match state.gate.acquire().await {
        Ok(permit) => permit,
        Err(e) => {
            log::error!("[{}] Admission gate closed: {}", request_id, e);
            return HttpResponse::ServiceUnavailable().json(TryOnView {
                image: None,
                details: render_error(503, Some("The demo is shutting down")),
            });
        }
    };

    let started = Instant::now();
    let response = state.client.try_on(&request).await;
    drop(permit);

    log::info!(
        "[{}] Try-on finished with status {} in {}ms",
        request_id,
        response.status_code,
        started.elapsed().as_millis()
    );

    let image = match response.image.as_ref().map(image_to_data_url).transpose() {
        Ok(image) => image,
        Err(e) => {
            log::error!("[{}] Could not re-encode result image: {}", request_id, e);
            return HttpResponse::Ok().json(TryOnView {
                image: None,
                details: render_error(response.status_code, Some(&e.to_string())),
            });
        }
    };

    HttpResponse::Ok().json(TryOnView {
        image,
        details: render_details(&response),
    })
}
