//! Photo upload and serving route handlers.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use contacts_core::config::Config;
use contacts_core::{ContactId, Error};
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::AppError;

/// Query parameters for a photo upload.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct UploadPhotoParams {
    /// Contact ID; may instead be sent as the multipart `id` field.
    pub id: Option<String>,
}

/// Multipart form accepted by the upload route.
#[derive(utoipa::ToSchema)]
pub struct UploadPhotoForm {
    /// Contact ID, when not given in the query string.
    pub id: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// PUT /contacts/photo
#[utoipa::path(
    put,
    path = "/contacts/photo",
    params(UploadPhotoParams),
    request_body(content = UploadPhotoForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "URL of the stored photo", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing id or file part"),
        (status = 404, description = "Contact not found")
    )
)]
pub async fn upload_photo(
    State(ctx): State<AppContext>,
    Query(params): Query<UploadPhotoParams>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form_id = None;
    let mut file: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().map(str::to_owned);
                let data = field.bytes().await.map_err(invalid_multipart)?;
                file = Some((filename, data.to_vec()));
            }
            Some("id") => {
                form_id = Some(field.text().await.map_err(invalid_multipart)?);
            }
            other => tracing::debug!(field = ?other, "Ignoring unexpected multipart field"),
        }
    }

    let id = params
        .id
        .or(form_id)
        .filter(|id| !id.is_empty())
        .map(ContactId::from)
        .ok_or_else(|| Error::Validation("missing 'id' parameter".into()))?;
    let (filename, data) = file.ok_or_else(|| Error::Validation("missing 'file' part".into()))?;

    let base = base_url(&ctx.config, &headers);
    let url = ctx
        .contacts
        .upload_photo(&id, &data, filename.as_deref(), &base)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        url,
    ))
}

/// GET /contacts/image/:filename
#[utoipa::path(
    get,
    path = "/contacts/image/{filename}",
    params(("filename" = String, Path, description = "Stored photo filename, e.g. `u1.jpg`")),
    responses(
        (status = 200, description = "Raw image bytes"),
        (status = 404, description = "Photo not found")
    )
)]
pub async fn get_photo(
    State(ctx): State<AppContext>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (data, content_type) = ctx.contacts.photo(&filename)?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, content_type)], data))
}

fn invalid_multipart(e: axum::extract::multipart::MultipartError) -> Error {
    Error::Validation(format!("invalid multipart body: {e}"))
}

/// Base URL that photo links are built on.
///
/// Uses `server.public_url` when set, then the request's `Host` header (with
/// the scheme from `X-Forwarded-Proto`), then the configured listen address.
pub fn base_url(config: &Config, headers: &HeaderMap) -> String {
    if let Some(url) = config.server.public_url.as_deref() {
        return url.trim_end_matches('/').to_string();
    }

    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    match host {
        Some(host) => {
            let scheme = headers
                .get("x-forwarded-proto")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("http");
            format!("{scheme}://{host}")
        }
        None => format!("http://{}:{}", config.server.host, config.server.port),
    }
}
