//! Contact CRUD route handlers.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use contacts_core::ContactId;
use contacts_db::models::{Contact, Page};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;

/// Request body for creating a contact. Every field is optional.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    /// Client-chosen id; a UUID is generated when absent or empty.
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
    pub photo_url: Option<String>,
}

impl ContactRequest {
    fn into_model(self) -> Contact {
        Contact {
            id: self.id.map(ContactId::from).unwrap_or_default(),
            name: self.name,
            email: self.email,
            title: self.title,
            phone: self.phone,
            address: self.address,
            status: self.status,
            photo_url: self.photo_url,
        }
    }
}

/// Contact response.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
    pub photo_url: Option<String>,
}

impl ContactResponse {
    fn from_model(contact: Contact) -> Self {
        Self {
            id: contact.id.into(),
            name: contact.name,
            email: contact.email,
            title: contact.title,
            phone: contact.phone,
            address: contact.address,
            status: contact.status,
            photo_url: contact.photo_url,
        }
    }
}

/// One page of contacts.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPageResponse {
    pub content: Vec<ContactResponse>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u32,
    pub size: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl ContactPageResponse {
    fn from_page(page: Page<Contact>) -> Self {
        let page = page.map(ContactResponse::from_model);
        Self {
            content: page.content,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            number: page.number,
            size: page.size,
            number_of_elements: page.number_of_elements,
            first: page.first,
            last: page.last,
            empty: page.empty,
        }
    }
}

/// Query parameters for listing contacts.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListContactsParams {
    /// Zero-based page index.
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_size() -> u32 {
    10
}

/// POST /contacts
#[utoipa::path(
    post,
    path = "/contacts",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Contact created", body = ContactResponse)
    )
)]
pub async fn create_contact(
    State(ctx): State<AppContext>,
    Json(payload): Json<ContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    let contact = ctx.contacts.create(payload.into_model())?;
    let location = format!("/contacts/{}", contact.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ContactResponse::from_model(contact)),
    ))
}

/// GET /contacts
#[utoipa::path(
    get,
    path = "/contacts",
    params(ListContactsParams),
    responses(
        (status = 200, description = "One page of contacts sorted by name", body = ContactPageResponse),
        (status = 400, description = "Invalid page size")
    )
)]
pub async fn list_contacts(
    State(ctx): State<AppContext>,
    Query(params): Query<ListContactsParams>,
) -> Result<Json<ContactPageResponse>, AppError> {
    let page = ctx.contacts.list(params.page, params.size)?;
    Ok(Json(ContactPageResponse::from_page(page)))
}

/// GET /contacts/:id
#[utoipa::path(
    get,
    path = "/contacts/{id}",
    params(("id" = String, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Contact details", body = ContactResponse),
        (status = 404, description = "Contact not found")
    )
)]
pub async fn get_contact(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<ContactResponse>, AppError> {
    let contact = ctx.contacts.get(&ContactId::from(id))?;
    Ok(Json(ContactResponse::from_model(contact)))
}

/// DELETE /contacts/:id
#[utoipa::path(
    delete,
    path = "/contacts/{id}",
    params(("id" = String, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Contact deleted"),
        (status = 404, description = "Contact not found")
    )
)]
pub async fn delete_contact(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    ctx.contacts.delete(&ContactId::from(id))?;
    Ok(StatusCode::OK)
}
