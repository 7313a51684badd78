//! Request handlers and their wire types.
//!
//! Request bodies are decoded into structs whose fields are all optional,
//! then converted into validated records before any store call or file
//! write happens. Store calls are blocking file I/O and run on the blocking
//! thread pool.

use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    Json,
};
use nextra_store::StoreError;
use nextra_types::{LogEntry, ValidationError, VerifiedUser};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{ApiError, AppState};

const INVALID_LOG: &str = "Invalid log data";
const INVALID_USER: &str = "Invalid user data";
const NAME_REQUIRED: &str = "Name required";

// ── Logs ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct AddLogRequest {
    pub name: Option<String>,
    pub gait: Option<String>,
    pub auth: Option<String>,
    pub status: Option<String>,
    pub time: Option<String>,
}

impl AddLogRequest {
    pub fn into_entry(self) -> Result<LogEntry, ValidationError> {
        let entry = LogEntry {
            name: self.name.unwrap_or_default(),
            gait: self.gait,
            auth: self.auth,
            status: self.status,
            time: self.time.unwrap_or_default(),
        };
        entry.validate()?;
        Ok(entry)
    }
}

#[derive(Debug, Serialize)]
pub struct AddLogResponse {
    pub message: &'static str,
    pub log: LogEntry,
}

pub async fn get_logs(State(state): State<AppState>) -> Result<Json<Vec<LogEntry>>, ApiError> {
    let logs = state.logs.clone();
    let logs = blocking(move || logs.list_logs())
        .await
        .map_err(|e| ApiError::storage(e, "logs", "reading logs"))?;
    Ok(Json(logs))
}

pub async fn add_log(
    State(state): State<AppState>,
    payload: Result<Json<AddLogRequest>, JsonRejection>,
) -> Result<Json<AddLogResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        debug!(error = %e, "rejected log payload");
        ApiError::invalid(INVALID_LOG)
    })?;
    let entry = request
        .into_entry()
        .map_err(|_| ApiError::invalid(INVALID_LOG))?;

    let logs = state.logs.clone();
    let log = blocking(move || logs.append_log(entry))
        .await
        .map_err(|e| ApiError::storage(e, "logs", "saving log"))?;

    Ok(Json(AddLogResponse {
        message: "Log saved successfully!",
        log,
    }))
}

// ── Verified users ───────────────────────────────────────────────────────

/// Fields collected from the add-user multipart form.
#[derive(Debug, Default)]
pub struct UserForm {
    pub name: Option<String>,
    pub role: Option<String>,
    /// Client filename and content of the `photo` file field.
    pub photo: Option<(String, Vec<u8>)>,
}

impl UserForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = UserForm::default();
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            debug!(error = %e, "malformed user form");
            ApiError::invalid(INVALID_USER)
        })? {
            let field_name = field.name().map(str::to_owned);
            match field_name.as_deref() {
                Some("name") => form.name = Some(field_text(field).await?),
                Some("role") => form.role = Some(field_text(field).await?),
                Some("photo") => {
                    let Some(file_name) = field.file_name().map(str::to_owned) else {
                        continue;
                    };
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|_| ApiError::invalid(INVALID_USER))?;
                    form.photo = Some((file_name, bytes.to_vec()));
                }
                _ => {}
            }
        }
        Ok(form)
    }
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field.text().await.map_err(|_| ApiError::invalid(INVALID_USER))
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Serialize)]
pub struct AddUserResponse {
    pub message: &'static str,
    pub user: VerifiedUser,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn get_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<VerifiedUser>>, ApiError> {
    let users = state.users.clone();
    let users = blocking(move || users.list_users())
        .await
        .map_err(|e| ApiError::storage(e, "users", "reading users"))?;
    Ok(Json(users))
}

pub async fn add_user(
    State(state): State<AppState>,
    multipart: Result<Multipart, axum::extract::multipart::MultipartRejection>,
) -> Result<Json<AddUserResponse>, ApiError> {
    let mut multipart = multipart.map_err(|_| ApiError::invalid(INVALID_USER))?;
    let form = UserForm::read(&mut multipart).await?;

    // Everything is checked before the photo touches the disk.
    let (Some(name), Some(role), Some((file_name, bytes))) =
        (present(form.name), present(form.role), form.photo)
    else {
        return Err(ApiError::invalid(INVALID_USER));
    };
    let stored_name = state
        .uploads
        .stored_name(&file_name)
        .ok_or_else(|| ApiError::invalid(INVALID_USER))?;

    let photo = state.uploads.save(&stored_name, &bytes).await?;
    let user =
        VerifiedUser::new(name, role, photo).map_err(|_| ApiError::invalid(INVALID_USER))?;

    let users = state.users.clone();
    let user = blocking(move || users.add_user(user))
        .await
        .map_err(|e| ApiError::storage(e, "users", "saving user"))?;
    info!(name = %user.name, role = %user.role, "verified user added");

    Ok(Json(AddUserResponse {
        message: "User saved successfully!",
        user,
    }))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let users = state.users.clone();
    let removal = blocking(move || users.remove_user(&name))
        .await
        .map_err(|e| ApiError::storage(e, "users", "deleting user"))?;
    info!(name = %removal.name, removed = removal.removed, "verified user removed");

    Ok(Json(MessageResponse {
        message: removal.message(),
    }))
}

// ── Match check ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CheckUserRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckUserResponse {
    pub verified: bool,
    pub user: Option<VerifiedUser>,
}

pub async fn check_user(
    State(state): State<AppState>,
    payload: Result<Json<CheckUserRequest>, JsonRejection>,
) -> Result<Json<CheckUserResponse>, ApiError> {
    let name = payload
        .ok()
        .and_then(|Json(request)| present(request.name))
        .ok_or_else(|| ApiError::invalid(NAME_REQUIRED))?;

    let users = state.users.clone();
    let user = blocking(move || users.find_user(&name))
        .await
        .map_err(|e| ApiError::storage(e, "users", "reading users"))?;

    Ok(Json(CheckUserResponse {
        verified: user.is_some(),
        user,
    }))
}

/// Run a store operation on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Backend(format!("store task failed: {e}")))?
}
