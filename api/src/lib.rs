//! HTTP API for the NEXTRA security backend.
//!
//! Provides endpoints for:
//! - Detection logs (list, append)
//! - Verified users (list, add with photo upload, remove by name)
//! - Verified-user match check by name
//!
//! Everything else is served from the frontend bundle, with the bundle's
//! `index.html` as the 404 page.

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;
pub mod uploads;

pub use error::ApiError;
pub use server::{router, ApiConfig, ApiServer};
pub use state::AppState;
pub use uploads::UploadDir;
