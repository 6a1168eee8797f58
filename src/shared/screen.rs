//! Building blocks shared by every admin screen state machine.
//!
//! A screen lives for the duration of one user workflow. It owns its own
//! freshly fetched data (there is no cross-screen cache), reports outcomes to
//! the operator through a single blocking [`Notice`], and keeps the last
//! submitted form around so a rejected submission can be corrected in place.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::shared::types::ApiResponse;
use crate::shared::validation::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Message the operator must acknowledge (the console shows it as a modal)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Error notice carrying the backend message, prefixed by what failed.
    pub fn from_error(action: &str, err: &AppError) -> Self {
        Self::error(format!("{}: {}", action, err.user_message()))
    }
}

/// Lifecycle of a form screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    /// Editable; may carry field errors or a notice from the last attempt
    Idle,
    /// A write is in flight; the submit control is disabled
    Submitting,
    /// A delete is in flight; the delete control is disabled
    Deleting,
    /// The workflow finished and the console navigates away
    Done,
}

impl FormStatus {
    pub fn accepts_actions(&self) -> bool {
        matches!(self, FormStatus::Idle)
    }
}

/// Result of a submit or delete action on a screen
#[derive(Debug)]
pub enum Submission<T> {
    /// The backend accepted the write; the console navigates to `redirect`
    Saved { value: T, redirect: String },
    /// Rejected locally before any network call
    Rejected(Vec<FieldError>),
    /// The backend (or the transport) refused the write; form state is kept
    Failed(AppError),
}

impl<T> Submission<T> {
    pub fn is_saved(&self) -> bool {
        matches!(self, Submission::Saved { .. })
    }

    /// HTTP status a handler should answer with for this outcome
    pub fn status(&self, saved: StatusCode) -> StatusCode {
        match self {
            Submission::Saved { .. } => saved,
            Submission::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Submission::Failed(err) => err.status_code(),
        }
    }

    pub fn redirect(&self) -> Option<&str> {
        match self {
            Submission::Saved { redirect, .. } => Some(redirect.as_str()),
            _ => None,
        }
    }
}

/// A screen could not be opened; the console returns to `redirect`
#[derive(Debug)]
pub struct ScreenAbort {
    pub redirect: String,
    pub notice: Notice,
    pub error: AppError,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RedirectView {
    pub redirect: String,
    pub notice: Notice,
}

impl IntoResponse for ScreenAbort {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let message = self.notice.message.clone();
        let view = RedirectView {
            redirect: self.redirect,
            notice: self.notice,
        };
        let body = Json(ApiResponse::view(false, view, Some(message), vec![]));
        (status, body).into_response()
    }
}
