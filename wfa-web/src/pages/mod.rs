//! Server-rendered page composers
//!
//! Each composer: cache lookup → parameterized content query → not-found
//! branch when the primary query comes back empty → merge into the layout
//! chrome → cache insert tagged for webhook invalidation.

pub mod author;
pub mod blog;
pub mod category;
pub mod guide;
pub mod home;
pub mod layout;
pub mod render;
pub mod review;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Page composition errors
#[derive(Debug)]
pub enum PageError {
    NotFound(String),
    Upstream(String),
}

impl From<wfa_common::Error> for PageError {
    fn from(err: wfa_common::Error) -> Self {
        match err {
            wfa_common::Error::NotFound(msg) => PageError::NotFound(msg),
            other => PageError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound(what) => {
                let body = layout::page(
                    "Not found",
                    "",
                    &format!(
                        "<section class=\"error\"><h1>Page not found</h1><p>{}</p></section>",
                        wfa_common::text::escape_html(&what)
                    ),
                );
                (StatusCode::NOT_FOUND, Html(body)).into_response()
            }
            PageError::Upstream(msg) => {
                tracing::error!("Page composition failed: {}", msg);
                let body = layout::page(
                    "Something went wrong",
                    "",
                    "<section class=\"error\"><h1>Something went wrong</h1>\
                     <p>Please try again in a moment.</p></section>",
                );
                (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
            }
        }
    }
}
