//! Response model.
//!
//! # Data Flow
//! ```text
//! handler(uri)
//!     → Response::{Content, Document, Redirect}
//!     → Response::fold(on_content, on_document, on_redirect)
//!     → exactly one callback runs (renderer decides how output is written)
//! ```
//!
//! # Design Decisions
//! - Closed sum type: adding a variant breaks every consumer at compile time
//! - Rendering side effects live in the callbacks, never in the model
//! - Documents stay a tree until render time

pub mod document;

use std::future::Future;

pub use document::{Document, Element, Node};

/// Content type used for document responses unless one is given.
pub const DEFAULT_DOCUMENT_CONTENT_TYPE: &str = "text/html";

/// Raw textual payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentResponse {
    pub content: String,
    pub content_type: String,
}

/// Structured document serialized at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResponse {
    pub content: Document,
    pub content_type: String,
}

/// Instructs the caller to redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectResponse {
    pub location: String,
}

/// A handler's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Content(ContentResponse),
    Document(DocumentResponse),
    Redirect(RedirectResponse),
}

impl Response {
    pub fn content(content: impl Into<String>, content_type: impl Into<String>) -> Self {
        Response::Content(ContentResponse {
            content: content.into(),
            content_type: content_type.into(),
        })
    }

    pub fn document(content: Document) -> Self {
        Self::document_with_type(content, DEFAULT_DOCUMENT_CONTENT_TYPE)
    }

    pub fn document_with_type(content: Document, content_type: impl Into<String>) -> Self {
        Response::Document(DocumentResponse {
            content,
            content_type: content_type.into(),
        })
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Response::Redirect(RedirectResponse {
            location: location.into(),
        })
    }

    /// Run the callback matching this response's variant and await its result.
    ///
    /// `state` is handed to whichever callback runs, so all three may share a
    /// mutable borrow (e.g. the output environment).
    pub async fn fold<S, T, C, D, R, FC, FD, FR>(
        self,
        state: S,
        on_content: C,
        on_document: D,
        on_redirect: R,
    ) -> T
    where
        C: FnOnce(S, ContentResponse) -> FC,
        D: FnOnce(S, DocumentResponse) -> FD,
        R: FnOnce(S, RedirectResponse) -> FR,
        FC: Future<Output = T>,
        FD: Future<Output = T>,
        FR: Future<Output = T>,
    {
        match self {
            Response::Content(content) => on_content(state, content).await,
            Response::Document(document) => on_document(state, document).await,
            Response::Redirect(redirect) => on_redirect(state, redirect).await,
        }
    }
}
