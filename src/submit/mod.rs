//! Where accepted circulars are sent.
//!
//! The core only hands over a snapshot and waits for an answer. What the
//! endpoint does with it (document generation, mail-out) is its business.

pub mod http;

use async_trait::async_trait;

use crate::form::FormSnapshot;

pub use http::HttpSubmitter;

/// Errors from submitting a circular.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint rejected submission (status {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}

/// What the endpoint answered for a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub status: u16,
}

#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, snapshot: &FormSnapshot) -> Result<SubmitReceipt, SubmitError>;
}
