//! Form-encoded POST to the circular generation endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::form::FormSnapshot;

use super::{SubmitError, SubmitReceipt, Submitter};

#[derive(Debug)]
pub struct HttpSubmitter {
    http: Client,
    endpoint: Url,
}

impl HttpSubmitter {
    /// Create a submitter for `endpoint` with a per-request timeout.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| SubmitError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, snapshot: &FormSnapshot) -> Result<SubmitReceipt, SubmitError> {
        tracing::debug!(endpoint = %self.endpoint, "posting circular");

        let response = self
            .http
            .post(self.endpoint.clone())
            .form(&snapshot.to_form_pairs())
            .send()
            .await?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_else(|_| "(no body)".into());
            return Err(SubmitError::Rejected { status, body });
        }

        Ok(SubmitReceipt { status })
    }
}
