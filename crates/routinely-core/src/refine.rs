//! AI-assisted todo text refinement.
//!
//! One user-initiated attempt per call, no retry, no backoff. The call never
//! mutates the store; only an explicit "use this text" confirmation by the
//! caller does, so dropping an in-flight call rolls nothing back.

use serde::{Deserialize, Serialize};

use crate::config::RefineConfig;
use crate::error::RefineError;

/// Result of a refinement call: the rewritten text plus whether the model
/// judged the instructions distinct enough to be easier to follow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Refinement {
    pub refined_text: String,
    pub is_distinct: bool,
}

/// A refinement backend. The HTTP implementation is the production one;
/// tests and offline callers can supply their own.
pub trait Refiner {
    fn refine(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Refinement, RefineError>> + Send;
}

#[derive(Serialize)]
struct RefineRequest<'a> {
    todo_list_item: &'a str,
}

#[derive(Deserialize)]
struct RefineResponse {
    refined_todo_list_item: String,
    is_distinct: bool,
}

/// Calls the configured refinement endpoint over HTTPS.
pub struct HttpRefiner {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpRefiner {
    pub fn new(config: &RefineConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

impl Refiner for HttpRefiner {
    async fn refine(&self, text: &str) -> Result<Refinement, RefineError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&RefineRequest {
                todo_list_item: text,
            });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RefineError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: RefineResponse =
            serde_json::from_str(&body).map_err(|e| RefineError::MalformedResponse(e.to_string()))?;
        Ok(Refinement {
            refined_text: parsed.refined_todo_list_item,
            is_distinct: parsed.is_distinct,
        })
    }
}
