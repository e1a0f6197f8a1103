use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::{
    entities::contact::{ContactMessageDoc, PersistedDocument},
    errors::AppError,
    repositories::content_store::ContentStore,
    settings::StoreCredentials,
};

/// Document-creation client for the Sanity HTTP mutate API.
pub struct SanityContentStore {
    client: reqwest::Client,
    mutate_url: Url,
    token: String,
}

impl SanityContentStore {
    pub fn new(credentials: &StoreCredentials) -> Result<Self, AppError> {
        let mutate_url = Url::parse(&format!(
            "https://{}.api.sanity.io/v{}/data/mutate/{}",
            credentials.project_id, credentials.api_version, credentials.dataset
        ))
        .map_err(|e| AppError::Internal(format!("invalid content store URL: {e}")))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(SanityContentStore {
            client,
            mutate_url,
            token: credentials.token.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct MutateResponse {
    results: Vec<MutateResult>,
}

#[derive(Debug, Deserialize)]
struct MutateResult {
    id: String,
}

#[async_trait]
impl ContentStore for SanityContentStore {
    async fn create_contact_message(
        &self,
        doc: &ContactMessageDoc,
    ) -> Result<PersistedDocument, AppError> {
        let body = serde_json::json!({ "mutations": [{ "create": doc }] });

        let response = self
            .client
            .post(self.mutate_url.clone())
            .query(&[("returnIds", "true")])
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::ContentStore(format!(
                "mutate returned {status}: {detail}"
            )));
        }

        let mutated: MutateResponse = response.json().await?;

        // An empty result set means nothing was created, whatever the
        // status said.
        let created = mutated
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ContentStore("mutate returned no results".to_string()))?;

        Ok(PersistedDocument { id: created.id })
    }
}
