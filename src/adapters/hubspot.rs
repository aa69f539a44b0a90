use crate::domain::model::{
    BatchCreateRequest, BatchCreateResponse, PropertiesResponse, TaxPage, TaxProperties,
};
use crate::domain::ports::TaxApi;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

const BATCH_CREATE_PATH: &str = "/crm/v3/objects/taxes/batch/create";
const PROPERTIES_PATH: &str = "/crm/v3/properties/taxes";
const OBJECTS_PATH: &str = "/crm/v3/objects/taxes";

// 日誌中 payload 預覽的截斷長度
const PAYLOAD_PREVIEW_CHARS: usize = 300;

/// HubSpot taxes API 的 reqwest 實作
pub struct HubSpotClient {
    client: Client,
    base_url: String,
}

impl HubSpotClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!("❌ HubSpot returned {}: {}", status, body);
        Err(EtlError::ApiResponseError {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl TaxApi for HubSpotClient {
    async fn batch_create(
        &self,
        token: &str,
        batch: &[TaxProperties],
    ) -> Result<BatchCreateResponse> {
        let payload = BatchCreateRequest::from_batch(batch);

        let serialized = serde_json::to_string(&payload)?;
        let preview: String = serialized.chars().take(PAYLOAD_PREVIEW_CHARS).collect();
        tracing::debug!("📤 Batch payload ({} bytes): {}", serialized.len(), preview);

        let response = self
            .client
            .post(self.url(BATCH_CREATE_PATH))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn property_names(&self, token: &str) -> Result<Vec<String>> {
        tracing::debug!("Fetching tax property schema");

        let response = self
            .client
            .get(self.url(PROPERTIES_PATH))
            .bearer_auth(token)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let parsed: PropertiesResponse = response.json().await?;
        Ok(parsed.results.into_iter().map(|p| p.name).collect())
    }

    async fn list_page(
        &self,
        token: &str,
        limit: u32,
        properties: &[String],
        after: Option<&str>,
    ) -> Result<TaxPage> {
        let mut request = self
            .client
            .get(self.url(OBJECTS_PATH))
            .bearer_auth(token)
            .query(&[("limit", limit.to_string())]);

        for property in properties {
            request = request.query(&[("properties", property)]);
        }

        if let Some(after) = after {
            request = request.query(&[("after", after)]);
        }

        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }
}
