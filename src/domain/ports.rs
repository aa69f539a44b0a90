use crate::domain::model::{BatchCreateResponse, TaxPage, TaxProperties};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 從外部設定檔解析 bearer token 的提供者
pub trait TokenProvider: Send + Sync {
    fn access_token(&self, portal: Option<&str>) -> Result<String>;
}

/// HubSpot taxes 物件 API 的抽象，方便測試時注入替身
#[async_trait]
pub trait TaxApi: Send + Sync {
    async fn batch_create(
        &self,
        token: &str,
        batch: &[TaxProperties],
    ) -> Result<BatchCreateResponse>;

    async fn property_names(&self, token: &str) -> Result<Vec<String>>;

    async fn list_page(
        &self,
        token: &str,
        limit: u32,
        properties: &[String],
        after: Option<&str>,
    ) -> Result<TaxPage>;
}
