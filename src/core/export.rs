use crate::domain::model::TaxObject;
use crate::domain::ports::TaxApi;
use crate::utils::error::Result;

pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// 讀取端流程：取得屬性清單後，沿著 after 游標翻完全部 tax 物件
pub struct TaxExporter<A> {
    api: A,
    page_limit: u32,
}

impl<A: TaxApi> TaxExporter<A> {
    pub fn new(api: A, page_limit: u32) -> Self {
        Self { api, page_limit }
    }

    /// 任一步驟收到非 2xx 即中止，不保留已累積的部分結果
    pub async fn fetch_all(&self, token: &str) -> Result<Vec<TaxObject>> {
        let properties = self.api.property_names(token).await?;
        tracing::info!("📋 Retrieved {} tax properties", properties.len());

        let mut taxes = Vec::new();
        let mut after: Option<String> = None;
        let mut page_no = 0u32;

        loop {
            page_no += 1;
            let page = self
                .api
                .list_page(token, self.page_limit, &properties, after.as_deref())
                .await?;

            tracing::debug!("📄 Page {}: {} tax objects", page_no, page.results.len());
            taxes.extend(page.results);

            match page.paging.and_then(|paging| paging.next) {
                Some(next) => after = Some(next.after),
                None => break,
            }
        }

        tracing::info!("🏁 Retrieved {} tax objects from HubSpot", taxes.len());
        Ok(taxes)
    }
}
