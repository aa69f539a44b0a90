use crate::core::batch::{chunk_records, HUBSPOT_BATCH_SIZE};
use crate::core::csv_source;
use crate::core::mapping::FieldMapping;
use crate::domain::model::{ImportStats, TaxProperties};
use crate::domain::ports::{Storage, TaxApi, TokenProvider};
use crate::utils::error::Result;
use std::time::Duration;

pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(500);

/// 批次匯入流程：讀檔 → 驗證 → 轉換 → 分批 → 送出 → 統計
pub struct TaxImporter<S, A, T> {
    storage: S,
    api: A,
    tokens: T,
    mapping: FieldMapping,
    batch_delay: Duration,
    portal: Option<String>,
}

impl<S: Storage, A: TaxApi, T: TokenProvider> TaxImporter<S, A, T> {
    pub fn new(storage: S, api: A, tokens: T, mapping: FieldMapping) -> Self {
        Self {
            storage,
            api,
            tokens,
            mapping,
            batch_delay: DEFAULT_BATCH_DELAY,
            portal: None,
        }
    }

    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    pub fn with_portal(mut self, portal: Option<String>) -> Self {
        self.portal = portal;
        self
    }

    /// 只讀取並驗證 CSV，不發出任何網路請求
    pub async fn validate(&self, csv_path: &str) -> Result<bool> {
        let records = csv_source::read_records(&self.storage, csv_path).await?;
        Ok(csv_source::validate_required_columns(
            &records,
            self.mapping.required_columns(),
        ))
    }

    pub async fn run(&self, csv_path: &str, token: Option<String>) -> Result<ImportStats> {
        let mut stats = ImportStats::default();

        // 呼叫端沒給 token 時向設定檔解析；失敗直接中止，不產生部分統計
        let token = match token {
            Some(token) => token,
            None => {
                let token = self.tokens.access_token(self.portal.as_deref())?;
                tracing::info!("🔑 Loaded API token from config");
                token
            }
        };

        let records = csv_source::read_records(&self.storage, csv_path).await?;

        if !csv_source::validate_required_columns(&records, self.mapping.required_columns()) {
            tracing::error!("❌ CSV validation failed. Import aborted.");
            return Ok(stats);
        }

        stats.total = records.len();
        tracing::info!("🚀 Starting import of {} tax records", stats.total);

        let mapped: Vec<TaxProperties> = records
            .iter()
            .map(|record| self.mapping.apply(record))
            .collect();

        let batches = chunk_records(mapped, HUBSPOT_BATCH_SIZE);
        tracing::info!("📦 Data split into {} batches", batches.len());

        for (index, batch) in batches.iter().enumerate() {
            let batch_no = index + 1;
            tracing::info!(
                "Processing batch {} of {} ({} records)",
                batch_no,
                batches.len(),
                batch.len()
            );

            match self.api.batch_create(&token, batch).await {
                Ok(response) => {
                    stats.successful += response.results.len();
                    tracing::info!(
                        "✅ Batch {} completed: {} records imported successfully",
                        batch_no,
                        response.results.len()
                    );

                    for error in &response.errors {
                        tracing::error!("Error in batch {}: {}", batch_no, error);
                        stats.failed += 1;
                    }
                }
                Err(e) => {
                    // 整批計入失敗，繼續處理下一批
                    tracing::error!("❌ Failed to process batch {}: {}", batch_no, e);
                    stats.failed += batch.len();
                }
            }

            // 固定間隔，粗略避開速率限制
            tokio::time::sleep(self.batch_delay).await;
        }

        tracing::info!(
            "🏁 Import completed: {} successful, {} failed",
            stats.successful,
            stats.failed
        );
        Ok(stats)
    }
}
