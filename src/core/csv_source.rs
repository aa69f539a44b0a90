use crate::domain::model::TaxRecord;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::collections::HashMap;

/// 讀取 CSV 檔案成有序的資料列序列
pub async fn read_records<S: Storage>(storage: &S, path: &str) -> Result<Vec<TaxRecord>> {
    let bytes = storage.read_file(path).await?;

    // 資料列寬度不一時照樣容忍，缺少的尾端欄位視為不存在
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes.as_slice());

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let mut columns = HashMap::with_capacity(headers.len());
        for (header, value) in headers.iter().zip(row.iter()) {
            columns.insert(header.to_string(), value.to_string());
        }
        records.push(TaxRecord { columns });
    }

    tracing::debug!("📄 Read {} records from {}", records.len(), path);
    Ok(records)
}

/// 只比對第一筆資料列的欄位，刻意不做全表驗證
pub fn validate_required_columns(records: &[TaxRecord], required: &[String]) -> bool {
    let Some(first) = records.first() else {
        tracing::error!("❌ CSV file is empty");
        return false;
    };

    let missing: Vec<&str> = required
        .iter()
        .filter(|column| !first.columns.contains_key(column.as_str()))
        .map(String::as_str)
        .collect();

    if !missing.is_empty() {
        tracing::error!("❌ CSV is missing required fields: {}", missing.join(", "));
        return false;
    }

    true
}
