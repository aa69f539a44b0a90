use crate::domain::model::TaxObject;
use crate::utils::error::{EtlError, Result};

/// 匯出結果的輸出格式
pub fn to_json(taxes: &[TaxObject]) -> Result<String> {
    Ok(serde_json::to_string_pretty(taxes)?)
}

/// CSV 欄位順序：id + 第一筆物件的屬性名稱
pub fn to_csv_bytes(taxes: &[TaxObject]) -> Result<Vec<u8>> {
    let mut fields = vec!["id".to_string()];
    if let Some(first) = taxes.first() {
        fields.extend(first.properties.keys().cloned());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&fields)?;

    for tax in taxes {
        let mut row = vec![tax.id.as_str()];
        for field in &fields[1..] {
            row.push(tax.property(field).unwrap_or(""));
        }
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::ProcessingError {
            message: format!("CSV buffer flush failed: {}", e),
        })
}

/// 主控台表格輸出
pub fn render_table(taxes: &[TaxObject]) -> String {
    let mut out = String::new();
    out.push_str("\nTax Objects:\n\n");
    out.push_str(&format!(
        "{:<10} {:<30} {:<10} {:<20} {}\n",
        "ID", "Name", "Rate", "External ID", "Other Properties"
    ));
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for tax in taxes {
        let name = tax.property("name").unwrap_or("unnamed");
        let rate = tax.property("rate").unwrap_or("unknown");
        // 讀取端的屬性名稱會被 portal 轉成小寫
        let external_id = tax.property("externalid").unwrap_or("");

        let other: Vec<String> = tax
            .properties
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "name" | "rate" | "externalid"))
            .filter_map(|(key, value)| value.as_ref().map(|v| format!("{}={}", key, v)))
            .collect();
        let other = other.join(", ");

        out.push_str(&format!(
            "{:<10} {:<30} {:<10} {:<20} {}\n",
            tax.id,
            truncate(name, 28),
            rate,
            truncate(external_id, 18),
            truncate(&other, 30)
        ));
    }

    out
}

/// 第一筆物件的原始結構，附在表格後方當參考
pub fn render_sample(tax: &TaxObject) -> Result<String> {
    Ok(serde_json::to_string_pretty(tax)?)
}

fn truncate(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((index, _)) => &value[..index],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn tax(id: &str, pairs: &[(&str, Option<&str>)]) -> TaxObject {
        let properties: BTreeMap<String, Option<String>> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect();
        TaxObject {
            id: id.to_string(),
            properties,
        }
    }

    #[test]
    fn test_csv_header_is_id_plus_first_object_properties() {
        let taxes = vec![
            tax(
                "1",
                &[("name", Some("Tax A")), ("rate", Some("5"))],
            ),
            tax(
                "2",
                &[("name", Some("Tax B")), ("rate", None)],
            ),
        ];

        let bytes = to_csv_bytes(&taxes).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "id,name,rate");
        assert_eq!(lines[1], "1,Tax A,5");
        assert_eq!(lines[2], "2,Tax B,");
    }

    #[test]
    fn test_csv_of_empty_list_has_only_id_header() {
        let bytes = to_csv_bytes(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text.trim(), "id");
    }

    #[test]
    fn test_table_lists_core_columns_and_other_properties() {
        let taxes = vec![tax(
            "42",
            &[
                ("name", Some("Sales Tax NY")),
                ("rate", Some("8.875")),
                ("externalid", Some("NY-001")),
                ("hs_lastmodifieddate", Some("2024-01-01")),
            ],
        )];

        let table = render_table(&taxes);

        assert!(table.contains("ID"));
        assert!(table.contains("Sales Tax NY"));
        assert!(table.contains("8.875"));
        assert!(table.contains("NY-001"));
        assert!(table.contains("hs_lastmodifieddate=2024-01-01"));
    }

    #[test]
    fn test_table_truncates_long_names() {
        let long_name = "A very long tax name that exceeds the column width";
        let taxes = vec![tax("1", &[("name", Some(long_name))])];

        let table = render_table(&taxes);

        assert!(table.contains(&long_name[..28]));
        assert!(!table.contains(long_name));
    }

    #[test]
    fn test_json_round_trips() {
        let taxes = vec![tax("1", &[("rate", Some("20"))])];

        let json = to_json(&taxes).unwrap();
        let parsed: Vec<TaxObject> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].property("rate"), Some("20"));
    }
}
