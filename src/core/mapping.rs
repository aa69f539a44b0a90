use crate::domain::model::{PropertyValue, TaxProperties, TaxRecord};
use serde::Deserialize;

/// 欄位值的轉型策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coercion {
    #[default]
    None,
    /// 嘗試解析為浮點數，失敗時原樣送出字串
    Number,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldRule {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub coercion: Coercion,
}

impl FieldRule {
    pub fn new(source: &str, target: &str, coercion: Coercion) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            coercion,
        }
    }
}

/// 來源欄位到 HubSpot 屬性的對照表
#[derive(Debug, Clone)]
pub struct FieldMapping {
    rules: Vec<FieldRule>,
    required: Vec<String>,
}

impl FieldMapping {
    pub fn new(rules: Vec<FieldRule>, required: Vec<String>) -> Self {
        Self { rules, required }
    }

    /// 行政區稅率檔的對照表
    pub fn jurisdiction() -> Self {
        Self::new(
            vec![
                FieldRule::new("jurisdiction_desc", "name", Coercion::None),
                FieldRule::new("tax_percentage", "rate", Coercion::Number),
                FieldRule::new("jurisdiction_id", "externalId", Coercion::None),
            ],
            vec![
                "jurisdiction_id".to_string(),
                "jurisdiction_desc".to_string(),
                "tax_percentage".to_string(),
            ],
        )
    }

    /// 簡易稅率檔的對照表，沿用舊版匯入器的行為
    pub fn simple() -> Self {
        Self::new(
            vec![
                FieldRule::new("name", "name", Coercion::None),
                FieldRule::new("rate", "rate", Coercion::Number),
                // TODO: description 會蓋掉 name（與舊版匯入器一致）；
                // 改掉之前需先跟 CRM 端確認 description 應該對應哪個屬性
                FieldRule::new("description", "name", Coercion::None),
            ],
            vec!["name".to_string(), "rate".to_string()],
        )
    }

    pub fn required_columns(&self) -> &[String] {
        &self.required
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// 將一筆資料列轉成目標屬性；空字串與缺少的欄位一律略過
    pub fn apply(&self, record: &TaxRecord) -> TaxProperties {
        let mut properties = TaxProperties::new();

        // 規則依序套用，重複的 target 由後面的規則覆蓋
        for rule in &self.rules {
            let Some(value) = record.get(&rule.source) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }

            let mapped = match rule.coercion {
                Coercion::Number => match value.parse::<f64>() {
                    Ok(number) => PropertyValue::Number(number),
                    Err(_) => PropertyValue::Text(value.to_string()),
                },
                Coercion::None => PropertyValue::Text(value.to_string()),
            };

            properties.insert(rule.target.clone(), mapped);
        }

        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(pairs: &[(&str, &str)]) -> TaxRecord {
        let columns: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TaxRecord { columns }
    }

    #[test]
    fn test_jurisdiction_mapping_translates_all_fields() {
        let mapping = FieldMapping::jurisdiction();
        let properties = mapping.apply(&record(&[
            ("jurisdiction_id", "NY-001"),
            ("jurisdiction_desc", "Sales Tax NY"),
            ("tax_percentage", "8.875"),
        ]));

        assert_eq!(
            properties.get("name"),
            Some(&PropertyValue::Text("Sales Tax NY".to_string()))
        );
        assert_eq!(properties.get("rate"), Some(&PropertyValue::Number(8.875)));
        assert_eq!(
            properties.get("externalId"),
            Some(&PropertyValue::Text("NY-001".to_string()))
        );
    }

    #[test]
    fn test_empty_and_absent_values_are_dropped() {
        let mapping = FieldMapping::jurisdiction();
        let properties = mapping.apply(&record(&[
            ("jurisdiction_id", ""),
            ("jurisdiction_desc", "VAT UK"),
            // tax_percentage column missing entirely
        ]));

        assert_eq!(properties.len(), 1);
        assert!(properties.contains_key("name"));
        assert!(!properties.contains_key("externalId"));
        assert!(!properties.contains_key("rate"));
    }

    #[test]
    fn test_rate_coercion_falls_back_to_text_on_parse_failure() {
        let mapping = FieldMapping::jurisdiction();
        let properties = mapping.apply(&record(&[
            ("jurisdiction_id", "UK-001"),
            ("jurisdiction_desc", "VAT UK"),
            ("tax_percentage", "20%"),
        ]));

        assert_eq!(
            properties.get("rate"),
            Some(&PropertyValue::Text("20%".to_string()))
        );
    }

    #[test]
    fn test_simple_mapping_description_wins_over_name() {
        let mapping = FieldMapping::simple();
        let properties = mapping.apply(&record(&[
            ("name", "Sales Tax NY"),
            ("rate", "8.875"),
            ("description", "New York State and City combined sales tax"),
        ]));

        // Last rule targeting "name" wins, matching the legacy importer
        assert_eq!(
            properties.get("name"),
            Some(&PropertyValue::Text(
                "New York State and City combined sales tax".to_string()
            ))
        );
    }

    #[test]
    fn test_simple_mapping_without_description_keeps_name() {
        let mapping = FieldMapping::simple();
        let properties = mapping.apply(&record(&[("name", "VAT UK"), ("rate", "20")]));

        assert_eq!(
            properties.get("name"),
            Some(&PropertyValue::Text("VAT UK".to_string()))
        );
        assert_eq!(properties.get("rate"), Some(&PropertyValue::Number(20.0)));
    }

    #[test]
    fn test_required_columns_per_variant() {
        assert_eq!(
            FieldMapping::jurisdiction().required_columns(),
            &[
                "jurisdiction_id".to_string(),
                "jurisdiction_desc".to_string(),
                "tax_percentage".to_string(),
            ]
        );
        assert_eq!(
            FieldMapping::simple().required_columns(),
            &["name".to_string(), "rate".to_string()]
        );
    }
}
