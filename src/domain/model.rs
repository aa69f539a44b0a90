use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 一筆 CSV 資料列，欄位名稱對應字串值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRecord {
    pub columns: HashMap<String, String>,
}

impl TaxRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }
}

/// 轉換後要送往 HubSpot 的屬性值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

/// 單筆 tax 物件的目標屬性集合，絕不包含空白值
pub type TaxProperties = BTreeMap<String, PropertyValue>;

/// 批次匯入的累計統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
pub struct BatchCreateRequest<'a> {
    pub inputs: Vec<BatchInput<'a>>,
}

#[derive(Debug, Serialize)]
pub struct BatchInput<'a> {
    pub properties: &'a TaxProperties,
}

impl<'a> BatchCreateRequest<'a> {
    pub fn from_batch(batch: &'a [TaxProperties]) -> Self {
        Self {
            inputs: batch
                .iter()
                .map(|properties| BatchInput { properties })
                .collect(),
        }
    }
}

/// 批次建立 API 的回應
#[derive(Debug, Clone, Deserialize)]
pub struct BatchCreateResponse {
    #[serde(default)]
    pub results: Vec<CreatedTax>,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTax {
    pub id: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Option<String>>,
}

/// 讀取端回傳的 tax 物件，對本系統而言是唯讀的
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxObject {
    pub id: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Option<String>>,
}

impl TaxObject {
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .and_then(|value| value.as_deref())
    }
}

/// 分頁列表 API 的單頁回應
#[derive(Debug, Clone, Deserialize)]
pub struct TaxPage {
    #[serde(default)]
    pub results: Vec<TaxObject>,
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    pub next: Option<NextPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NextPage {
    pub after: String,
}

/// 屬性結構描述 API 的回應
#[derive(Debug, Clone, Deserialize)]
pub struct PropertiesResponse {
    #[serde(default)]
    pub results: Vec<PropertySchema>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertySchema {
    pub name: String,
}
