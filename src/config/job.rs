use crate::adapters::hubspot::DEFAULT_BASE_URL;
use crate::core::export::DEFAULT_PAGE_LIMIT;
use crate::core::import::DEFAULT_BATCH_DELAY;
use crate::core::mapping::{FieldMapping, FieldRule};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 選用的 TOML 工作設定，沒給時全部採預設值
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobConfig {
    pub pipeline: Option<PipelineInfo>,
    pub api: Option<ApiConfig>,
    pub import: Option<ImportConfig>,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub mapping: Option<String>,
    pub batch_delay_ms: Option<u64>,
    #[serde(default)]
    pub fields: Vec<FieldRule>,
    #[serde(default)]
    pub required_columns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub page_limit: Option<u32>,
}

impl JobConfig {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::InvalidConfigValueError {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HUBSPOT_BASE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn base_url(&self) -> &str {
        self.api
            .as_ref()
            .and_then(|api| api.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn batch_delay(&self) -> Duration {
        self.import
            .as_ref()
            .and_then(|import| import.batch_delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_BATCH_DELAY)
    }

    pub fn page_limit(&self) -> u32 {
        self.export
            .as_ref()
            .and_then(|export| export.page_limit)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    /// 設定檔指定的欄位對照表；沒設定時回傳 None 交由 CLI 決定
    pub fn field_mapping(&self) -> Result<Option<FieldMapping>> {
        let Some(import) = &self.import else {
            return Ok(None);
        };

        match import.mapping.as_deref() {
            None => Ok(None),
            Some("jurisdiction") => Ok(Some(FieldMapping::jurisdiction())),
            Some("simple") => Ok(Some(FieldMapping::simple())),
            Some("custom") => {
                if import.fields.is_empty() {
                    return Err(EtlError::InvalidConfigValueError {
                        field: "import.fields".to_string(),
                        value: String::new(),
                        reason: "Custom mapping requires at least one [[import.fields]] entry"
                            .to_string(),
                    });
                }

                // 未指定必要欄位時以全部來源欄位為準
                let required = if import.required_columns.is_empty() {
                    let mut sources = Vec::new();
                    for rule in &import.fields {
                        if !sources.contains(&rule.source) {
                            sources.push(rule.source.clone());
                        }
                    }
                    sources
                } else {
                    import.required_columns.clone()
                };

                Ok(Some(FieldMapping::new(import.fields.clone(), required)))
            }
            Some(other) => Err(EtlError::InvalidConfigValueError {
                field: "import.mapping".to_string(),
                value: other.to_string(),
                reason: "Supported mappings: jurisdiction, simple, custom".to_string(),
            }),
        }
    }
}

impl Validate for JobConfig {
    fn validate(&self) -> Result<()> {
        if let Some(api) = &self.api {
            if let Some(base_url) = &api.base_url {
                validate_url("api.base_url", base_url)?;
            }
        }

        if let Some(export) = &self.export {
            if let Some(page_limit) = export.page_limit {
                validate_range("export.page_limit", page_limit, 1, 100)?;
            }
        }

        self.field_mapping()?;

        Ok(())
    }
}
