use crate::domain::ports::TokenProvider;
use crate::utils::error::{EtlError, Result};
use serde::Deserialize;
use std::path::Path;

/// hubspot.config.yml 的讀取器，只取出各 portal 的 access token
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalConfig {
    default_portal: Option<String>,
    #[serde(default)]
    portals: Vec<PortalEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct PortalEntry {
    name: Option<String>,
    auth: Option<PortalAuth>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PortalAuth {
    token_info: Option<TokenInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenInfo {
    access_token: Option<String>,
}

impl PortalConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(EtlError::ConfigError {
                message: format!("HubSpot config file not found at {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

impl TokenProvider for PortalConfig {
    fn access_token(&self, portal: Option<&str>) -> Result<String> {
        let target = portal
            .or(self.default_portal.as_deref())
            .ok_or_else(|| EtlError::ConfigError {
                message: "No portal specified and no defaultPortal found in config".to_string(),
            })?;

        let entry = self
            .portals
            .iter()
            .find(|p| p.name.as_deref() == Some(target))
            .ok_or_else(|| EtlError::ConfigError {
                message: format!("Portal '{}' not found in config", target),
            })?;

        // YAML 區塊字串可能帶換行，一律修剪
        let token = entry
            .auth
            .as_ref()
            .and_then(|auth| auth.token_info.as_ref())
            .and_then(|info| info.access_token.as_deref())
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| EtlError::MissingConfigError {
                field: format!("portals.{}.auth.tokenInfo.accessToken", target),
            })?;

        Ok(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_CONFIG: &str = r#"
defaultPortal: production
portals:
  - name: production
    portalId: 12345
    auth:
      tokenInfo:
        accessToken: >
          pat-na1-prod-token
  - name: sandbox
    portalId: 67890
    auth:
      tokenInfo:
        accessToken: pat-na1-sandbox-token
"#;

    #[test]
    fn test_default_portal_is_used_when_none_specified() {
        let config = PortalConfig::from_yaml_str(SAMPLE_CONFIG).unwrap();

        let token = config.access_token(None).unwrap();

        // Block scalar folds with a trailing newline; the token must be trimmed
        assert_eq!(token, "pat-na1-prod-token");
    }

    #[test]
    fn test_named_portal_selection() {
        let config = PortalConfig::from_yaml_str(SAMPLE_CONFIG).unwrap();

        let token = config.access_token(Some("sandbox")).unwrap();

        assert_eq!(token, "pat-na1-sandbox-token");
    }

    #[test]
    fn test_unknown_portal_is_config_error() {
        let config = PortalConfig::from_yaml_str(SAMPLE_CONFIG).unwrap();

        let error = config.access_token(Some("staging")).unwrap_err();

        assert!(matches!(error, EtlError::ConfigError { .. }));
    }

    #[test]
    fn test_missing_default_portal_is_config_error() {
        let config = PortalConfig::from_yaml_str("portals: []").unwrap();

        let error = config.access_token(None).unwrap_err();

        assert!(matches!(error, EtlError::ConfigError { .. }));
    }

    #[test]
    fn test_portal_without_token_is_missing_config() {
        let yaml = r#"
defaultPortal: broken
portals:
  - name: broken
    auth:
      tokenInfo: {}
"#;
        let config = PortalConfig::from_yaml_str(yaml).unwrap();

        let error = config.access_token(None).unwrap_err();

        assert!(matches!(error, EtlError::MissingConfigError { .. }));
    }

    #[test]
    fn test_from_file_reads_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SAMPLE_CONFIG.as_bytes()).unwrap();

        let config = PortalConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.access_token(None).unwrap(), "pat-na1-prod-token");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let error = PortalConfig::from_file("does-not-exist.yml").unwrap_err();

        assert!(matches!(error, EtlError::ConfigError { .. }));
    }

    #[test]
    fn test_invalid_yaml_is_yaml_error() {
        let error = PortalConfig::from_yaml_str("portals: [unclosed").unwrap_err();

        assert!(matches!(error, EtlError::YamlError(_)));
    }
}
