use super::DEFAULT_PUSH_REF;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use url::Url;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Base URL of the workflow API; must be an absolute http(s) URL.
    pub fn api_url(raw: Option<String>) -> Result<Url, AppError> {
        let raw = raw.ok_or_else(|| AppError::missing_setting("N8N_API_URL"))?;
        let trimmed = raw.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigurationError,
                format!("N8N_API_URL is not a valid URL ({}): {}", trimmed, e),
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::new(
                ErrorCategory::ConfigurationError,
                format!("N8N_API_URL must use http or https, got {}", url.scheme()),
            ));
        }
        Ok(url)
    }

    pub fn api_key(raw: Option<String>) -> Result<String, AppError> {
        raw.map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::missing_setting("N8N_API_KEY"))
    }

    pub fn push_ref(raw: Option<String>) -> String {
        raw.map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_PUSH_REF.to_string())
    }
}
