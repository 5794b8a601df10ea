use crate::utils::error::{PlannerError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 是否為 http(s) 位置；其餘字串都當成檔案路徑
pub fn is_http_location(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PlannerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 請求欄位的閉區間檢查，失敗時回傳 `ValidationError`
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PlannerError::validation(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// 必須為大於零的有限數值
pub fn validate_positive_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PlannerError::validation(
            field_name,
            value,
            "Value must be a finite number",
        ));
    }
    if value <= 0.0 {
        return Err(PlannerError::validation(
            field_name,
            value,
            "Value must be greater than 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("catalog.url", "https://example.com/catalog.json").is_ok());
        assert!(validate_url("catalog.url", "http://example.com").is_ok());
        assert!(validate_url("catalog.url", "").is_err());
        assert!(validate_url("catalog.url", "invalid-url").is_err());
        assert!(validate_url("catalog.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_is_http_location() {
        assert!(is_http_location("http://example.com/catalog.json"));
        assert!(is_http_location("https://example.com/catalog.json"));
        assert!(!is_http_location("httpdocs/catalog.json"));
        assert!(!is_http_location("embedded"));
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("render.width", 400, 1).is_ok());
        assert!(validate_positive_number("render.width", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range_is_inclusive() {
        assert!(validate_range("commonAreaPercentage", 0.0, 0.0, 50.0).is_ok());
        assert!(validate_range("commonAreaPercentage", 50.0, 0.0, 50.0).is_ok());
        assert!(validate_range("commonAreaPercentage", 50.5, 0.0, 50.0).is_err());
        assert!(validate_range("streetFacingSides", 0, 1, 4).is_err());
    }

    #[test]
    fn test_validate_positive_finite() {
        assert!(validate_positive_finite("totalBaseArea", 0.5).is_ok());
        assert!(validate_positive_finite("totalBaseArea", 0.0).is_err());
        assert!(validate_positive_finite("totalBaseArea", -10.0).is_err());
        assert!(validate_positive_finite("totalBaseArea", f64::NAN).is_err());
        assert!(validate_positive_finite("totalBaseArea", f64::INFINITY).is_err());
    }
}
