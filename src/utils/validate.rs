use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AcadifyError, Result};

/// 标识符最大长度
pub const MAX_ID_LEN: usize = 191;
/// 名称最大长度
pub const MAX_NAME_LEN: usize = 191;
/// 描述最大长度
pub const MAX_DESCRIPTION_LEN: usize = 500;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+(\.[A-Za-z]{2,})?$").expect("Invalid email regex")
});

/// 校验标识符：去除首尾空白，不能为空，长度不超过 191
pub fn validate_id(value: &str, field: &str) -> Result<String> {
    let id = value.trim();
    if id.is_empty() {
        return Err(AcadifyError::validation(format!("{field} is required")));
    }
    if id.chars().count() > MAX_ID_LEN {
        return Err(AcadifyError::validation(format!("{field} is too long")));
    }
    Ok(id.to_string())
}

/// 校验必填字符串
pub fn validate_required_string(value: &str, field: &str, max_len: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AcadifyError::validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(AcadifyError::validation(format!("{field} is too long")));
    }
    Ok(trimmed.to_string())
}

/// 校验可选字符串：给出时不能为空白
pub fn validate_optional_string(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Err(AcadifyError::validation(format!("{field} cannot be empty")));
            }
            if trimmed.chars().count() > max_len {
                return Err(AcadifyError::validation(format!("{field} is too long")));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// 校验非负的有限数值（学分、学时）
pub fn validate_non_negative(value: f64, field: &str) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(AcadifyError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(value)
}

pub fn validate_email(email: &str) -> std::result::Result<(), &'static str> {
    if email.chars().count() > MAX_ID_LEN || !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}
