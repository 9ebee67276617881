use serde::Deserialize;
use ts_rs::TS;

use crate::errors::{AcadifyError, Result};
use crate::utils::validate::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, validate_id, validate_optional_string,
    validate_required_string,
};

// 创建选修池请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-pool.ts")]
pub struct CreateElectivePoolRequest {
    pub name: String,
    pub description: Option<String>,
}

impl CreateElectivePoolRequest {
    pub fn normalized(self) -> Result<Self> {
        Ok(Self {
            name: validate_required_string(&self.name, "name", MAX_NAME_LEN)?,
            description: validate_optional_string(
                self.description.as_deref(),
                "description",
                MAX_DESCRIPTION_LEN,
            )?,
        })
    }
}

// 更新选修池请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-pool.ts")]
pub struct UpdateElectivePoolRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateElectivePoolRequest {
    pub fn normalized(self) -> Result<Self> {
        if self.name.is_none() && self.description.is_none() {
            return Err(AcadifyError::validation("no fields to update"));
        }
        Ok(Self {
            name: validate_optional_string(self.name.as_deref(), "name", MAX_NAME_LEN)?,
            description: validate_optional_string(
                self.description.as_deref(),
                "description",
                MAX_DESCRIPTION_LEN,
            )?,
        })
    }
}

// 向选修池添加科目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/elective-pool.ts")]
pub struct AddPoolSubjectRequest {
    pub subject_id: String,
}

impl AddPoolSubjectRequest {
    pub fn subject_id(&self) -> Result<String> {
        validate_id(&self.subject_id, "subject_id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_name() {
        let err = CreateElectivePoolRequest {
            name: "   ".into(),
            description: None,
        }
        .normalized()
        .unwrap_err();
        assert_eq!(err.message(), "name is required");
    }

    #[test]
    fn test_create_limits_description() {
        let err = CreateElectivePoolRequest {
            name: "Optativas".into(),
            description: Some("d".repeat(MAX_DESCRIPTION_LEN + 1)),
        }
        .normalized()
        .unwrap_err();
        assert_eq!(err.message(), "description is too long");
    }

    #[test]
    fn test_update_requires_some_field() {
        assert!(UpdateElectivePoolRequest::default().normalized().is_err());
        let ok = UpdateElectivePoolRequest {
            name: Some(" Electivas ".into()),
            description: None,
        }
        .normalized()
        .unwrap();
        assert_eq!(ok.name.as_deref(), Some("Electivas"));
    }
}
