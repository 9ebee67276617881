use serde::Deserialize;
use ts_rs::TS;

use crate::errors::Result;
use crate::utils::validate::{MAX_NAME_LEN, validate_required_string};

// 创建学位项目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/program.ts")]
pub struct CreateProgramRequest {
    pub name: String,
    pub university: String,
}

impl CreateProgramRequest {
    /// 校验并规范化字段
    pub fn normalized(self) -> Result<Self> {
        Ok(Self {
            name: validate_required_string(&self.name, "name", MAX_NAME_LEN)?,
            university: validate_required_string(&self.university, "university", MAX_NAME_LEN)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_fields() {
        let req = CreateProgramRequest {
            name: "  Ingeniería en Sistemas ".into(),
            university: " UTN ".into(),
        }
        .normalized()
        .unwrap();
        assert_eq!(req.name, "Ingeniería en Sistemas");
        assert_eq!(req.university, "UTN");
    }

    #[test]
    fn test_normalized_rejects_blank_name() {
        let err = CreateProgramRequest {
            name: " ".into(),
            university: "UTN".into(),
        }
        .normalized()
        .unwrap_err();
        assert_eq!(err.message(), "name is required");
    }
}
