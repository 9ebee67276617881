use serde::Deserialize;
use ts_rs::TS;

use crate::models::users::entities::UserRole;

// 创建用户请求（账号由外部认证服务签发，这里只登记身份）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub email: String,
    pub role: UserRole,
}
