use crate::errors::Result;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_ADMIN_EMAIL: &str = "admin@localhost";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何用户，则创建一个默认的 admin 账号并打印其访问令牌
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());

    let admin = match storage
        .create_user(CreateUserRequest {
            email,
            role: UserRole::Admin,
        })
        .await
    {
        Ok(user) => user,
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
            return;
        }
    };

    info!(
        "Default admin account created successfully (ID: {}, email: {})",
        admin.id, admin.email
    );

    match admin.generate_access_token() {
        Ok(token) => {
            warn!("==========================================================");
            warn!("  DEFAULT ADMIN ACCOUNT CREATED");
            warn!("  Access token: {}", token);
            warn!("  The token expires; sign a new one with the same secret");
            warn!("==========================================================");
        }
        Err(e) => warn!("Failed to sign admin access token: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化、数据库迁移与默认管理员
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage).await;

    Ok(StartupContext { storage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_seed_admin_only_on_empty_store() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await);

        seed_admin(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 1);

        seed_admin(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }
}
