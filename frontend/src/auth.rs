//! 认证模块
//!
//! 应用启动时创建唯一的会话句柄和 API 客户端，通过 Context 在组件间共享。
//! 路由守卫和员工面板都从这里拿到同一个会话。

use crate::web::{FetchHttpClient, LocalStorage};
use leptos::prelude::*;
use staffdesk::auth::login_error_message;
use staffdesk::{ClientConfig, EmployeeApi, RouteGuard, Session};

/// 认证上下文
#[derive(Clone)]
pub struct AuthContext {
    session: Session<LocalStorage>,
    api: EmployeeApi<FetchHttpClient>,
}

impl AuthContext {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            session: Session::new(LocalStorage, config.token_storage_key.clone()),
            api: EmployeeApi::new(config.api_base_url.clone(), FetchHttpClient),
        }
    }

    pub fn session(&self) -> Session<LocalStorage> {
        self.session.clone()
    }

    pub fn api(&self) -> EmployeeApi<FetchHttpClient> {
        self.api.clone()
    }

    /// 基于同一会话的路由守卫（用于路由服务注入）
    pub fn guard(&self) -> RouteGuard<LocalStorage> {
        RouteGuard::new(self.session())
    }

    /// 登录并保存 token
    ///
    /// 失败时返回可直接展示的错误消息。
    pub async fn login(&self, username: &str, password: &str) -> Result<(), String> {
        staffdesk::auth::login(&self.api, &self.session, username, password)
            .await
            .map_err(|e| login_error_message(&e))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
