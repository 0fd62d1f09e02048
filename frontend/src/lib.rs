//! StaffDesk 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::router`: 路由服务（核心引擎），守卫逻辑来自核心库
//! - `auth`: 会话与 API 客户端的唯一实例
//! - `components`: UI 组件层，状态来自核心库的 `EmployeeViewModel`

mod auth;
mod components {
    pub mod dashboard;
    mod edit_dialog;
    mod employee_form;
    mod employee_table;
    mod icons;
    pub mod login;
    pub mod not_found;
    mod summary_tiles;
}
pub mod logging;

use crate::auth::AuthContext;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::not_found::NotFoundPage;

use leptos::prelude::*;
use staffdesk::{AppRoute, ClientConfig};

// 浏览器原生 API 封装模块
// 为核心库的 `HttpClient` / `TokenStore` 提供 web_sys 实现。
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;

    pub use http::FetchHttpClient;
    pub use storage::LocalStorage;
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_build_env();

    // 1. 创建认证上下文（会话 + API 客户端）
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx.clone());

    // 2. 路由守卫与面板共用同一个会话
    let guard = auth_ctx.guard();

    view! {
        <Router guard=guard>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
