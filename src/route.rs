//! 路由定义与守卫
//!
//! 纯粹的业务逻辑层，不依赖于 DOM。守卫只检查 token 是否存在，
//! 过期或伪造的 token 在第一次 API 调用失败前与有效 token 无法区分。

use crate::session::{Session, TokenStore};
use std::fmt::Display;
use tracing::warn;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 员工面板 (需要会话)
    Dashboard,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Login,
            "/dashboard" => Self::Dashboard,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Dashboard => "/dashboard",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否需要会话
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// 会话缺失时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 路由守卫：决定每次导航最终渲染哪个页面
#[derive(Clone, Debug)]
pub struct RouteGuard<S> {
    session: Session<S>,
}

impl<S: TokenStore> RouteGuard<S> {
    pub fn new(session: Session<S>) -> Self {
        Self { session }
    }

    /// 返回实际应渲染的路由
    ///
    /// 访问未知路由会清除会话。
    pub fn resolve(&self, target: AppRoute) -> AppRoute {
        match target {
            AppRoute::NotFound => {
                self.session.clear_token();
                AppRoute::NotFound
            }
            route if route.requires_auth() && !self.session.is_active() => {
                warn!(target_route = %route, "access denied, redirecting to login");
                AppRoute::auth_failure_redirect()
            }
            route => route,
        }
    }

    pub fn resolve_path(&self, path: &str) -> AppRoute {
        self.resolve(AppRoute::from_path(path))
    }
}
