//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程，验证交给注入的 `RouteGuard`。

use leptos::prelude::*;
use staffdesk::{AppRoute, RouteGuard};
use tracing::debug;
use wasm_bindgen::prelude::*;

use super::LocalStorage;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 路由守卫（注入，实现与会话存储的解耦）
    guard: StoredValue<RouteGuard<LocalStorage>>,
}

impl RouterService {
    /// 创建新的路由服务，并对当前 URL 执行一次守卫
    fn new(guard: RouteGuard<LocalStorage>) -> Self {
        let (current_route, set_route) = signal(AppRoute::default());
        let router = Self {
            current_route,
            set_route,
            guard: StoredValue::new(guard),
        };
        router.apply(&current_path(), false);
        router
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.apply(path, true);
    }

    pub fn navigate_to(&self, route: AppRoute) {
        self.apply(route.to_path(), true);
    }

    /// 验证目标路径并更新 History 与当前路由
    ///
    /// # Arguments
    /// * `path` - 目标路径
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn apply(&self, path: &str, use_push: bool) {
        let requested = AppRoute::from_path(path);
        let resolved = self.guard.with_value(|guard| guard.resolve(requested));

        // 未知路径保留原 URL，重定向时改写为目标路由的 URL
        let url = if resolved == requested {
            path
        } else {
            debug!(from = %path, to = %resolved, "navigation redirected");
            resolved.to_path()
        };

        if use_push {
            push_history_state(url);
        } else {
            replace_history_state(url);
        }
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        // popstate 时也执行守卫逻辑
        let closure = Closure::<dyn Fn()>::new(move || {
            router.apply(&current_path(), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(guard: RouteGuard<LocalStorage>) -> RouterService {
    let router = RouterService::new(guard);
    router.init_popstate_listener();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 路由守卫
    guard: RouteGuard<LocalStorage>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(guard);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，点击时走路由服务而不是整页刷新
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(into, optional)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
