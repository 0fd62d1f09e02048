use crate::web::router::Link;
use leptos::prelude::*;

/// 404 页面；进入此路由时守卫已清除会话
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl">"The page you are looking for does not exist."</p>
                <Link to="/" class="btn btn-primary">"Back to sign in"</Link>
            </div>
        </div>
    }
}
