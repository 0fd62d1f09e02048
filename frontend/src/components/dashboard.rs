use crate::auth::use_auth;
use crate::components::edit_dialog::EditDialog;
use crate::components::employee_form::EmployeeForm;
use crate::components::employee_table::EmployeeTable;
use crate::components::icons::{LogOut, RefreshCw};
use crate::components::summary_tiles::SummaryTiles;
use crate::web::router::use_router;
use crate::web::{FetchHttpClient, LocalStorage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use staffdesk::{BoardState, DraftField, EmployeeViewModel};
use staffdesk_shared::{Employee, EmployeeFields, EmployeeId};
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

type BoardViewModel = EmployeeViewModel<FetchHttpClient, LocalStorage>;

/// 错误提示自动消失的时间
const ERROR_TOAST_DURATION: Duration = Duration::from_secs(5);

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    // 视图模型只存在于当前线程，通过监听器把快照同步到信号
    let board = RwSignal::new(BoardState::default());
    let vm = StoredValue::new_local(Rc::new(BoardViewModel::new(auth.api(), auth.session())));
    vm.with_value(|vm| vm.set_listener(move |state| board.set(state.clone())));

    // 派生值
    let employees = Memo::new(move |_| board.with(|b| b.employees.clone()));
    let summary = Memo::new(move |_| board.with(|b| b.summary()));
    let draft = Memo::new(move |_| board.with(|b| b.draft.clone()));
    let modal_open = Memo::new(move |_| board.with(|b| b.is_modal_open()));
    let loading = Memo::new(move |_| board.with(|b| b.loading));
    let saving = Memo::new(move |_| board.with(|b| b.saving));
    let last_error = Memo::new(move |_| board.with(|b| b.last_error.clone()));

    // 编辑时新增表单不显示共用草稿
    let add_draft = Signal::derive(move || {
        if modal_open.get() {
            EmployeeFields::default()
        } else {
            draft.get()
        }
    });

    let load = move || {
        let vm = vm.get_value();
        spawn_local(async move { vm.load().await });
    };

    // 初始加载
    Effect::new(move |_| load());

    let on_input = Callback::new(move |(field, value): (DraftField, String)| {
        vm.with_value(|vm| vm.update_draft(field, value));
    });

    let on_create = Callback::new(move |_: ()| {
        let vm = vm.get_value();
        spawn_local(async move { vm.submit_create().await });
    });

    let on_save_edit = Callback::new(move |_: ()| {
        let vm = vm.get_value();
        spawn_local(async move { vm.submit_edit().await });
    });

    let on_cancel_edit = Callback::new(move |_: ()| vm.with_value(|vm| vm.cancel_edit()));

    let on_edit = Callback::new(move |employee: Employee| {
        vm.with_value(|vm| vm.begin_edit(employee));
    });

    let on_delete = Callback::new(move |id: EmployeeId| {
        let vm = vm.get_value();
        spawn_local(async move { vm.remove(id).await });
    });

    let on_logout = move |_| {
        let route = vm.with_value(|vm| vm.logout());
        router.navigate_to(route);
    };

    // 错误提示一段时间后自动关闭；每条错误只保留一个计时器，
    // 到期时只清除它自己对应的那条消息
    let toast_timer = StoredValue::new(None::<TimeoutHandle>);
    Effect::new(move |_| {
        let message = last_error.get();
        if let Some(handle) = toast_timer.get_value() {
            handle.clear();
        }
        toast_timer.set_value(None);

        if let Some(message) = message {
            let vm = vm.get_value();
            let handle = set_timeout_with_handle(
                move || vm.dismiss_error_if(&message),
                ERROR_TOAST_DURATION,
            );
            match handle {
                Ok(handle) => toast_timer.set_value(Some(handle)),
                Err(e) => warn!(error = ?e, "could not schedule toast dismissal"),
            }
        }
    });

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                // 错误提示框
                {move || last_error.get().map(|message| view! {
                    <div class="toast toast-top toast-end z-50">
                        <div class="alert alert-error shadow-lg">
                            <span>{message}</span>
                            <button
                                class="btn btn-sm btn-ghost"
                                on:click=move |_| vm.with_value(|vm| vm.dismiss_error())
                            >
                                "✕"
                            </button>
                        </div>
                    </div>
                })}

                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1">
                        <span class="btn btn-ghost text-xl">"Employee dashboard"</span>
                    </div>
                    <div class="flex-none gap-2">
                        <button
                            class="btn btn-ghost gap-2"
                            disabled=move || loading.get()
                            on:click=move |_| load()
                        >
                            <RefreshCw attr:class=move || {
                                if loading.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" }
                            } />
                            "Refresh"
                        </button>
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Sign out"
                        </button>
                    </div>
                </div>

                <SummaryTiles summary=summary />

                <EmployeeForm
                    draft=add_draft
                    disabled=modal_open
                    saving=saving
                    on_input=on_input
                    on_submit=on_create
                />

                <EmployeeTable
                    employees=employees
                    loading=loading
                    saving=saving
                    on_edit=on_edit
                    on_delete=on_delete
                />
            </div>

            <EditDialog
                open=modal_open
                draft=draft
                saving=saving
                on_input=on_input
                on_save=on_save_edit
                on_cancel=on_cancel_edit
            />
        </div>
    }
}
