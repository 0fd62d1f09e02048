use crate::components::icons::Plus;
use leptos::prelude::*;
use staffdesk::DraftField;
use staffdesk_shared::EmployeeFields;

/// 草稿的三个输入框，新增表单和编辑弹窗共用
#[component]
pub fn DraftInputs(
    #[prop(into)] draft: Signal<EmployeeFields>,
    on_input: Callback<(DraftField, String)>,
    /// 输入框 id 前缀，避免两处表单 id 冲突
    prefix: &'static str,
) -> impl IntoView {
    let field = move |field: DraftField,
                      label: &'static str,
                      kind: &'static str,
                      placeholder: &'static str| {
        let id = format!("{}_{:?}", prefix, field).to_lowercase();
        view! {
            <div class="form-control">
                <label for=id.clone() class="label">
                    <span class="label-text">{label}</span>
                </label>
                <input id=id required
                    type=kind
                    placeholder=placeholder
                    on:input=move |ev| on_input.run((field, event_target_value(&ev)))
                    prop:value=move || draft.with(|d| match field {
                        DraftField::Name => d.name.clone(),
                        DraftField::Email => d.email.clone(),
                        DraftField::Department => d.department.clone(),
                    })
                    class="input input-bordered w-full"
                />
            </div>
        }
    };

    view! {
        {field(DraftField::Name, "Name", "text", "Jane Doe")}
        {field(DraftField::Email, "Email", "email", "jane@example.com")}
        {field(DraftField::Department, "Department", "text", "Engineering")}
    }
}

/// 新增员工表单；编辑弹窗打开时禁用，避免两边同时改动同一份草稿
#[component]
pub fn EmployeeForm(
    #[prop(into)] draft: Signal<EmployeeFields>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] saving: Signal<bool>,
    on_input: Callback<(DraftField, String)>,
    on_submit: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <form
                class="card-body"
                on:submit=move |ev: leptos::web_sys::SubmitEvent| {
                    ev.prevent_default();
                    on_submit.run(());
                }
            >
                <h2 class="card-title">"Add employee"</h2>
                <fieldset class="grid grid-cols-1 md:grid-cols-3 gap-4" disabled=move || disabled.get()>
                    <DraftInputs draft=draft on_input=on_input prefix="add" />
                </fieldset>
                <div class="card-actions justify-end mt-2">
                    <button type="submit" class="btn btn-primary gap-2" disabled=move || disabled.get() || saving.get()>
                        {move || if saving.get() {
                            view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                        } else {
                            view! { <Plus attr:class="h-4 w-4" /> "Add employee" }.into_any()
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}
