use crate::components::employee_form::DraftInputs;
use leptos::prelude::*;
use staffdesk::DraftField;
use staffdesk_shared::EmployeeFields;

/// 编辑弹窗，打开与否完全由视图模型的编辑目标决定
#[component]
pub fn EditDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] draft: Signal<EmployeeFields>,
    #[prop(into)] saving: Signal<bool>,
    on_input: Callback<(DraftField, String)>,
    on_save: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    // Esc 或点击遮罩会直接关闭 <dialog>，这里同步回视图模型
    let on_close = move |_| {
        if open.get_untracked() {
            on_cancel.run(());
        }
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_save.run(());
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=on_close>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Edit employee"</h3>
                <form on:submit=on_submit class="space-y-4 mt-4">
                    <DraftInputs draft=draft on_input=on_input prefix="edit" />
                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" disabled=move || saving.get() class="btn btn-primary">
                            {move || if saving.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Save changes".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
