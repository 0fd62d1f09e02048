use crate::components::icons::{Pencil, Trash2};
use leptos::prelude::*;
use staffdesk_shared::{Employee, EmployeeId};

#[component]
pub fn EmployeeTable(
    #[prop(into)] employees: Signal<Vec<Employee>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] saving: Signal<bool>,
    on_edit: Callback<Employee>,
    on_delete: Callback<EmployeeId>,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow overflow-x-auto">
            <table class="table table-zebra">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Department"</th>
                        <th class="text-right">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    // 服务端可能返回重复 id，所以用位置和内容一起作 key
                    <For
                        each={move || employees.get().into_iter().enumerate().collect::<Vec<_>>()}
                        key=|(index, employee)| (*index, employee.clone())
                        children=move |(_, employee)| {
                            let id = employee.id;
                            let target = employee.clone();
                            view! {
                                <tr>
                                    <td class="font-medium">{employee.name().to_string()}</td>
                                    <td>{employee.email().to_string()}</td>
                                    <td>
                                        <span class="badge badge-ghost">{employee.department().to_string()}</span>
                                    </td>
                                    <td class="text-right space-x-2">
                                        <button
                                            class="btn btn-sm btn-ghost gap-1"
                                            on:click=move |_| on_edit.run(target.clone())
                                        >
                                            <Pencil attr:class="h-4 w-4" /> "Edit"
                                        </button>
                                        <button
                                            class="btn btn-sm btn-ghost text-error gap-1"
                                            disabled=move || saving.get()
                                            on:click=move |_| on_delete.run(id)
                                        >
                                            <Trash2 attr:class="h-4 w-4" /> "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                    {move || (employees.with(Vec::is_empty) && !loading.get()).then(|| view! {
                        <tr>
                            <td colspan="4" class="text-center text-base-content/60 py-8">
                                "No employees yet"
                            </td>
                        </tr>
                    })}
                </tbody>
            </table>
            <Show when=move || loading.get()>
                <div class="flex justify-center p-4">
                    <span class="loading loading-dots loading-md"></span>
                </div>
            </Show>
        </div>
    }
}
