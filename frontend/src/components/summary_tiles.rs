use crate::components::icons::{Briefcase, Users};
use leptos::prelude::*;
use staffdesk::DepartmentSummary;

/// 总人数卡片 + 每个部门一张卡片（按部门首次出现的顺序）
#[component]
pub fn SummaryTiles(#[prop(into)] summary: Signal<DepartmentSummary>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
            <div class="stat bg-base-100 rounded-box shadow">
                <div class="stat-figure text-primary">
                    <Users attr:class="h-8 w-8" />
                </div>
                <div class="stat-title">"Total employees"</div>
                <div class="stat-value text-primary">{move || summary.with(|s| s.total())}</div>
            </div>
            <For
                each=move || summary.with(|s| s.departments().to_vec())
                key=|entry| entry.clone()
                children=|entry| {
                    view! {
                        <div class="stat bg-base-100 rounded-box shadow">
                            <div class="stat-figure text-secondary">
                                <Briefcase attr:class="h-8 w-8" />
                            </div>
                            <div class="stat-title">{entry.department}</div>
                            <div class="stat-value">{entry.count}</div>
                        </div>
                    }
                }
            />
        </div>
    }
}
