//! 员工面板视图模型
//!
//! 持有内存中的员工列表和新增/编辑共用的表单草稿，负责调用 API 并把结果合并回列表。
//!
//! 列表只在服务端确认成功后才修改（追加 / 替换 / 移除），失败时保持不变，
//! 因此不需要回滚。所有操作都在同一个单线程上下文中执行：
//! 内部状态放在 `RefCell` 里，且从不跨越 `.await` 持有借用。
//!
//! 编辑弹窗关闭后仍在途的请求可能晚到。每个影响表单的操作都会记录一个表单纪元，
//! 晚到的响应仍会更新列表（服务端已经生效），但不会再改动草稿、弹窗和编辑目标。

use crate::api::EmployeeApi;
use crate::error::ClientError;
use crate::request::HttpClient;
use crate::route::AppRoute;
use crate::session::{Session, TokenStore};
use crate::summary::DepartmentSummary;
use staffdesk_shared::{Employee, EmployeeFields, EmployeeId};
use std::cell::{Cell, RefCell};
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

const MSG_MISSING_TOKEN: &str = "Session token not found, please sign in again";
const MSG_INCOMPLETE: &str = "Please fill in all fields";
const MSG_LOAD_FAILED: &str = "Could not load the employee list";
const MSG_CREATE_FAILED: &str = "Could not add the employee";
const MSG_UPDATE_FAILED: &str = "Could not update the employee";
const MSG_DELETE_FAILED: &str = "Could not delete the employee";

fn describe(context: &str, err: &ClientError) -> String {
    match err {
        ClientError::MissingToken => MSG_MISSING_TOKEN.to_string(),
        other => format!("{}: {}", context, other),
    }
}

/// 草稿中的单个字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Email,
    Department,
}

/// 视图模型对外发布的状态快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub employees: Vec<Employee>,
    /// 新增和编辑共用的草稿
    pub draft: EmployeeFields,
    /// 设置时提交即更新该员工，未设置时提交即新建
    pub editing: Option<Employee>,
    /// 最近一次错误，新的错误会覆盖旧的
    pub last_error: Option<String>,
    pub loading: bool,
    pub saving: bool,
}

impl BoardState {
    pub fn is_modal_open(&self) -> bool {
        self.editing.is_some()
    }

    /// 每次调用都从当前列表重新计算
    pub fn summary(&self) -> DepartmentSummary {
        DepartmentSummary::from_employees(&self.employees)
    }
}

type Listener = Box<dyn Fn(&BoardState)>;

pub struct EmployeeViewModel<C, S> {
    api: EmployeeApi<C>,
    session: Session<S>,
    state: RefCell<BoardState>,
    /// 表单纪元：开始编辑、取消编辑、提交成功时递增
    form_epoch: Cell<u64>,
    /// 最近一次发起的列表加载序号
    load_seq: Cell<u64>,
    pending_mutations: Cell<usize>,
    listener: RefCell<Option<Listener>>,
}

impl<C: HttpClient, S: TokenStore> EmployeeViewModel<C, S> {
    pub fn new(api: EmployeeApi<C>, session: Session<S>) -> Self {
        Self {
            api,
            session,
            state: RefCell::new(BoardState::default()),
            form_epoch: Cell::new(0),
            load_seq: Cell::new(0),
            pending_mutations: Cell::new(0),
            listener: RefCell::new(None),
        }
    }

    /// 注册状态监听器，每次状态变化后都会收到一份快照
    pub fn set_listener(&self, listener: impl Fn(&BoardState) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
        self.notify();
    }

    pub fn state(&self) -> BoardState {
        self.state.borrow().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&BoardState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    // =========================================================
    // 内部工具
    // =========================================================

    fn notify(&self) {
        let listener = self.listener.borrow();
        if let Some(listener) = listener.as_ref() {
            let snapshot = self.state.borrow().clone();
            listener(&snapshot);
        }
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        self.notify();
        result
    }

    fn advance_form_epoch(&self) {
        self.form_epoch.set(self.form_epoch.get() + 1);
    }

    fn set_error(&self, message: String) {
        self.mutate(|s| s.last_error = Some(message));
    }

    /// 读取 token；缺失时记录错误并返回 `None`
    fn require_token(&self) -> Option<String> {
        let token = self.session.token();
        if token.is_none() {
            warn!("protected action attempted without a session");
            self.set_error(MSG_MISSING_TOKEN.to_string());
        }
        token
    }

    fn begin_mutation(&self) {
        self.pending_mutations.set(self.pending_mutations.get() + 1);
        self.mutate(|s| s.saving = true);
    }

    /// 只在 `mutate` 闭包内调用
    fn end_mutation(&self, state: &mut BoardState) {
        let pending = self.pending_mutations.get().saturating_sub(1);
        self.pending_mutations.set(pending);
        state.saving = pending > 0;
    }

    // =========================================================
    // 操作
    // =========================================================

    /// 拉取员工列表并整体替换，最后发起的加载生效
    pub async fn load(&self) {
        let Some(token) = self.require_token() else {
            return;
        };

        let seq = self.load_seq.get() + 1;
        self.load_seq.set(seq);
        self.mutate(|s| s.loading = true);

        let result = self.api.list_employees(&token).await;

        if seq != self.load_seq.get() {
            debug!(seq, "discarding superseded employee list");
            return;
        }

        self.mutate(|s| {
            s.loading = false;
            match result {
                Ok(employees) => {
                    debug!(count = employees.len(), "employee list loaded");
                    s.employees = employees;
                }
                Err(e) => {
                    warn!(error = %e, "employee list failed to load");
                    s.last_error = Some(describe(MSG_LOAD_FAILED, &e));
                }
            }
        });
    }

    pub fn update_draft(&self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        self.mutate(|s| match field {
            DraftField::Name => s.draft.name = value,
            DraftField::Email => s.draft.email = value,
            DraftField::Department => s.draft.department = value,
        });
    }

    /// 根据是否存在编辑目标，分派到更新或新建
    pub async fn submit(&self) {
        let editing = self.state.borrow().editing.is_some();
        if editing {
            self.submit_edit().await;
        } else {
            self.submit_create().await;
        }
    }

    /// 用草稿新建员工；失败时保留草稿，方便用户直接重试
    ///
    /// 编辑弹窗打开时草稿属于编辑目标，此时不做任何事。
    pub async fn submit_create(&self) {
        let (editing, draft) = {
            let state = self.state.borrow();
            (state.editing.is_some(), state.draft.clone())
        };
        if editing {
            debug!("submit_create ignored while an edit is open");
            return;
        }
        if !draft.is_complete() {
            self.set_error(MSG_INCOMPLETE.to_string());
            return;
        }
        let Some(token) = self.require_token() else {
            return;
        };

        let epoch = self.form_epoch.get();
        self.begin_mutation();

        let result = self.api.create_employee(&token, &draft).await;
        let current = epoch == self.form_epoch.get();

        let cleared = self.mutate(|s| {
            self.end_mutation(s);
            match result {
                Ok(created) => {
                    info!(id = %created.id, "employee created");
                    s.employees.push(created);
                    if current {
                        s.draft.clear();
                    }
                    current
                }
                Err(e) => {
                    warn!(error = %e, "employee creation failed");
                    s.last_error = Some(describe(MSG_CREATE_FAILED, &e));
                    false
                }
            }
        });

        if cleared {
            self.advance_form_epoch();
        }
    }

    /// 打开编辑弹窗，把员工字段复制进草稿
    pub fn begin_edit(&self, employee: Employee) {
        self.advance_form_epoch();
        self.mutate(|s| {
            s.draft = employee.fields.clone();
            s.editing = Some(employee);
        });
    }

    /// 提交编辑；失败时弹窗保持打开
    pub async fn submit_edit(&self) {
        let (target, draft) = {
            let state = self.state.borrow();
            match &state.editing {
                Some(target) => (target.id, state.draft.clone()),
                None => {
                    debug!("submit_edit called without an editing target");
                    return;
                }
            }
        };
        if !draft.is_complete() {
            self.set_error(MSG_INCOMPLETE.to_string());
            return;
        }
        let Some(token) = self.require_token() else {
            return;
        };

        let epoch = self.form_epoch.get();
        self.begin_mutation();

        let result = self.api.update_employee(&token, target, &draft).await;
        let current = epoch == self.form_epoch.get();

        let closed = self.mutate(|s| {
            self.end_mutation(s);
            match result {
                Ok(updated) => {
                    info!(id = %target, "employee updated");
                    if let Some(slot) = s.employees.iter_mut().find(|e| e.id == target) {
                        *slot = updated;
                    }
                    if current {
                        s.editing = None;
                        s.draft.clear();
                    } else {
                        debug!(id = %target, "edit form changed while update was in flight");
                    }
                    current
                }
                Err(e) => {
                    warn!(id = %target, error = %e, "employee update failed");
                    s.last_error = Some(describe(MSG_UPDATE_FAILED, &e));
                    false
                }
            }
        });

        if closed {
            self.advance_form_epoch();
        }
    }

    /// 关闭弹窗并丢弃草稿，不做确认
    pub fn cancel_edit(&self) {
        self.advance_form_epoch();
        self.mutate(|s| {
            s.editing = None;
            s.draft.clear();
        });
    }

    /// 删除员工；只有服务端确认后才从列表移除
    pub async fn remove(&self, id: EmployeeId) {
        let Some(token) = self.require_token() else {
            return;
        };

        self.begin_mutation();
        let result = self.api.delete_employee(&token, id).await;

        self.mutate(|s| {
            self.end_mutation(s);
            match result {
                Ok(()) => {
                    info!(id = %id, "employee deleted");
                    if let Some(pos) = s.employees.iter().position(|e| e.id == id) {
                        s.employees.remove(pos);
                    }
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "employee deletion failed");
                    s.last_error = Some(describe(MSG_DELETE_FAILED, &e));
                }
            }
        });
    }

    pub fn dismiss_error(&self) {
        self.mutate(|s| s.last_error = None);
    }

    /// 只在当前错误仍是 `message` 时清除，较新的错误保持不变
    pub fn dismiss_error_if(&self, message: &str) {
        let matches = self.state.borrow().last_error.as_deref() == Some(message);
        if matches {
            self.dismiss_error();
        }
    }

    /// 清除会话，返回应跳转到的登录页
    pub fn logout(&self) -> AppRoute {
        self.session.clear_token();
        AppRoute::Login
    }
}
