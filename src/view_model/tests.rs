use super::*;
use crate::auth;
use crate::request::MockHttpClient;
use crate::route::RouteGuard;
use crate::session::MemoryTokenStore;
use serde_json::json;
use staffdesk_shared::protocol::HttpMethod;
use std::rc::Rc;
use tokio::sync::Notify;

// =========================================================
// 辅助函数
// =========================================================

const BASE: &str = "http://api.test/api";
const LIST_URL: &str = "http://api.test/api/Employee";
const LOGIN_URL: &str = "http://api.test/api/auth/login";

type TestViewModel = EmployeeViewModel<MockHttpClient, MemoryTokenStore>;

fn employee_url(id: i64) -> String {
    format!("{}/{}", LIST_URL, id)
}

fn employee(id: i64, name: &str, department: &str) -> Employee {
    Employee::new(
        id,
        EmployeeFields::new(name, format!("{}@corp.test", name.to_lowercase()), department),
    )
}

fn to_json(employee: &Employee) -> serde_json::Value {
    serde_json::to_value(employee).unwrap()
}

fn build(client: MockHttpClient) -> (Session<MemoryTokenStore>, TestViewModel) {
    let session = Session::new(MemoryTokenStore::new(), "token");
    let api = EmployeeApi::new(BASE, client);
    let vm = EmployeeViewModel::new(api, session.clone());
    (session, vm)
}

fn setup() -> (MockHttpClient, Session<MemoryTokenStore>, TestViewModel) {
    let client = MockHttpClient::new();
    let (session, vm) = build(client.clone());
    session.set_token("T").unwrap();
    (client, session, vm)
}

/// 预置一个已加载的列表
async fn seeded(
    employees: &[Employee],
) -> (MockHttpClient, Session<MemoryTokenStore>, TestViewModel) {
    let (client, session, vm) = setup();
    let body: Vec<_> = employees.iter().map(to_json).collect();
    client.mock_response(HttpMethod::Get, LIST_URL, 200, json!(body));
    vm.load().await;
    assert_eq!(vm.state().employees, employees);
    (client, session, vm)
}

fn fill_draft(vm: &TestViewModel, name: &str, email: &str, department: &str) {
    vm.update_draft(DraftField::Name, name);
    vm.update_draft(DraftField::Email, email);
    vm.update_draft(DraftField::Department, department);
}

// =========================================================
// load 测试
// =========================================================

#[tokio::test]
async fn test_load_without_token_makes_no_request() {
    let client = MockHttpClient::new();
    let (_, vm) = build(client.clone());

    vm.load().await;

    let state = vm.state();
    assert!(state.employees.is_empty());
    assert!(state.last_error.is_some());
    assert!(!state.loading);
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_login_then_load_uses_bearer_token() {
    let client = MockHttpClient::new();
    let (session, vm) = build(client.clone());
    let api = EmployeeApi::new(BASE, client.clone());

    client.mock_response(HttpMethod::Post, LOGIN_URL, 200, json!({"token": "T"}));
    client.mock_response(HttpMethod::Get, LIST_URL, 200, json!([]));

    auth::login(&api, &session, "a", "b").await.unwrap();
    assert_eq!(session.token().as_deref(), Some("T"));

    vm.load().await;

    let requests = client.requests();
    let list_req = requests.last().unwrap();
    assert_eq!(list_req.method, HttpMethod::Get);
    assert_eq!(list_req.url, LIST_URL);
    assert_eq!(
        list_req.headers.get("Authorization").map(String::as_str),
        Some("Bearer T")
    );
}

#[tokio::test]
async fn test_load_replaces_list_wholesale() {
    let (client, _, vm) = seeded(&[employee(1, "Ana", "Eng"), employee(2, "Bo", "Ops")]).await;

    let fresh = vec![employee(5, "Cy", "HR")];
    let body: Vec<_> = fresh.iter().map(to_json).collect();
    client.mock_response(HttpMethod::Get, LIST_URL, 200, json!(body));
    vm.load().await;

    assert_eq!(vm.state().employees, fresh);
}

#[tokio::test]
async fn test_load_failure_sets_error_and_keeps_list() {
    let initial = [employee(1, "Ana", "Eng")];
    let (client, _, vm) = seeded(&initial).await;
    client.mock_response(HttpMethod::Get, LIST_URL, 500, json!({}));

    vm.load().await;

    let state = vm.state();
    assert_eq!(state.employees, initial);
    assert!(
        state
            .last_error
            .unwrap()
            .starts_with("Could not load the employee list")
    );
    assert!(!state.loading);
}

#[tokio::test]
async fn test_superseded_load_is_discarded() {
    let gate = Rc::new(Notify::new());
    let client = MockHttpClient::gated(gate.clone());
    let (session, vm) = build(client.clone());
    session.set_token("T").unwrap();

    let stale = vec![employee(1, "Ana", "Eng")];
    let fresh = vec![employee(1, "Ana", "Eng"), employee(2, "Bo", "Ops")];

    let driver = async {
        // 两次加载都已发出并在等待；先放行后发起的那次
        let body: Vec<_> = fresh.iter().map(to_json).collect();
        client.mock_response(HttpMethod::Get, LIST_URL, 200, json!(body));
        gate.notify_last();
        for _ in 0..16 {
            if vm.state().employees == fresh {
                break;
            }
            tokio::task::yield_now().await;
        }
        // 再放行先发起的那次，它带回旧数据
        let body: Vec<_> = stale.iter().map(to_json).collect();
        client.mock_response(HttpMethod::Get, LIST_URL, 200, json!(body));
        gate.notify_one();
    };
    tokio::join!(vm.load(), vm.load(), driver);

    let state = vm.state();
    assert_eq!(client.request_count(), 2);
    assert_eq!(state.employees, fresh);
    assert!(!state.loading);
}

// =========================================================
// create 测试
// =========================================================

#[tokio::test]
async fn test_create_appends_server_record_and_resets_draft() {
    let (client, _, vm) = seeded(&[employee(1, "Ana", "Eng")]).await;
    client.mock_response(
        HttpMethod::Post,
        LIST_URL,
        201,
        json!({"id": 7, "name": "X", "email": "x@y.z", "department": "Eng"}),
    );

    fill_draft(&vm, "X", "x@y.z", "Eng");
    vm.submit_create().await;

    let state = vm.state();
    assert_eq!(state.employees.len(), 2);
    assert_eq!(
        state.employees.last().unwrap(),
        &Employee::new(7, EmployeeFields::new("X", "x@y.z", "Eng"))
    );
    assert_eq!(state.draft, EmployeeFields::default());
    assert!(!state.saving);

    let post = client.requests().pop().unwrap();
    let body: serde_json::Value = serde_json::from_str(&post.body.unwrap()).unwrap();
    assert_eq!(
        body,
        json!({"name": "X", "email": "x@y.z", "department": "Eng"})
    );
}

#[tokio::test]
async fn test_create_with_missing_field_sends_nothing() {
    let (client, _, vm) = setup();
    let cases = [
        ("", "x@y.z", "Eng"),
        ("X", "", "Eng"),
        ("X", "x@y.z", ""),
        ("   ", "x@y.z", "Eng"),
    ];

    for (name, email, department) in cases {
        fill_draft(&vm, name, email, department);
        vm.submit_create().await;
        assert_eq!(vm.state().last_error.as_deref(), Some("Please fill in all fields"));
    }

    assert_eq!(client.request_count(), 0);
    assert!(vm.state().employees.is_empty());
}

#[tokio::test]
async fn test_create_failure_preserves_draft() {
    let (client, _, vm) = setup();
    client.mock_transport_error(HttpMethod::Post, LIST_URL, "offline");

    fill_draft(&vm, "X", "x@y.z", "Eng");
    vm.submit_create().await;

    let state = vm.state();
    assert!(state.employees.is_empty());
    assert_eq!(state.draft, EmployeeFields::new("X", "x@y.z", "Eng"));
    assert!(state.last_error.unwrap().starts_with("Could not add the employee"));
}

#[tokio::test]
async fn test_create_ignored_while_editing() {
    let ana = employee(1, "Ana", "Eng");
    let (client, _, vm) = seeded(&[ana.clone()]).await;
    let before = client.request_count();

    vm.begin_edit(ana.clone());
    vm.submit_create().await;

    let state = vm.state();
    assert_eq!(client.request_count(), before);
    assert_eq!(state.employees, vec![ana.clone()]);
    assert_eq!(state.editing.as_ref(), Some(&ana));
    assert_eq!(state.draft, ana.fields);
}

#[tokio::test]
async fn test_late_create_keeps_edit_draft() {
    let gate = Rc::new(Notify::new());
    let client = MockHttpClient::gated(gate.clone());
    let (session, vm) = build(client.clone());
    session.set_token("T").unwrap();

    let ana = employee(1, "Ana", "Eng");
    client.mock_response(HttpMethod::Get, LIST_URL, 200, json!([to_json(&ana)]));
    gate.notify_one();
    vm.load().await;

    let created = employee(2, "Bo", "Ops");
    client.mock_response(HttpMethod::Post, LIST_URL, 201, to_json(&created));
    fill_draft(&vm, "Bo", "bo@corp.test", "Ops");

    let interfere = async {
        vm.begin_edit(ana.clone());
        gate.notify_one();
    };
    tokio::join!(vm.submit_create(), interfere);

    let state = vm.state();
    // 新建已在服务端生效
    assert_eq!(state.employees, vec![ana.clone(), created]);
    // 打开的编辑保留自己的草稿
    assert_eq!(state.editing.as_ref(), Some(&ana));
    assert_eq!(state.draft, ana.fields);
    assert!(!state.saving);
}

// =========================================================
// edit 测试
// =========================================================

#[tokio::test]
async fn test_begin_edit_then_cancel_leaves_list_untouched() {
    let initial = [employee(1, "Ana", "Eng"), employee(2, "Bo", "Ops")];
    let (client, _, vm) = seeded(&initial).await;
    let before = client.request_count();

    vm.begin_edit(initial[1].clone());
    let state = vm.state();
    assert!(state.is_modal_open());
    assert_eq!(state.draft, initial[1].fields);

    vm.cancel_edit();

    let state = vm.state();
    assert_eq!(state.employees, initial);
    assert_eq!(state.draft, EmployeeFields::default());
    assert!(state.editing.is_none());
    assert_eq!(client.request_count(), before);
}

#[tokio::test]
async fn test_submit_edit_replaces_matching_employee() {
    let initial = [employee(1, "Ana", "Eng"), employee(2, "Bo", "Ops")];
    let (client, _, vm) = seeded(&initial).await;
    let server_copy = Employee::new(2, EmployeeFields::new("Bob", "bob@corp.test", "Sales"));
    client.mock_response(HttpMethod::Put, &employee_url(2), 200, to_json(&server_copy));

    vm.begin_edit(initial[1].clone());
    vm.update_draft(DraftField::Name, "Bob");
    vm.update_draft(DraftField::Department, "Sales");
    vm.submit_edit().await;

    let state = vm.state();
    assert_eq!(state.employees, vec![initial[0].clone(), server_copy]);
    assert!(!state.is_modal_open());
    assert_eq!(state.draft, EmployeeFields::default());

    let put = client.requests().pop().unwrap();
    assert_eq!(put.method, HttpMethod::Put);
    assert_eq!(put.url, employee_url(2));
}

#[tokio::test]
async fn test_submit_edit_failure_keeps_modal_open() {
    let initial = [employee(1, "Ana", "Eng")];
    let (client, _, vm) = seeded(&initial).await;
    client.mock_response(HttpMethod::Put, &employee_url(1), 409, json!({}));

    vm.begin_edit(initial[0].clone());
    vm.update_draft(DraftField::Name, "Anna");
    vm.submit_edit().await;

    let state = vm.state();
    assert!(state.is_modal_open());
    assert_eq!(state.draft.name, "Anna");
    assert_eq!(state.employees, initial);
    assert!(state.last_error.unwrap().starts_with("Could not update the employee"));
}

#[tokio::test]
async fn test_submit_edit_without_target_is_noop() {
    let (client, _, vm) = setup();
    fill_draft(&vm, "X", "x@y.z", "Eng");

    vm.submit_edit().await;

    assert_eq!(client.request_count(), 0);
    assert!(vm.state().last_error.is_none());
}

#[tokio::test]
async fn test_submit_dispatches_on_editing_target() {
    let initial = [employee(1, "Ana", "Eng")];
    let (client, _, vm) = seeded(&initial).await;
    let renamed = Employee::new(1, EmployeeFields::new("Anna", "ana@corp.test", "Eng"));
    client.mock_response(HttpMethod::Put, &employee_url(1), 200, to_json(&renamed));
    client.mock_response(
        HttpMethod::Post,
        LIST_URL,
        200,
        json!({"id": 2, "name": "Bo", "email": "bo@corp.test", "department": "Ops"}),
    );

    vm.begin_edit(initial[0].clone());
    vm.update_draft(DraftField::Name, "Anna");
    vm.submit().await;
    assert_eq!(client.requests().last().unwrap().method, HttpMethod::Put);

    fill_draft(&vm, "Bo", "bo@corp.test", "Ops");
    vm.submit().await;
    assert_eq!(client.requests().last().unwrap().method, HttpMethod::Post);

    assert_eq!(vm.state().employees.len(), 2);
}

#[tokio::test]
async fn test_late_update_does_not_clobber_new_edit() {
    let gate = Rc::new(Notify::new());
    let client = MockHttpClient::gated(gate.clone());
    let (session, vm) = build(client.clone());
    session.set_token("T").unwrap();

    let ana = employee(1, "Ana", "Eng");
    let bo = employee(2, "Bo", "Ops");
    client.mock_response(
        HttpMethod::Get,
        LIST_URL,
        200,
        json!([to_json(&ana), to_json(&bo)]),
    );
    gate.notify_one();
    vm.load().await;

    let renamed = Employee::new(1, EmployeeFields::new("Anna", "ana@corp.test", "Eng"));
    client.mock_response(HttpMethod::Put, &employee_url(1), 200, to_json(&renamed));

    vm.begin_edit(ana.clone());
    vm.update_draft(DraftField::Name, "Anna");

    let interfere = async {
        vm.cancel_edit();
        vm.begin_edit(bo.clone());
        gate.notify_one();
    };
    tokio::join!(vm.submit_edit(), interfere);

    let state = vm.state();
    // 服务端已生效，列表照常更新
    assert_eq!(state.employees[0], renamed);
    // 新打开的编辑不受影响
    assert_eq!(state.editing.as_ref(), Some(&bo));
    assert_eq!(state.draft, bo.fields);
}

// =========================================================
// remove 测试
// =========================================================

#[tokio::test]
async fn test_remove_updates_summary() {
    let initial = [
        employee(1, "Ana", "Eng"),
        employee(3, "Cy", "Ops"),
        employee(4, "Di", "Eng"),
    ];
    let (client, _, vm) = seeded(&initial).await;
    let before = vm.state().summary();
    assert_eq!(before.count_for("Eng"), 2);
    assert_eq!(before.count_for("Ops"), 1);

    client.mock_empty(HttpMethod::Delete, &employee_url(3), 204);
    vm.remove(EmployeeId::new(3)).await;

    let state = vm.state();
    assert!(state.employees.iter().all(|e| e.id != EmployeeId::new(3)));
    let after = state.summary();
    assert_eq!(after.total(), 2);
    assert_eq!(after.count_for("Eng"), 2);
    assert!(after.departments().iter().all(|d| d.department != "Ops"));
}

#[tokio::test]
async fn test_remove_failure_leaves_list_unchanged() {
    let initial = [employee(1, "Ana", "Eng")];
    let (client, _, vm) = seeded(&initial).await;
    client.mock_response(HttpMethod::Delete, &employee_url(1), 500, json!({}));

    vm.remove(EmployeeId::new(1)).await;

    let state = vm.state();
    assert_eq!(state.employees, initial);
    assert!(state.last_error.unwrap().starts_with("Could not delete the employee"));
}

#[tokio::test]
async fn test_remove_ignores_delete_response_body() {
    let initial = [employee(1, "Ana", "Eng"), employee(3, "Cy", "Ops")];
    let (client, _, vm) = seeded(&initial).await;
    client.mock_response(
        HttpMethod::Delete,
        &employee_url(3),
        200,
        json!({"message": "deleted"}),
    );

    vm.remove(EmployeeId::new(3)).await;

    let state = vm.state();
    assert_eq!(state.employees, vec![initial[0].clone()]);
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn test_duplicate_ids_affect_first_match_only() {
    let first = employee(9, "Ana", "Eng");
    let second = employee(9, "Ana2", "Ops");
    let (client, _, vm) = seeded(&[first.clone(), second.clone()]).await;
    client.mock_empty(HttpMethod::Delete, &employee_url(9), 204);

    vm.remove(EmployeeId::new(9)).await;

    assert_eq!(vm.state().employees, vec![second]);
}

// =========================================================
// 会话 / 综合
// =========================================================

#[tokio::test]
async fn test_logout_locks_dashboard() {
    let (_, session, vm) = setup();
    let guard = RouteGuard::new(session.clone());
    assert_eq!(guard.resolve(AppRoute::Dashboard), AppRoute::Dashboard);

    assert_eq!(vm.logout(), AppRoute::Login);

    assert!(!session.is_active());
    assert_eq!(guard.resolve(AppRoute::Dashboard), AppRoute::Login);
}

#[tokio::test]
async fn test_mutations_after_logout_report_missing_token() {
    let initial = [employee(1, "Ana", "Eng")];
    let (client, _, vm) = seeded(&initial).await;
    let before = client.request_count();
    vm.logout();

    vm.remove(EmployeeId::new(1)).await;

    let state = vm.state();
    assert_eq!(state.employees, initial);
    assert_eq!(state.last_error.as_deref(), Some(MSG_MISSING_TOKEN));
    assert_eq!(client.request_count(), before);
}

#[tokio::test]
async fn test_list_tracks_server_across_mutations() {
    let (client, _, vm) = seeded(&[employee(1, "Ana", "Eng")]).await;
    let mut server = vec![employee(1, "Ana", "Eng")];

    // create
    let created = employee(2, "Bo", "Ops");
    client.mock_response(HttpMethod::Post, LIST_URL, 201, to_json(&created));
    fill_draft(&vm, "Bo", "bo@corp.test", "Ops");
    vm.submit_create().await;
    server.push(created.clone());
    assert_eq!(vm.state().employees, server);

    // update
    let moved = employee(1, "Ana", "Ops");
    client.mock_response(HttpMethod::Put, &employee_url(1), 200, to_json(&moved));
    vm.begin_edit(server[0].clone());
    vm.update_draft(DraftField::Department, "Ops");
    vm.submit_edit().await;
    server[0] = moved;
    assert_eq!(vm.state().employees, server);

    // delete
    client.mock_empty(HttpMethod::Delete, &employee_url(2), 204);
    vm.remove(created.id).await;
    server.retain(|e| e.id != created.id);
    assert_eq!(vm.state().employees, server);
    assert_eq!(vm.state().summary().count_for("Ops"), 1);
}

#[tokio::test]
async fn test_listener_receives_every_change() {
    let (client, _, vm) = setup();
    client.mock_response(
        HttpMethod::Get,
        LIST_URL,
        200,
        json!([to_json(&employee(1, "Ana", "Eng"))]),
    );

    let seen = Rc::new(RefCell::new(Vec::<BoardState>::new()));
    let sink = seen.clone();
    vm.set_listener(move |state| sink.borrow_mut().push(state.clone()));

    vm.load().await;

    let seen = seen.borrow();
    // 注册时一次，开始加载一次，加载完成一次
    assert_eq!(seen.len(), 3);
    assert!(seen[1].loading);
    assert!(!seen[2].loading);
    assert_eq!(seen[2].employees.len(), 1);
}

#[tokio::test]
async fn test_dismiss_error_clears_message() {
    let (_, _, vm) = setup();
    vm.submit_create().await;
    assert!(vm.state().last_error.is_some());

    vm.dismiss_error();
    assert!(vm.state().last_error.is_none());
}

#[tokio::test]
async fn test_conditional_dismiss_keeps_newer_error() {
    let (client, _, vm) = setup();
    client.mock_response(HttpMethod::Get, LIST_URL, 500, json!({}));

    vm.submit_create().await;
    let first = vm.state().last_error.unwrap();
    vm.load().await;
    let second = vm.state().last_error.unwrap();
    assert_ne!(first, second);

    vm.dismiss_error_if(&first);
    assert_eq!(vm.state().last_error.as_deref(), Some(second.as_str()));

    vm.dismiss_error_if(&second);
    assert!(vm.state().last_error.is_none());
}
