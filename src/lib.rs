//! StaffDesk 客户端核心
//!
//! 与平台无关的部分，浏览器相关的实现由前端 crate 通过 trait 注入：
//! - `request`: HTTP 抽象层（`HttpClient`）
//! - `api`: 员工管理后端的 API 客户端
//! - `session`: 会话 token 存储（`TokenStore`）
//! - `route`: 路由定义与守卫
//! - `auth`: 登录 / 注销
//! - `view_model`: 员工面板视图模型
//! - `summary`: 部门汇总

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod request;
pub mod route;
pub mod session;
pub mod summary;
pub mod view_model;

pub use api::EmployeeApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub use route::{AppRoute, RouteGuard};
pub use session::{MemoryTokenStore, Session, TokenStore};
pub use summary::{DepartmentCount, DepartmentSummary};
pub use view_model::{BoardState, DraftField, EmployeeViewModel};

pub use staffdesk_shared as shared;
