use serde::{Deserialize, Serialize};
use std::fmt;

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 后端 API 的默认根地址
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5146/api";
/// 浏览器 localStorage 中保存会话 token 的默认键
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "token";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 员工 ID，由后端分配，客户端从不自行生成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(i64);

impl EmployeeId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for EmployeeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 员工的可编辑字段，同时也是创建/更新请求的请求体
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeFields {
    pub name: String,
    pub email: String,
    pub department: String,
}

impl EmployeeFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            department: department.into(),
        }
    }

    /// 三个字段是否都已填写（纯空白视为未填写）
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.department]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.department.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.department.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(flatten)]
    pub fields: EmployeeFields,
}

impl Employee {
    pub fn new(id: impl Into<EmployeeId>, fields: EmployeeFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn email(&self) -> &str {
        &self.fields.email
    }

    pub fn department(&self) -> &str {
        &self.fields.department
    }
}

// =========================================================
// 认证 (Authentication)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 登录响应，后端可能附带其它字段，这里只关心 token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// 非空的 token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}
