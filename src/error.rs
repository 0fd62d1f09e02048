//! 客户端错误类型
//!
//! 网络/HTTP 失败不再按状态码细分；另有一类本地会话存储失败。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// 登录失败：凭据错误或服务端错误，在这一层无法区分
    #[error("authentication failed")]
    Auth,
    /// 需要会话的操作在没有 token 时被调用
    #[error("no session token")]
    MissingToken,
    /// 本地存储拒绝写入 token（配额已满、隐私模式等）
    #[error("could not store the session token")]
    SessionStorage,
    /// 其它任何传输或非 2xx 失败
    #[error("request failed: {0}")]
    Request(String),
}

impl ClientError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request(message.into())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Request(format!("invalid JSON: {}", e))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
