//! 会话存储
//!
//! 进程内只持有一个 token。token 的有效性从不在本地校验，
//! 只按"存在/不存在"乐观处理，直到第一次 API 调用失败才会暴露。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use crate::error::{ClientError, ClientResult};
use tracing::{info, warn};

/// 持久化键值存储的抽象（浏览器中为 localStorage）
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    /// 返回操作是否成功
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// 内存实现，克隆体共享同一份数据
#[derive(Clone, Default, Debug)]
pub struct MemoryTokenStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

/// 会话句柄
///
/// 在程序启动时创建唯一实例，再显式传给视图模型和路由守卫；
/// 克隆体指向同一个存储键。
#[derive(Clone, Debug)]
pub struct Session<S> {
    store: S,
    key: String,
}

impl<S: TokenStore> Session<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// 当前 token，空字符串视为没有会话
    pub fn token(&self) -> Option<String> {
        self.store.get(&self.key).filter(|t| !t.is_empty())
    }

    /// 保存 token；存储拒绝写入时不会建立会话
    pub fn set_token(&self, token: &str) -> ClientResult<()> {
        if !self.store.set(&self.key, token) {
            warn!(key = %self.key, "token store rejected the session token");
            return Err(ClientError::SessionStorage);
        }
        info!("session started");
        Ok(())
    }

    pub fn clear_token(&self) {
        if self.store.remove(&self.key) {
            info!("session cleared");
        }
    }

    pub fn is_active(&self) -> bool {
        self.token().is_some()
    }
}
