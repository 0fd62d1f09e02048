//! 运行时配置
//!
//! 每个值都可以通过变量覆盖，读不到（或为空）就使用默认值。

use staffdesk_shared::{DEFAULT_API_BASE_URL, DEFAULT_TOKEN_STORAGE_KEY};

const DEFAULT_LOG_LEVEL: &str = "info";

pub const VAR_API_URL: &str = "STAFFDESK_API_URL";
pub const VAR_TOKEN_KEY: &str = "STAFFDESK_TOKEN_KEY";
pub const VAR_LOG_LEVEL: &str = "STAFFDESK_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API 根地址，不带结尾的 `/`
    pub api_base_url: String,
    /// 会话 token 在持久化存储中的键
    pub token_storage_key: String,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// 通过任意查找函数构建配置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            api_base_url: read(VAR_API_URL, DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            token_storage_key: read(VAR_TOKEN_KEY, DEFAULT_TOKEN_STORAGE_KEY),
            log_level: read(VAR_LOG_LEVEL, DEFAULT_LOG_LEVEL),
        }
    }

    /// 读取编译期环境变量（浏览器中没有进程环境）
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                VAR_API_URL => option_env!("STAFFDESK_API_URL"),
                VAR_TOKEN_KEY => option_env!("STAFFDESK_TOKEN_KEY"),
                VAR_LOG_LEVEL => option_env!("STAFFDESK_LOG"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }
}
