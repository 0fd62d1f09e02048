use crate::error::{ClientError, ClientResult};
use serde::de::DeserializeOwned;
use staffdesk_shared::protocol::HttpMethod;
use std::collections::HashMap;

#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 解析 JSON 响应体；空响应体按 `null` 处理，以便 `()` 等类型能直接解析
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        let body = self.body.trim();
        let body = if body.is_empty() { "null" } else { body };
        serde_json::from_str(body).map_err(ClientError::from)
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器环境下 fetch 相关的 future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

#[cfg(test)]
#[derive(Default)]
struct MockState {
    // (Method, URL) -> (Status, Response Body)
    responses: HashMap<(&'static str, String), (u16, String)>,
    failures: HashMap<(&'static str, String), String>,
    requests: Vec<RecordedRequest>,
}

/// 可克隆的 Mock 客户端，克隆体共享同一份状态，测试可以保留一个句柄做断言
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Rc<RefCell<MockState>>,
    gate: Option<Rc<tokio::sync::Notify>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每个请求在返回前都等待 gate 被通知一次
    pub fn gated(gate: Rc<tokio::sync::Notify>) -> Self {
        Self {
            state: Rc::default(),
            gate: Some(gate),
        }
    }

    pub fn mock_response(
        &self,
        method: HttpMethod,
        url: &str,
        status: u16,
        body: serde_json::Value,
    ) {
        self.state
            .borrow_mut()
            .responses
            .insert((method.as_str(), url.to_string()), (status, body.to_string()));
    }

    pub fn mock_empty(&self, method: HttpMethod, url: &str, status: u16) {
        self.state
            .borrow_mut()
            .responses
            .insert((method.as_str(), url.to_string()), (status, String::new()));
    }

    /// 模拟传输层失败（例如网络断开）
    pub fn mock_transport_error(&self, method: HttpMethod, url: &str, message: &str) {
        self.state
            .borrow_mut()
            .failures
            .insert((method.as_str(), url.to_string()), message.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let key = (req.method.as_str(), req.url.clone());
        self.state.borrow_mut().requests.push(RecordedRequest {
            url: req.url,
            method: req.method,
            headers: req.headers,
            body: req.body,
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let state = self.state.borrow();
        if let Some(message) = state.failures.get(&key) {
            return Err(ClientError::request(message.clone()));
        }
        match state.responses.get(&key) {
            Some((status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}
