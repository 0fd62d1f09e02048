//! 员工管理后端的 API 客户端
//!
//! 每个调用只发起一次网络请求，不重试、不设置额外超时。

use crate::error::{ClientError, ClientResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use staffdesk_shared::protocol::{
    ApiRequest, CreateEmployeeRequest, DeleteEmployeeRequest, ListEmployeesRequest,
    UpdateEmployeeRequest,
};
use staffdesk_shared::{
    CONTENT_TYPE_JSON, Employee, EmployeeFields, EmployeeId, HEADER_AUTHORIZATION,
    HEADER_CONTENT_TYPE, LoginRequest, LoginResponse,
};
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq)]
pub struct EmployeeApi<C> {
    base_url: String,
    client: C,
}

impl<C: HttpClient> EmployeeApi<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 按端点定义构建并发送请求，返回原始响应
    async fn dispatch<R: ApiRequest>(
        &self,
        request: &R,
        token: Option<&str>,
    ) -> ClientResult<HttpResponse> {
        let path = request.path();
        let mut req = HttpRequest::new(&self.url(&path), R::METHOD);

        if R::REQUIRES_AUTH {
            let token = token.ok_or(ClientError::MissingToken)?;
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        if let Some(body) = request.body() {
            req = req
                .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                .with_body(serde_json::to_value(body)?);
        }

        debug!(method = %R::METHOD, path = %path, "sending request");
        self.client.send(req).await
    }

    /// 发送需要鉴权的请求，非 2xx 统一视为 `Request` 错误
    async fn send_checked<R: ApiRequest>(
        &self,
        request: &R,
        token: &str,
    ) -> ClientResult<HttpResponse> {
        let path = request.path();
        let res = self.dispatch(request, Some(token)).await?;

        if !res.ok() {
            warn!(method = %R::METHOD, path = %path, status = res.status, "request rejected");
            return Err(ClientError::Request(format!(
                "{} {} returned status {}",
                R::METHOD,
                path,
                res.status
            )));
        }

        Ok(res)
    }

    async fn call<R: ApiRequest>(&self, request: &R, token: &str) -> ClientResult<R::Response> {
        self.send_checked(request, token).await?.json::<R::Response>()
    }

    /// 登录，非 2xx 响应视为认证失败
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let res = self.dispatch(&request, None).await?;

        if !res.ok() {
            warn!(status = res.status, "login rejected");
            return Err(ClientError::Auth);
        }

        res.json::<LoginResponse>()
    }

    /// 获取员工列表
    pub async fn list_employees(&self, token: &str) -> ClientResult<Vec<Employee>> {
        self.call(&ListEmployeesRequest, token).await
    }

    /// 新增员工，返回带服务端 ID 的记录
    pub async fn create_employee(
        &self,
        token: &str,
        fields: &EmployeeFields,
    ) -> ClientResult<Employee> {
        let request = CreateEmployeeRequest {
            fields: fields.clone(),
        };
        self.call(&request, token).await
    }

    /// 整体替换员工的姓名、邮箱和部门
    pub async fn update_employee(
        &self,
        token: &str,
        id: EmployeeId,
        fields: &EmployeeFields,
    ) -> ClientResult<Employee> {
        let request = UpdateEmployeeRequest {
            id,
            fields: fields.clone(),
        };
        self.call(&request, token).await
    }

    /// 删除员工；只看状态码，响应体（如果有）直接丢弃
    pub async fn delete_employee(&self, token: &str, id: EmployeeId) -> ClientResult<()> {
        self.send_checked(&DeleteEmployeeRequest { id }, token)
            .await
            .map(|_| ())
    }
}
