//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 `HttpClient` 特性。

use staffdesk::{ClientError, ClientResult, HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// 请求构建失败
fn build_failed(e: JsValue) -> ClientError {
    ClientError::request(format!("could not build request: {:?}", e))
}

/// 网络请求失败
fn network_failed(e: JsValue) -> ClientError {
    ClientError::request(format!("network error: {:?}", e))
}

/// 响应解析失败
fn parse_failed(e: JsValue) -> ClientError {
    ClientError::request(format!("could not read response: {:?}", e))
}

/// 读取响应体文本
async fn read_text(response: &Response) -> ClientResult<String> {
    let promise = response.text().map_err(parse_failed)?;
    let text = JsFuture::from(promise).await.map_err(parse_failed)?;
    text.as_string()
        .ok_or_else(|| ClientError::request("response body is not a string"))
}

/// 基于 `window.fetch` 的 HTTP 客户端
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let headers = Headers::new().map_err(build_failed)?;
        for (key, value) in &req.headers {
            headers.set(key, value).map_err(build_failed)?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts).map_err(build_failed)?;

        let window = web_sys::window()
            .ok_or_else(|| ClientError::request("window is not available"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network_failed)?;

        let response: Response = resp_value.dyn_into().map_err(parse_failed)?;

        Ok(HttpResponse {
            status: response.status(),
            body: read_text(&response).await?,
        })
    }
}
