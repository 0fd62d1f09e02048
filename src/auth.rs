//! 登录 / 注销
//!
//! 登录成功才会创建会话，失败时会话保持原样。

use crate::api::EmployeeApi;
use crate::error::{ClientError, ClientResult};
use crate::request::HttpClient;
use crate::session::{Session, TokenStore};
use tracing::{info, warn};

/// 登录并保存 token
pub async fn login<C, S>(
    api: &EmployeeApi<C>,
    session: &Session<S>,
    username: &str,
    password: &str,
) -> ClientResult<()>
where
    C: HttpClient,
    S: TokenStore,
{
    let resp = match api.login(username, password).await {
        Ok(resp) => resp,
        Err(e) => {
            warn!(user = %username, error = %e, "login request failed");
            return Err(e);
        }
    };

    match resp.token() {
        Some(token) => {
            session.set_token(token)?;
            info!(user = %username, "logged in");
            Ok(())
        }
        None => {
            warn!(user = %username, "login response carried no token");
            Err(ClientError::Auth)
        }
    }
}

pub fn logout<S: TokenStore>(session: &Session<S>) {
    session.clear_token();
}

const MSG_BAD_CREDENTIALS: &str = "Invalid username or password";
const MSG_STORAGE_FAILED: &str =
    "Could not save the session, check that browser storage is enabled";
const MSG_SIGN_IN_FAILED: &str = "Could not sign in, please try again";

/// 登录失败时展示给用户的消息；细节只进日志
pub fn login_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Auth => MSG_BAD_CREDENTIALS,
        ClientError::SessionStorage => MSG_STORAGE_FAILED,
        ClientError::MissingToken | ClientError::Request(_) => MSG_SIGN_IN_FAILED,
    }
    .to_string()
}
