//! 登录/注册表单
//!
//! 表单只做必填校验，校验失败时不修改任何状态。

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// 邮箱 @ 之前的部分，用作展示名
    pub fn local_part(&self) -> &str {
        local_part(&self.email)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub username: String,
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub password: String,
}

impl SignupForm {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// 用户名统一加 @ 前缀
pub fn handle(username: &str) -> String {
    format!("@{username}")
}
