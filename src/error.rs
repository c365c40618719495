//! 错误处理模块

use thiserror::Error;

/// 远程调用失败的统一错误类型
///
/// 所有失败（网络、鉴权、额度、响应格式）都归入这一个类型，
/// 上层只需要打印其消息即可。来自 API 的错误直接显示服务端给出的消息。
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP 请求相关错误，消息包含底层原因链
    #[error("{}", error_chain(.0))]
    Http(#[from] reqwest::Error),

    /// JSON 序列化/反序列化错误
    #[error("{0}")]
    Json(String),

    /// API 服务端错误
    #[error("{message}")]
    Api { status: u16, message: String },

    /// 身份验证失败 (401 / 403)
    #[error("{0}")]
    Auth(String),

    /// API 请求频率或额度限制 (429)
    #[error("{0}")]
    RateLimit(String),

    /// 响应内容为空，或首个内容块不是文本
    #[error("response contained no text content")]
    NoContent,

    /// 请求参数无效
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// 配置相关错误
    #[error("configuration error: {0}")]
    Config(String),

    /// IO 错误
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// 凭证被服务端拒绝
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth(_))
    }

    /// 可能通过重试恢复的错误：网络、限流、5xx
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_timeout() || e.is_connect(),
            ClientError::RateLimit(_) => true,
            ClientError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// 把错误及其所有 `source` 拼接为一行，例如
/// `error sending request for url (...): client error (Connect): Connection refused (os error 111)`
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // 有些错误的 Display 已经带上了原因
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// 本库的 Result 类型别名
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Json(e.to_string())
    }
}
