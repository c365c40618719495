//! Anthropic 客户端核心模块
use crate::{
    config::Config,
    error::{ClientError, Result},
    types::{ApiErrorBody, MessagesRequest, MessagesResponse},
};
use log::{debug, error};
use reqwest::{
    Client, Response, StatusCode,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use std::sync::Arc;

// ================================================================================================
// 远程调用抽象
// ================================================================================================

/// 聊天补全后端
///
/// 真实实现是 [`AnthropicClient`]，测试中可以替换为模拟实现。
pub trait ChatBackend {
    /// 发送一次 Messages 请求
    fn create_message(
        &self,
        request: &MessagesRequest,
    ) -> impl Future<Output = Result<MessagesResponse>> + Send;
}

// ================================================================================================
// 核心客户端模块
// ================================================================================================

/// Anthropic Messages API 客户端
///
/// 构造时不发起任何网络请求，凭证在第一次调用时才被服务端校验。
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Arc<Client>,
    config: Arc<Config>,
    api_key: String,
}

impl AnthropicClient {
    /// 创建一个新的 `AnthropicClient` 实例
    pub fn new(config: Config, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                error!("Failed to build reqwest client: {}", e);
                Client::new()
            });

        Self {
            client: Arc::new(client),
            config: Arc::new(config),
            api_key,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 构建 API 请求所需的 HTTP 标头
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| ClientError::InvalidRequest(format!("Invalid API key: {}", e)))?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(&self.config.api_version)
                .map_err(|e| ClientError::Config(format!("Invalid API version: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

impl ChatBackend for AnthropicClient {
    async fn create_message(&self, request: &MessagesRequest) -> Result<MessagesResponse> {
        let endpoint = self.config.messages_endpoint();
        let headers = self.build_headers()?;
        debug!("POST {} model={}", endpoint, request.model);

        let response = self
            .client
            .post(&endpoint)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body = response.text().await?;
        let message: MessagesResponse = serde_json::from_str(&body)?;
        debug!(
            "response {} stop_reason={:?} input_tokens={} output_tokens={}",
            message.id, message.stop_reason, message.usage.input_tokens, message.usage.output_tokens
        );
        Ok(message)
    }
}

/// 将非 2xx 响应转换为错误
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body))
}

/// 根据状态码和错误响应体构造错误
///
/// 优先使用 `error.message`，其次原始响应体，最后是状态行。
pub(crate) fn status_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
        .filter(|m| !m.is_empty())
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| format!("Request failed with status: {}", status));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => ClientError::RateLimit(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
