//! API 数据结构模块

use serde::{Deserialize, Serialize};

// ================================================================================================
// API 请求结构
// ================================================================================================

/// 对话消息
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Message {
    /// 角色
    pub role: Role,
    /// 内容
    pub content: String,
}

/// 角色枚举
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 用户
    #[default]
    User,
    /// 机器人
    Assistant,
}

/// Messages API 请求体
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MessagesRequest {
    /// 模型名称
    pub model: String,
    /// 最大生成 token 数
    pub max_tokens: u32,
    /// 温度参数
    pub temperature: f32,
    /// 对话消息
    pub messages: Vec<Message>,
}

// ================================================================================================
// API 响应结构
// ================================================================================================

/// Messages API 响应体
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct MessagesResponse {
    /// 响应 ID
    #[serde(default)]
    pub id: String,
    /// 使用模型
    #[serde(default)]
    pub model: String,
    /// 角色
    #[serde(default = "assistant")]
    pub role: Role,
    /// 内容块
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    /// 结束原因
    pub stop_reason: Option<String>,
    /// token 使用情况
    #[serde(default)]
    pub usage: Usage,
}

fn assistant() -> Role {
    Role::Assistant
}

impl MessagesResponse {
    /// 首个内容块的文本，没有内容或首块不是文本时返回 `None`
    pub fn first_text(&self) -> Option<&str> {
        match self.content.first()? {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        }
    }
}

/// 响应内容块
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// 文本
    Text { text: String },
    /// 其他类型（tool_use、thinking 等），内容不读取
    #[serde(other)]
    Other,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}

/// token 使用情况
#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy)]
pub struct Usage {
    /// 输入 token 数量
    #[serde(default)]
    pub input_tokens: u32,
    /// 输出 token 数量
    #[serde(default)]
    pub output_tokens: u32,
}

/// API 错误响应体
///
/// 形如 `{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}`
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

/// API 错误详情
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}
