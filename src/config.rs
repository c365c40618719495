//! 配置模块
use std::env;
use std::time::Duration;

// ===============================================================================================
// 配置模块
// ===============================================================================================

/// 默认模型
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
/// 默认最大生成 token 数
pub const DEFAULT_MAX_TOKENS: u32 = 100;
/// 默认温度，0.0 保证输出确定
pub const DEFAULT_TEMPERATURE: f32 = 0.0;
/// 固定发送的问候语
pub const GREETING: &str = "Hello, Claude!";
/// 默认 API 基础 URL
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
/// Messages API 版本头
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
/// 存放 API 密钥的环境变量
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
/// 覆盖 API 基础 URL 的环境变量
pub const API_BASE_VAR: &str = "ANTHROPIC_BASE_URL";

/// 客户端与请求配置
///
/// 凭证不在这里保存，由 [`crate::credential`] 单独解析。
#[derive(Debug, Clone)]
pub struct Config {
    /// 模型名称
    pub(crate) model: String,
    /// 最大生成 token 数
    pub(crate) max_tokens: u32,
    /// 温度参数
    pub(crate) temperature: f32,
    /// 用户消息内容
    pub(crate) prompt: String,
    /// API 基础 URL
    pub(crate) api_base: String,
    /// `anthropic-version` 头
    pub(crate) api_version: String,
    /// 请求超时时间
    pub(crate) timeout: Duration,
    /// 读取凭证的环境变量名
    pub(crate) credential_var: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            prompt: GREETING.into(),
            api_base: DEFAULT_API_BASE.into(),
            api_version: DEFAULT_API_VERSION.into(),
            timeout: Duration::from_secs(60),
            credential_var: API_KEY_VAR.into(),
        }
    }
}

/// 生成 Config Builder 方法的宏
///
/// 自动生成 `with_field_name` 形式的 builder 方法
macro_rules! config_builder {
    ($field:ident, $type:ty) => {
        paste::paste! {
            #[doc = "设置 `"]
            #[doc = stringify!($field)]
            #[doc = "`"]
            pub fn [<with_ $field>](mut self, $field: $type) -> Self {
                self.$field = $field;
                self
            }
        }
    };
}

impl Config {
    pub fn model(&self) -> &str { &self.model }
    pub fn max_tokens(&self) -> u32 { self.max_tokens }
    pub fn temperature(&self) -> f32 { self.temperature }
    pub fn prompt(&self) -> &str { &self.prompt }
    pub fn api_base(&self) -> &str { &self.api_base }
    pub fn api_version(&self) -> &str { &self.api_version }
    pub fn timeout(&self) -> Duration { self.timeout }
    pub fn credential_var(&self) -> &str { &self.credential_var }

    /// 从进程环境变量加载配置
    ///
    /// 只有 `ANTHROPIC_BASE_URL` 可以覆盖默认值，请求字段保持固定。
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 使用给定的查找函数加载配置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = lookup(API_BASE_VAR)
            .filter(|v| !v.is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Config {
            api_base,
            ..Default::default()
        }
    }

    /// Messages API 端点
    pub fn messages_endpoint(&self) -> String {
        format!("{}/v1/messages", self.api_base)
    }

    // 使用宏生成 builder 方法
    config_builder!(model, String);
    config_builder!(max_tokens, u32);
    config_builder!(temperature, f32);
    config_builder!(prompt, String);
    config_builder!(api_base, String);
    config_builder!(api_version, String);
    config_builder!(timeout, Duration);
    config_builder!(credential_var, String);
}
