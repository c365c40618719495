//! 工具函数模块
use crate::config::Config;
use crate::types::{Message, MessagesRequest, Role};

/// 创建消息的便捷函数
///
/// # 参数
///
/// * `role` - 消息角色
/// * `content` - 消息内容
///
/// # 返回
///
/// 新创建的消息实例
pub fn message(role: Role, content: &str) -> Message {
    Message {
        role,
        content: content.to_string(),
    }
}

/// 构建固定的问候请求
///
/// 只有一条用户消息，字段全部来自配置。
pub fn greeting_request(config: &Config) -> MessagesRequest {
    MessagesRequest {
        model: config.model.clone(),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        messages: vec![message(Role::User, &config.prompt)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_creation() {
        let msg = message(Role::User, "Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_greeting_request_wire_format() {
        let request = greeting_request(&Config::default());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "claude-3-5-sonnet-20241022",
                "max_tokens": 100,
                "temperature": 0.0,
                "messages": [{"role": "user", "content": "Hello, Claude!"}]
            })
        );
    }

    #[test]
    fn test_greeting_request_is_deterministic() {
        let a = greeting_request(&Config::default());
        let b = greeting_request(&Config::from_lookup(|_| Some("ignored".into())));
        assert_eq!(a, b);
    }
}
