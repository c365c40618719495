//! 单次请求执行模块
use crate::{
    client::ChatBackend,
    config::Config,
    error::{ClientError, Result},
    utils::greeting_request,
};
use log::{debug, warn};
use std::io::{self, Write};

/// 成功时的输出前缀
pub const REPLY_LABEL: &str = "Reply:";
/// 失败时的输出前缀
pub const ERROR_LABEL: &str = "Error:";
/// 失败时附加的提示
pub const REMEDIATION_HINT: &str =
    "Please check that your API key is correct and that your account has sufficient quota.";

/// 一次调用的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 首个内容块的文本
    Success(String),
    /// 错误消息
    Failure(String),
}

/// 发送固定请求并报告结果
#[derive(Debug)]
pub struct RequestRunner<B> {
    backend: B,
    config: Config,
}

impl<B: ChatBackend> RequestRunner<B> {
    pub fn new(backend: B, config: Config) -> Self {
        Self { backend, config }
    }

    /// 执行一次调用并取出回复文本
    pub async fn call(&self) -> Result<String> {
        let request = greeting_request(&self.config);
        let response = self.backend.create_message(&request).await?;
        response
            .first_text()
            .map(str::to_string)
            .ok_or(ClientError::NoContent)
    }

    /// 执行一次调用，把结果写到 `out`
    ///
    /// 远程调用的任何失败都被吞掉并打印，只有写出失败才返回错误。
    pub async fn run<W: Write>(&self, out: &mut W) -> io::Result<Outcome> {
        let outcome = match self.call().await {
            Ok(text) => {
                debug!("call succeeded");
                Outcome::Success(text)
            }
            Err(e) => {
                warn!("call failed: {:?}", e);
                Outcome::Failure(e.to_string())
            }
        };
        render(&outcome, out)?;
        Ok(outcome)
    }
}

/// 打印结果
pub fn render<W: Write>(outcome: &Outcome, out: &mut W) -> io::Result<()> {
    match outcome {
        Outcome::Success(text) => writeln!(out, "{} {}", REPLY_LABEL, text),
        Outcome::Failure(message) => {
            writeln!(out, "{} {}", ERROR_LABEL, message)?;
            writeln!(out, "{}", REMEDIATION_HINT)
        }
    }
}
