//! # hello-claude - Anthropic API 连通性检查
//!
//! 解析 API 密钥（环境变量优先，否则交互式输入），向 Messages API
//! 发送一条固定的 `"Hello, Claude!"`，打印回复或错误。
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use hello_claude::{AnthropicClient, Config, CredentialResolver, run};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> std::io::Result<()> {
//!     let config = Config::from_env();
//!     let mut resolver = CredentialResolver::standard(config.credential_var());
//!     let mut stdout = std::io::stdout();
//!     run(&mut resolver, config, AnthropicClient::new, &mut stdout).await?;
//!     Ok(())
//! }
//! ```

// 模块定义
pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod runner;
pub mod types;
pub mod utils;

pub use client::{AnthropicClient, ChatBackend};
pub use config::Config;
pub use credential::{CredentialResolver, CredentialSource, EnvSource, PromptSource};
pub use error::{ClientError, Result};
pub use runner::{Outcome, RequestRunner};

use std::io::{self, Write};

/// 完整流程：解析凭证、构造客户端、发送一次请求、打印结果
///
/// `connect` 用凭证构造后端，不应产生网络请求。凭证读取失败同样按
/// 调用失败打印，只有写出失败才返回错误。
pub async fn run<P, F, B, C, W>(
    resolver: &mut CredentialResolver<P, F>,
    config: Config,
    connect: C,
    out: &mut W,
) -> io::Result<Outcome>
where
    P: CredentialSource,
    F: CredentialSource,
    B: ChatBackend,
    C: FnOnce(Config, String) -> B,
    W: Write,
{
    let credential = match resolver.resolve() {
        Ok(credential) => credential,
        Err(e) => {
            let outcome = Outcome::Failure(e.to_string());
            runner::render(&outcome, out)?;
            return Ok(outcome);
        }
    };

    let backend = connect(config.clone(), credential);
    RequestRunner::new(backend, config).run(out).await
}
