//! 命令行入口：检查 Anthropic API 密钥是否可用
use hello_claude::{AnthropicClient, Config, CredentialResolver, run};
use log::info;
use std::io;

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    // 诊断日志只写 stderr，默认关闭，保证 stdout 输出固定
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config = Config::from_env();
    info!("using endpoint {}", config.messages_endpoint());

    let mut resolver = CredentialResolver::standard(config.credential_var());
    let mut stdout = io::stdout();
    let outcome = run(&mut resolver, config, AnthropicClient::new, &mut stdout).await?;
    info!("finished: {:?}", outcome);
    Ok(())
}
