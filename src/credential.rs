//! 凭证解析模块
//!
//! 先查环境变量，没有则交互式提示输入。两种来源都实现 [`CredentialSource`]，
//! 测试时可以替换为内存中的实现。
use crate::error::Result;
use log::debug;
use std::env;
use std::fmt;
use std::io::{self, BufRead, Write};

/// 交互式提示文本
pub const PROMPT_LABEL: &str = "Please enter your Anthropic API key: ";

/// 凭证来源
pub trait CredentialSource {
    /// 返回凭证；该来源没有可用凭证时返回 `None`
    fn credential(&mut self) -> Result<Option<String>>;
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// 从环境变量读取凭证，变量未设置或为空时视为没有
///
/// 值不是合法 UTF-8 时同样视为未设置（会记录 `debug!` 日志），随后回退到提示输入。
pub struct EnvSource {
    var: String,
    lookup: Lookup,
}

impl EnvSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self::with_lookup(var, read_var)
    }

    /// 使用自定义查找函数，不读取真实的进程环境
    pub fn with_lookup<F>(var: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            var: var.into(),
            lookup: Box::new(lookup),
        }
    }
}

/// 读取进程环境变量
fn read_var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) => Some(value),
        Err(env::VarError::NotPresent) => None,
        Err(env::VarError::NotUnicode(_)) => {
            debug!("credential variable {} is not valid UTF-8, ignoring it", key);
            None
        }
    }
}

impl fmt::Debug for EnvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvSource").field("var", &self.var).finish()
    }
}

impl CredentialSource for EnvSource {
    fn credential(&mut self) -> Result<Option<String>> {
        let value = (self.lookup)(&self.var).filter(|v| !v.is_empty());
        debug!("credential variable {} present: {}", self.var, value.is_some());
        Ok(value)
    }
}

/// 交互式提示输入凭证
///
/// 输入原样使用，只去掉行尾换行；空行同样返回 `Some("")`。
#[derive(Debug)]
pub struct PromptSource<R, W> {
    reader: R,
    writer: W,
    label: String,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            label: PROMPT_LABEL.to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// 取回写出端，测试中用于检查提示文本
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl PromptSource<io::StdinLock<'static>, io::Stdout> {
    /// 标准输入/输出上的提示
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> CredentialSource for PromptSource<R, W> {
    fn credential(&mut self) -> Result<Option<String>> {
        write!(self.writer, "{}", self.label)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            // EOF：用户没有回车，补一个换行让后续输出另起一行
            writeln!(self.writer)?;
            self.writer.flush()?;
        }
        Ok(Some(strip_line_ending(line)))
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// 凭证解析器：主来源优先，失败时回退
#[derive(Debug)]
pub struct CredentialResolver<P, F> {
    primary: P,
    fallback: F,
}

impl<P: CredentialSource, F: CredentialSource> CredentialResolver<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// 解析凭证
    ///
    /// 回退来源给出什么就用什么，包括空字符串；校验留给远程调用。
    pub fn resolve(&mut self) -> Result<String> {
        if let Some(credential) = self.primary.credential()? {
            return Ok(credential);
        }
        debug!("no credential in primary source, falling back");
        Ok(self.fallback.credential()?.unwrap_or_default())
    }
}

impl CredentialResolver<EnvSource, PromptSource<io::StdinLock<'static>, io::Stdout>> {
    /// 环境变量 + 标准输入提示
    pub fn standard(var: &str) -> Self {
        Self::new(EnvSource::new(var), PromptSource::stdio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Cursor;

    fn env_with(pairs: &[(&str, &str)]) -> EnvSource {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvSource::with_lookup("API_KEY", move |k| vars.get(k).cloned())
    }

    fn prompt(input: &str) -> PromptSource<Cursor<Vec<u8>>, Vec<u8>> {
        PromptSource::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    /// A source that must never be consulted.
    struct Unreachable;

    impl CredentialSource for Unreachable {
        fn credential(&mut self) -> Result<Option<String>> {
            panic!("fallback consulted although primary had a credential");
        }
    }

    #[test]
    fn test_env_source_present() {
        let mut source = env_with(&[("API_KEY", "sk-test")]);
        assert_eq!(source.credential().unwrap().as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_env_source_unset_or_empty() {
        assert_eq!(env_with(&[]).credential().unwrap(), None);
        assert_eq!(env_with(&[("API_KEY", "")]).credential().unwrap(), None);
    }

    #[test]
    fn test_prompt_source_writes_label_and_strips_newline() {
        let mut source = prompt("sk-manual\n");
        assert_eq!(source.credential().unwrap().as_deref(), Some("sk-manual"));
        assert_eq!(source.into_writer(), PROMPT_LABEL.as_bytes());
    }

    #[test]
    fn test_prompt_source_keeps_text_verbatim() {
        let mut source = prompt("  sk with spaces \r\n");
        assert_eq!(
            source.credential().unwrap().as_deref(),
            Some("  sk with spaces ")
        );
    }

    #[test]
    fn test_prompt_source_empty_input_passes_through() {
        assert_eq!(prompt("\n").credential().unwrap().as_deref(), Some(""));
        assert_eq!(prompt("").credential().unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_prompt_source_eof_ends_the_prompt_line() {
        let mut source = prompt("");
        source.credential().unwrap();
        assert_eq!(source.into_writer(), format!("{}\n", PROMPT_LABEL).into_bytes());

        // A normal answer already ended the line on the terminal.
        let mut source = prompt("sk-manual\n");
        source.credential().unwrap();
        assert_eq!(source.into_writer(), PROMPT_LABEL.as_bytes());
    }

    #[test]
    fn test_read_var_missing() {
        assert_eq!(read_var("HELLO_CLAUDE_TEST_SURELY_UNSET_VAR"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_read_var_non_utf8_is_treated_as_unset() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let key = "HELLO_CLAUDE_TEST_NON_UTF8_KEY";
        // Only this test touches this variable.
        unsafe { env::set_var(key, OsStr::from_bytes(b"sk-\xff\xfe")) };
        assert_eq!(read_var(key), None);
        assert_eq!(EnvSource::new(key).credential().unwrap(), None);
        unsafe { env::remove_var(key) };
    }

    #[test]
    fn test_resolver_prefers_env() {
        let mut resolver = CredentialResolver::new(env_with(&[("API_KEY", "sk-test")]), Unreachable);
        assert_eq!(resolver.resolve().unwrap(), "sk-test");
    }

    #[test]
    fn test_resolver_falls_back_to_prompt() {
        let mut resolver = CredentialResolver::new(env_with(&[]), prompt("sk-manual\n"));
        assert_eq!(resolver.resolve().unwrap(), "sk-manual");
    }

    #[test]
    fn test_resolver_empty_env_falls_back_to_prompt() {
        let mut resolver =
            CredentialResolver::new(env_with(&[("API_KEY", "")]), prompt("sk-manual\n"));
        assert_eq!(resolver.resolve().unwrap(), "sk-manual");
    }
}
