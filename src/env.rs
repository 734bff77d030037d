//! 统一的环境变量管理系统
//!
//! 每个环境变量对应一个实现 [`EnvVar`] 的零大小类型，解析与校验集中在这里，
//! 启动时由 [`EnvConfig::from_env`] 一次性读取。

use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "WATTPAD_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.trim().to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// 编号密钥变量的上限（GROQ_API_KEY_1 .. GROQ_API_KEY_9）
    pub const NUMBERED_KEY_LIMIT: usize = 9;

    /// API 密钥列表
    ///
    /// 依次读取 `GROQ_API_KEY_1` 到 `GROQ_API_KEY_9`，再追加 `GROQ_API_KEYS`
    /// 中逗号分隔的密钥。空值被跳过，去重留给 `KeyPool`。
    pub struct ApiKeys;
    impl EnvVar<Vec<String>> for ApiKeys {
        const NAME: &'static str = "GROQ_API_KEYS";
        const DEFAULT: Option<Vec<String>> = None;

        fn get() -> EnvResult<Vec<String>> {
            let mut keys = Vec::new();
            for i in 1..=NUMBERED_KEY_LIMIT {
                if let Ok(value) = env::var(format!("GROQ_API_KEY_{}", i)) {
                    keys.extend(Self::parse(&value)?);
                }
            }
            if let Ok(value) = env::var(Self::NAME) {
                keys.extend(Self::parse(&value)?);
            }
            Ok(keys)
        }
        const DESCRIPTION: &'static str =
            "Groq API keys: GROQ_API_KEY_1..GROQ_API_KEY_9 and/or a comma-separated GROQ_API_KEYS";

        fn parse(value: &str) -> EnvResult<Vec<String>> {
            Ok(value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect())
        }
    }

    /// API URL
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "GROQ_API_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::translation::client::DEFAULT_API_URL.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Chat-completion endpoint URL";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API URL must start with http:// or https://".to_string(),
                })
            }
        }
    }

    /// 模型名称
    pub struct Model;
    impl EnvVar<String> for Model {
        const NAME: &'static str = "GROQ_MODEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::translation::client::DEFAULT_MODEL.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Model identifier sent with every completion request";

        fn parse(value: &str) -> EnvResult<String> {
            let model = value.trim();
            if model.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Model cannot be empty".to_string(),
                });
            }
            Ok(model.to_string())
        }
    }

    /// 采样温度
    pub struct Temperature;
    impl EnvVar<f32> for Temperature {
        const NAME: &'static str = "GROQ_TEMPERATURE";
        const DEFAULT: Option<f32> = Some(0.4);
        const DESCRIPTION: &'static str = "Sampling temperature (0.0 - 2.0)";

        fn parse(value: &str) -> EnvResult<f32> {
            let temperature: f32 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid number".to_string(),
            })?;

            if !(0.0..=2.0).contains(&temperature) {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Temperature must be between 0.0 and 2.0".to_string(),
                });
            }

            Ok(temperature)
        }
    }

    /// 单次请求超时
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "GROQ_TIMEOUT_SECS";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(90));
        const DESCRIPTION: &'static str = "Completion request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_seconds(value, Self::NAME, 600)
        }
    }

    /// 分块大小
    pub struct ChunkSize;
    impl EnvVar<usize> for ChunkSize {
        const NAME: &'static str = "TRANSLATION_CHUNK_SIZE";
        const DEFAULT: Option<usize> = Some(1500);
        const DESCRIPTION: &'static str = "Maximum characters per translation request";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 100, 20000)
        }
    }

    /// 每个密钥的重试次数
    pub struct RetriesPerKey;
    impl EnvVar<usize> for RetriesPerKey {
        const NAME: &'static str = "TRANSLATION_RETRIES_PER_KEY";
        const DEFAULT: Option<usize> = Some(3);
        const DESCRIPTION: &'static str = "Attempts per API key before a chunk is given up";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 20)
        }
    }

    /// 限流后的重试间隔
    pub struct RetryDelay;
    impl EnvVar<Duration> for RetryDelay {
        const NAME: &'static str = "TRANSLATION_RETRY_DELAY_MS";
        const DEFAULT: Option<Duration> = Some(Duration::from_millis(1000));
        const DESCRIPTION: &'static str = "Pause after a 429/503/400 answer, in milliseconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_millis(value, Self::NAME)
        }
    }

    /// 分块之间的间隔
    pub struct ChunkDelay;
    impl EnvVar<Duration> for ChunkDelay {
        const NAME: &'static str = "TRANSLATION_CHUNK_DELAY_MS";
        const DEFAULT: Option<Duration> = Some(Duration::from_millis(500));
        const DESCRIPTION: &'static str = "Pause between consecutive chunks, in milliseconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_millis(value, Self::NAME)
        }
    }
}

/// 正文提取相关环境变量
pub mod extraction {
    use super::*;

    /// 抓取超时
    pub struct FetchTimeout;
    impl EnvVar<Duration> for FetchTimeout {
        const NAME: &'static str = "WATTPAD_FETCH_TIMEOUT_SECS";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(30));
        const DESCRIPTION: &'static str = "Source page fetch timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_seconds(value, Self::NAME, 300)
        }
    }

    /// 是否校验来源域名
    pub struct ValidateHost;
    impl EnvVar<bool> for ValidateHost {
        const NAME: &'static str = "WATTPAD_VALIDATE_HOST";
        const DEFAULT: Option<bool> = Some(true);
        const DESCRIPTION: &'static str = "Reject /extract URLs outside the expected host";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 允许的来源域名
    pub struct ExpectedHost;
    impl EnvVar<String> for ExpectedHost {
        const NAME: &'static str = "WATTPAD_EXPECTED_HOST";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("wattpad.com".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Host (and its subdomains) accepted by /extract";

        fn parse(value: &str) -> EnvResult<String> {
            let host = value.trim().trim_start_matches("www.").to_lowercase();
            if host.is_empty() || host.contains('/') {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Host must be a bare domain name".to_string(),
                });
            }
            Ok(host)
        }
    }

    /// 使用无头浏览器抓取
    pub struct UseBrowser;
    impl EnvVar<bool> for UseBrowser {
        const NAME: &'static str = "WATTPAD_USE_BROWSER";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str =
            "Fetch pages through headless Chrome (requires the `headless` feature)";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 标记段落的最小长度
    pub struct MinParagraphChars;
    impl EnvVar<usize> for MinParagraphChars {
        const NAME: &'static str = "WATTPAD_MIN_PARAGRAPH_CHARS";
        const DEFAULT: Option<usize> = Some(5);
        const DESCRIPTION: &'static str = "Length floor for story-marker paragraphs";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 0, 1000)
        }
    }

    /// 内容容器段落的最小长度
    pub struct MinContainerChars;
    impl EnvVar<usize> for MinContainerChars {
        const NAME: &'static str = "WATTPAD_MIN_CONTAINER_CHARS";
        const DEFAULT: Option<usize> = Some(20);
        const DESCRIPTION: &'static str = "Length floor for paragraphs inside content containers";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 0, 1000)
        }
    }

    /// 全页段落的最小长度
    pub struct MinPageChars;
    impl EnvVar<usize> for MinPageChars {
        const NAME: &'static str = "WATTPAD_MIN_PAGE_CHARS";
        const DEFAULT: Option<usize> = Some(30);
        const DESCRIPTION: &'static str = "Length floor for page-wide paragraph scan";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 0, 1000)
        }
    }

    /// 样板段落关键字
    pub struct BoilerplateKeywords;
    impl EnvVar<Vec<String>> for BoilerplateKeywords {
        const NAME: &'static str = "WATTPAD_BOILERPLATE_KEYWORDS";
        const DEFAULT: Option<Vec<String>> = None;

        fn get() -> EnvResult<Vec<String>> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::extraction::DEFAULT_BOILERPLATE_KEYWORDS
                    .iter()
                    .map(|s| s.to_string())
                    .collect()),
            }
        }
        const DESCRIPTION: &'static str =
            "Comma-separated keywords that disqualify a paragraph in the page-wide scan";

        fn parse(value: &str) -> EnvResult<Vec<String>> {
            Ok(value
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect())
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "BIND_ADDRESS";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("0.0.0.0".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Web server bind address";

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "PORT";
        const DEFAULT: Option<u16> = Some(5000);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            let port: u16 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (1-65535)".to_string(),
            })?;

            if port == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Port cannot be 0".to_string(),
                });
            }

            Ok(port)
        }
    }
}

/// 辅助函数
fn parse_bool(value: &str, var_name: &str) -> EnvResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: format!(
                "Invalid boolean value '{}'. Use: true/false, 1/0, yes/no, on/off, enabled/disabled",
                value
            ),
        }),
    }
}

fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

fn parse_seconds(value: &str, var_name: &str, max: u64) -> EnvResult<Duration> {
    let seconds: u64 = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid number of seconds".to_string(),
    })?;

    if seconds == 0 {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Timeout must be greater than 0".to_string(),
        });
    }

    if seconds > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Timeout too long (max {} seconds)", max),
        });
    }

    Ok(Duration::from_secs(seconds))
}

fn parse_millis(value: &str, var_name: &str) -> EnvResult<Duration> {
    let millis: u64 = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid number of milliseconds".to_string(),
    })?;

    if millis > 60_000 {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Delay too long (max 60000 ms)".to_string(),
        });
    }

    Ok(Duration::from_millis(millis))
}

/// 加载 .env 文件
///
/// `.env.local` 优先，其次 `.env`；已存在的进程环境变量不会被覆盖。
pub fn load_dotenv() {
    let env_files = [".env.local", ".env"];

    for env_file in &env_files {
        if Path::new(env_file).exists() {
            match dotenv::from_filename(env_file) {
                Ok(_) => {
                    tracing::info!("已加载环境变量文件: {}", env_file);
                    return;
                }
                Err(e) => {
                    tracing::warn!("无法加载环境变量文件 {}: {}", env_file, e);
                }
            }
        }
    }

    tracing::debug!("未找到 .env 文件，仅使用进程环境变量");
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub log_level: String,

    // 翻译配置
    pub api_keys: Vec<String>,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub request_timeout: Duration,
    pub chunk_size: usize,
    pub retries_per_key: usize,
    pub retry_delay: Duration,
    pub chunk_delay: Duration,

    // 提取配置
    pub fetch_timeout: Duration,
    pub validate_host: bool,
    pub expected_host: String,
    pub use_browser: bool,
    pub min_paragraph_chars: usize,
    pub min_container_chars: usize,
    pub min_page_chars: usize,
    pub boilerplate_keywords: Vec<String>,

    // Web配置
    pub bind_address: String,
    pub port: u16,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,

            api_keys: translation::ApiKeys::get()?,
            api_url: translation::ApiUrl::get()?,
            model: translation::Model::get()?,
            temperature: translation::Temperature::get()?,
            request_timeout: translation::Timeout::get()?,
            chunk_size: translation::ChunkSize::get()?,
            retries_per_key: translation::RetriesPerKey::get()?,
            retry_delay: translation::RetryDelay::get()?,
            chunk_delay: translation::ChunkDelay::get()?,

            fetch_timeout: extraction::FetchTimeout::get()?,
            validate_host: extraction::ValidateHost::get()?,
            expected_host: extraction::ExpectedHost::get()?,
            use_browser: extraction::UseBrowser::get()?,
            min_paragraph_chars: extraction::MinParagraphChars::get()?,
            min_container_chars: extraction::MinContainerChars::get()?,
            min_page_chars: extraction::MinPageChars::get()?,
            boilerplate_keywords: extraction::BoilerplateKeywords::get()?,

            bind_address: web::BindAddress::get()?,
            port: web::Port::get()?,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.api_keys.is_empty() {
            return Err(EnvError {
                variable: "GROQ_API_KEY_1".to_string(),
                message: "At least one API key must be configured".to_string(),
            });
        }

        if self.use_browser && !cfg!(feature = "headless") {
            return Err(EnvError {
                variable: extraction::UseBrowser::NAME.to_string(),
                message: "Browser fetching requires building with the `headless` feature"
                    .to_string(),
            });
        }

        Ok(())
    }

    /// 记录配置摘要（隐藏敏感信息）
    pub fn log_summary(&self) {
        tracing::info!("API 密钥数量: {}", self.api_keys.len());
        tracing::info!("模型: {} (temperature {})", self.model, self.temperature);
        tracing::info!(
            "分块: {} 字符, 每个密钥重试 {} 次",
            self.chunk_size,
            self.retries_per_key
        );
        if self.validate_host {
            tracing::info!("来源域名校验: {}", self.expected_host);
        } else {
            tracing::info!("来源域名校验: 关闭");
        }
        tracing::info!(
            "抓取方式: {}",
            if self.use_browser { "headless browser" } else { "http" }
        );
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();

    docs.push_str("ENVIRONMENT:\n");
    let entries: [(&str, &str); 20] = [
        (core::LogLevel::NAME, core::LogLevel::DESCRIPTION),
        ("GROQ_API_KEY_1..9", translation::ApiKeys::DESCRIPTION),
        (translation::ApiUrl::NAME, translation::ApiUrl::DESCRIPTION),
        (translation::Model::NAME, translation::Model::DESCRIPTION),
        (translation::Temperature::NAME, translation::Temperature::DESCRIPTION),
        (translation::Timeout::NAME, translation::Timeout::DESCRIPTION),
        (translation::ChunkSize::NAME, translation::ChunkSize::DESCRIPTION),
        (translation::RetriesPerKey::NAME, translation::RetriesPerKey::DESCRIPTION),
        (translation::RetryDelay::NAME, translation::RetryDelay::DESCRIPTION),
        (translation::ChunkDelay::NAME, translation::ChunkDelay::DESCRIPTION),
        (extraction::FetchTimeout::NAME, extraction::FetchTimeout::DESCRIPTION),
        (extraction::ValidateHost::NAME, extraction::ValidateHost::DESCRIPTION),
        (extraction::ExpectedHost::NAME, extraction::ExpectedHost::DESCRIPTION),
        (extraction::UseBrowser::NAME, extraction::UseBrowser::DESCRIPTION),
        (extraction::MinParagraphChars::NAME, extraction::MinParagraphChars::DESCRIPTION),
        (extraction::MinContainerChars::NAME, extraction::MinContainerChars::DESCRIPTION),
        (extraction::MinPageChars::NAME, extraction::MinPageChars::DESCRIPTION),
        (extraction::BoilerplateKeywords::NAME, extraction::BoilerplateKeywords::DESCRIPTION),
        (web::BindAddress::NAME, web::BindAddress::DESCRIPTION),
        (web::Port::NAME, web::Port::DESCRIPTION),
    ];

    for (name, description) in entries {
        docs.push_str(&format!("    {:<30} {}\n", name, description));
    }

    docs
}
