use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 上游订单 API 配置
#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub api_base: String,
    pub store_hash: String,
    pub api_token: String,
    /// 订单状态过滤 (2 = 已发货)
    pub status_id: u32,
    /// 每页条数, 上游最大 200
    pub page_size: u32,
    /// 分页上限, 超过视为上游异常
    pub max_pages: u32,
    /// 明细并发上限, 不设置则不限
    #[serde(default)]
    pub concurrency: Option<usize>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_path: String,
}

// token 不进日志
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_base", &self.api_base)
            .field("store_hash", &self.store_hash)
            .field("api_token", &"<redacted>")
            .field("status_id", &self.status_id)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("concurrency", &self.concurrency)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            upstream: UpstreamConfig {
                api_base: "https://api.bigcommerce.com".to_string(),
                store_hash: String::new(),
                api_token: String::new(),
                status_id: 2,
                page_size: 200,
                max_pages: 10_000,
                concurrency: None,
                timeout_secs: 30,
            },
            report: ReportConfig {
                output_path: "SellThroughReport.csv".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> sell-through.toml (可选) -> SELLTHROUGH__* 环境变量
    /// API_HASH / API_TOKEN 覆盖凭据
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("sell-through")
    }

    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        Self::builder(file)?.build()?.try_deserialize()
    }

    fn builder(file: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("upstream.api_base", defaults.upstream.api_base)?
            .set_default("upstream.store_hash", defaults.upstream.store_hash)?
            .set_default("upstream.api_token", defaults.upstream.api_token)?
            .set_default("upstream.status_id", i64::from(defaults.upstream.status_id))?
            .set_default("upstream.page_size", i64::from(defaults.upstream.page_size))?
            .set_default("upstream.max_pages", i64::from(defaults.upstream.max_pages))?
            .set_default("upstream.timeout_secs", defaults.upstream.timeout_secs as i64)?
            .set_default("report.output_path", defaults.report.output_path)?
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("SELLTHROUGH")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("upstream.store_hash", std::env::var("API_HASH").ok())?
            .set_override_option("upstream.api_token", std::env::var("API_TOKEN").ok())
    }
}
