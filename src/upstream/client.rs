use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// 上游 JSON 拉取能力: fetch(url) -> JSON
///
/// 重试/退避由实现方负责, 核心流水线不做重试.
#[async_trait::async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Value, UpstreamError>;
}

/// BigCommerce v2 客户端 (X-Auth-Token 认证)
///
/// token 由配置传入, 不要打印.
#[derive(Debug, Clone)]
pub struct BigCommerceClient {
    http: reqwest::Client,
}

impl BigCommerceClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut token = HeaderValue::from_str(&config.api_token)
            .map_err(|e| UpstreamError::Config(format!("api token is not a valid header value: {e}")))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("x-auth-token"), token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl JsonFetcher for BigCommerceClient {
    async fn fetch(&self, url: &str) -> Result<Value, UpstreamError> {
        let resp = self.http.get(url).send().await.map_err(|e| UpstreamError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = resp.status();
        // 列表接口无数据时返回 204 且 body 为空
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Array(Vec::new()));
        }
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|e| UpstreamError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// 将 JSON 数组解码为记录列表
pub fn decode_records<T: DeserializeOwned>(url: &str, value: Value) -> Result<Vec<T>, UpstreamError> {
    serde_json::from_value(value).map_err(|e| UpstreamError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(token: &str) -> BigCommerceClient {
        let mut config = AppConfig::default().upstream;
        config.api_token = token.to_string();
        config.timeout_secs = 5;
        BigCommerceClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn sends_auth_token_and_returns_json() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/stores/abc/v2/orders/7/products")
                    .header("x-auth-token", "secret-token")
                    .header("accept", "application/json");
                then.status(200)
                    .json_body(json!([{ "sku": "X", "brand": "Acme", "name": "Widget", "quantity": 2 }]));
            })
            .await;

        let value = client("secret-token")
            .fetch(&server.url("/stores/abc/v2/orders/7/products"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(value[0]["sku"], "X");
    }

    #[tokio::test]
    async fn no_content_is_an_empty_page() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/stores/abc/v2/orders");
                then.status(204);
            })
            .await;

        let value = client("t").fetch(&server.url("/stores/abc/v2/orders")).await.unwrap();
        assert_eq!(value, json!([]));
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/stores/abc/v2/orders");
                then.status(401).body("unauthorized");
            })
            .await;

        let err = client("bad").fetch(&server.url("/stores/abc/v2/orders")).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/broken");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let err = client("t").fetch(&server.url("/broken")).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Decode { .. }));
    }

    #[test]
    fn token_with_newline_is_a_config_error() {
        let mut config = AppConfig::default().upstream;
        config.api_token = "bad\ntoken".to_string();
        assert!(matches!(
            BigCommerceClient::new(&config),
            Err(UpstreamError::Config(_))
        ));
    }
}
