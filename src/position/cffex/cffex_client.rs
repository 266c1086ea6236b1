use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::app_config::env::env_or_default;
use crate::error::AppError;

/// 中金所数据站点的默认地址，持仓排名文件挂在 /sj/ccpm 下
const DEFAULT_BASE_URL: &str = "http://www.cffex.com.cn/sj/ccpm";

pub struct CffexClient {
    client: Client,
    base_url: String,
}

impl CffexClient {
    pub fn from_env() -> Result<Self, AppError> {
        let base_url = env_or_default("CFFEX_BASE_URL", DEFAULT_BASE_URL);
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(CffexClient { client, base_url })
    }

    /// 读取目标路径的响应正文，非2xx视为网络错误
    pub async fn get_text(&self, path: &str) -> Result<String, AppError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;

        let status_code = response.status();
        let response_body = response.text().await?;
        debug!("url:{}, status:{}", url, status_code);

        if status_code == StatusCode::OK {
            Ok(response_body)
        } else {
            Err(AppError::Network(format!(
                "请求失败: {} {}",
                status_code, url
            )))
        }
    }
}
