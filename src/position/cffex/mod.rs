pub mod cffex_client;
pub mod position_document;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::AppError;
use crate::position::cffex::cffex_client::CffexClient;
use crate::time_util;

/// 中金所持仓排名数据接口
pub struct CffexApi {
    client: CffexClient,
}

impl CffexApi {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(CffexApi {
            client: CffexClient::from_env()?,
        })
    }

    /// 按日期与合约代码拉取当日持仓排名xml文档
    /// 路径形如 /{yyyymm}/{dd}/{contract}.xml，contract可以是品种（如TS）或单个合约
    pub async fn get_position_document(
        &self,
        date: NaiveDate,
        contract: &str,
    ) -> Result<String, AppError> {
        let (ym, d) = time_util::split_year_month_day(date);
        let path = format!("/{}/{}/{}.xml", ym, d, contract);
        debug!("path: {:#?}", path);
        self.client.get_text(&path).await
    }
}
