use serde::Deserialize;

use crate::error::AppError;

/// 持仓排名披露文档，根节点positionRank，非交易日文档不存在或不含data标签
#[derive(Deserialize, Debug)]
pub struct PositionDocument {
    #[serde(rename = "data", default)]
    pub entries: Vec<DataTag>,
}

/// 单条披露记录。Value属性区分数据类别：0成交量、1持买单量、2持卖单量。
/// 数值字段保留原文，由提取层解析，避免反序列化时悄悄吞掉坏数据
#[derive(Deserialize, Debug, Clone)]
pub struct DataTag {
    #[serde(rename = "@Value", alias = "@value")]
    pub value: String,
    #[serde(rename = "instrumentid")]
    pub instrument_id: String,
    #[serde(rename = "tradingday", default)]
    pub trading_day: Option<String>,
    #[serde(rename = "shortname")]
    pub short_name: String,
    #[serde(rename = "volume")]
    pub volume: String,
    /// 较上交易日增减，合约上市首日可能缺失
    #[serde(rename = "varvolume", default)]
    pub var_volume: Option<String>,
    /// 披露榜单内的名次
    #[serde(rename = "rank", default)]
    pub rank: Option<String>,
    #[serde(rename = "partyid", default)]
    pub party_id: Option<String>,
}

/// 解析披露文档
pub fn parse_position_document(xml: &str) -> Result<PositionDocument, AppError> {
    let document: PositionDocument = quick_xml::de::from_str(xml)?;
    Ok(document)
}
