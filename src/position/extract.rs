use std::collections::BTreeMap;

use crate::error::AppError;
use crate::position::cffex::position_document::DataTag;

/// 披露数据类别，对应data标签的Value属性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeKind {
    /// 成交量
    Traded,
    /// 持买单量
    Long,
    /// 持卖单量
    Short,
}

impl VolumeKind {
    pub fn from_value(value: &str) -> Result<Self, AppError> {
        match value.trim() {
            "0" => Ok(VolumeKind::Traded),
            "1" => Ok(VolumeKind::Long),
            "2" => Ok(VolumeKind::Short),
            other => Err(AppError::Parse(format!(
                "未知的data标签Value属性: {:?}",
                other
            ))),
        }
    }
}

/// 单类量值：数量、较上交易日增减、榜单名次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measure {
    pub volume: i64,
    pub delta: Option<i64>,
    pub rank: Option<i32>,
}

/// 一家期货公司在某合约上的三类量值，未披露的槽位保持None。
/// None与0含义不同：单边披露的公司另一边是None，净持仓推导依赖这一区分
#[derive(Debug, Clone, Default)]
pub struct BrokerVolumes {
    pub traded: Option<Measure>,
    pub long: Option<Measure>,
    pub short: Option<Measure>,
}

/// 合约 -> 公司简称 -> 三类量值
pub type ContractPositions = BTreeMap<String, BTreeMap<String, BrokerVolumes>>;

fn parse_required(text: &str, field: &str) -> Result<i64, AppError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| AppError::Format(format!("{}字段不是合法整数: {:?}", field, text)))
}

/// 可缺失的数值字段：标签缺失或为空白视为未披露，其余必须是整数
fn parse_optional(text: Option<&str>, field: &str) -> Result<Option<i64>, AppError> {
    match text {
        None => Ok(None),
        Some(t) if t.trim().is_empty() => Ok(None),
        Some(t) => parse_required(t, field).map(Some),
    }
}

/// 将披露记录归集为按(合约, 公司)定位的量值表。
/// 同一键重复出现时后写覆盖先写，槽位按类别分别落位
pub fn extract_records(tags: &[DataTag]) -> Result<ContractPositions, AppError> {
    let mut positions = ContractPositions::new();
    for tag in tags {
        let kind = VolumeKind::from_value(&tag.value)?;
        let measure = Measure {
            volume: parse_required(&tag.volume, "volume")?,
            delta: parse_optional(tag.var_volume.as_deref(), "varvolume")?,
            rank: parse_optional(tag.rank.as_deref(), "rank")?
                .map(|r| r as i32),
        };

        let broker = positions
            .entry(tag.instrument_id.clone())
            .or_default()
            .entry(tag.short_name.clone())
            .or_default();
        match kind {
            VolumeKind::Traded => broker.traded = Some(measure),
            VolumeKind::Long => broker.long = Some(measure),
            VolumeKind::Short => broker.short = Some(measure),
        }
    }
    Ok(positions)
}

/// 从合约代码取品种前缀，如 TS1812 -> TS
pub fn underlying_of(instrument_id: &str) -> &str {
    let end = instrument_id
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(instrument_id.len());
    &instrument_id[..end]
}
