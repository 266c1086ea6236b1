use serde::{Deserialize, Serialize};

/// 入库后回读的净持仓记录，按(合约升序, 净持仓降序)排列
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NetRecord {
    pub trading_day: String,
    pub short_name: String,
    pub instrument_id: String,
    pub net_volume: i64,
}

/// 待写回的名次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankUpdate {
    pub net_rank: i32,
    pub trading_day: String,
    pub short_name: String,
    pub instrument_id: String,
}

/// 排名阶段的结果。当日无净持仓记录（非交易日或未披露）不是错误，
/// 用独立的NoData档位与数据库错误区分开
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankOutcome {
    Ranked(usize),
    NoData,
}

/// 按合约分别编排名次：同一合约内从1起连续计数，合约切换时归零重排。
/// 输入须已按(合约升序, 净持仓降序)排列，名次即净持仓降序的密集序号
pub fn assign_ranks(records: &[NetRecord]) -> Vec<RankUpdate> {
    let mut updates = Vec::with_capacity(records.len());
    let mut current_instrument: Option<&str> = None;
    let mut counter = 0;
    for record in records {
        if current_instrument != Some(record.instrument_id.as_str()) {
            current_instrument = Some(record.instrument_id.as_str());
            counter = 0;
        }
        counter += 1;
        updates.push(RankUpdate {
            net_rank: counter,
            trading_day: record.trading_day.clone(),
            short_name: record.short_name.clone(),
            instrument_id: record.instrument_id.clone(),
        });
    }
    updates
}
