use chrono::NaiveDate;
use rbatis::RBatis;
use tracing::{info, warn};

use crate::error::AppError;
use crate::position::cffex::position_document::parse_position_document;
use crate::position::cffex::CffexApi;
use crate::position::extract::{extract_records, ContractPositions};
use crate::position::model::broker_position::{BrokerPositionEntity, BrokerPositionModel};
use crate::position::net::derive_net;
use crate::position::rank::{assign_ranks, RankOutcome};
use crate::time_util;

/// 单个(交易日, 品种)抓取单元的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// 入库成功，含插入行数与排名阶段结果
    Synced { inserted: u64, ranked: RankOutcome },
    /// 文档存在但不含披露数据，非交易日的正常情况
    NoData,
    /// 主键冲突，当日数据已入库，本单元跳过
    Duplicate,
}

pub struct PositionSyncService {
    db: RBatis,
    api: CffexApi,
}

impl PositionSyncService {
    pub fn new(db: &RBatis) -> Result<Self, AppError> {
        Ok(Self {
            db: db.clone(),
            api: CffexApi::from_env()?,
        })
    }

    /// 单个(交易日, 品种)的完整流程：
    /// 抓取 -> 解析 -> 提取 -> 推导净持仓 -> 入库 -> 回读排名 -> 回写名次。
    /// 净持仓在入库前算好，名次依赖当日全量入库数据、在第二阶段回写
    pub async fn sync_one(
        &self,
        date: NaiveDate,
        underlying: &str,
    ) -> Result<SyncOutcome, AppError> {
        let trading_day = time_util::format_day(date);

        let xml = self.api.get_position_document(date, underlying).await?;
        let document = parse_position_document(&xml)?;
        if document.entries.is_empty() {
            info!("无披露数据: {} {}", trading_day, underlying);
            return Ok(SyncOutcome::NoData);
        }

        let positions = extract_records(&document.entries)?;
        let entities = Self::build_entities(&trading_day, &positions);
        if entities.is_empty() {
            return Ok(SyncOutcome::NoData);
        }

        let model = BrokerPositionModel::new(&self.db);
        let inserted = match model.add_list(&entities).await {
            Ok(n) => n,
            Err(AppError::Constraint(msg)) => {
                // 重复抓取同一交易日，保留已有数据、不自动重试
                warn!("当日数据已存在，跳过: {} {} {}", trading_day, underlying, msg);
                return Ok(SyncOutcome::Duplicate);
            }
            Err(e) => return Err(e),
        };

        let ranked = self.rank_day(&trading_day).await?;
        Ok(SyncOutcome::Synced { inserted, ranked })
    }

    /// 排名阶段：回读当日净持仓并按合约回写名次。
    /// 回读为空不是错误，返回NoData档位
    pub async fn rank_day(&self, trading_day: &str) -> Result<RankOutcome, AppError> {
        let model = BrokerPositionModel::new(&self.db);
        let records = model.select_net_records(trading_day).await?;
        if records.is_empty() {
            info!("当日无净持仓记录，跳过排名: {}", trading_day);
            return Ok(RankOutcome::NoData);
        }
        let updates = assign_ranks(&records);
        model.update_ranks(&updates).await?;
        Ok(RankOutcome::Ranked(updates.len()))
    }

    /// 把提取结果组装为入库实体，净持仓与增减随行计算
    fn build_entities(trading_day: &str, positions: &ContractPositions) -> Vec<BrokerPositionEntity> {
        let mut entities = Vec::new();
        for (instrument_id, brokers) in positions {
            for (short_name, volumes) in brokers {
                let net = derive_net(volumes);
                entities.push(BrokerPositionEntity {
                    trading_day: trading_day.to_string(),
                    short_name: short_name.clone(),
                    instrument_id: instrument_id.clone(),
                    traded_volume: volumes.traded.as_ref().map(|m| m.volume),
                    traded_change: volumes.traded.as_ref().and_then(|m| m.delta),
                    traded_rank: volumes.traded.as_ref().and_then(|m| m.rank),
                    long_volume: volumes.long.as_ref().map(|m| m.volume),
                    long_change: volumes.long.as_ref().and_then(|m| m.delta),
                    long_rank: volumes.long.as_ref().and_then(|m| m.rank),
                    short_volume: volumes.short.as_ref().map(|m| m.volume),
                    short_change: volumes.short.as_ref().and_then(|m| m.delta),
                    short_rank: volumes.short.as_ref().and_then(|m| m.rank),
                    net_volume: net.as_ref().map(|n| n.net),
                    net_change: net.as_ref().and_then(|n| n.net_delta),
                    net_rank: None,
                });
            }
        }
        entities
    }
}
