use rbatis::rbdc::db::ExecResult;
use rbatis::{crud, impl_select, RBatis};
use rbs::Value;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::position::rank::{NetRecord, RankUpdate};

/// 与 `broker_position` 表对应的实体结构，主键(trading_day, short_name, instrument_id)。
/// 三类量值与净持仓列均可为NULL：未披露的槽位入库为NULL而不是0
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct BrokerPositionEntity {
    // 交易日，yyyymmdd
    pub trading_day: String,
    // 期货公司会员简称
    pub short_name: String,
    // 合约代码
    pub instrument_id: String,
    // 成交量及其增减、名次
    pub traded_volume: Option<i64>,
    pub traded_change: Option<i64>,
    pub traded_rank: Option<i32>,
    // 持买单量及其增减、名次
    pub long_volume: Option<i64>,
    pub long_change: Option<i64>,
    pub long_rank: Option<i32>,
    // 持卖单量及其增减、名次
    pub short_volume: Option<i64>,
    pub short_change: Option<i64>,
    pub short_rank: Option<i32>,
    // 净持仓（买-卖）及其增减，入库时计算
    pub net_volume: Option<i64>,
    pub net_change: Option<i64>,
    // 净持仓名次，入库后按合约分别回写
    pub net_rank: Option<i32>,
}

crud!(BrokerPositionEntity {}, "broker_position");

impl_select!(BrokerPositionEntity{select_by_day(trading_day: &str) => "`where trading_day = #{trading_day} order by instrument_id, short_name`"},"broker_position");

pub struct BrokerPositionModel {
    db: RBatis,
}

impl BrokerPositionModel {
    /// 存储句柄由外部注入，model不持有全局状态
    pub fn new(db: &RBatis) -> Self {
        Self { db: db.clone() }
    }

    pub async fn create_table(&self) -> Result<ExecResult, AppError> {
        let create_table_sql = "CREATE TABLE IF NOT EXISTS `broker_position` (
            `trading_day` varchar(8) NOT NULL COMMENT '交易日，yyyymmdd',
            `short_name` varchar(64) NOT NULL COMMENT '期货公司会员简称',
            `instrument_id` varchar(16) NOT NULL COMMENT '合约代码',
            `traded_volume` bigint DEFAULT NULL COMMENT '成交量',
            `traded_change` bigint DEFAULT NULL COMMENT '成交量较上交易日增减',
            `traded_rank` int DEFAULT NULL COMMENT '成交量名次',
            `long_volume` bigint DEFAULT NULL COMMENT '持买单量',
            `long_change` bigint DEFAULT NULL COMMENT '持买单量较上交易日增减',
            `long_rank` int DEFAULT NULL COMMENT '持买单量名次',
            `short_volume` bigint DEFAULT NULL COMMENT '持卖单量',
            `short_change` bigint DEFAULT NULL COMMENT '持卖单量较上交易日增减',
            `short_rank` int DEFAULT NULL COMMENT '持卖单量名次',
            `net_volume` bigint DEFAULT NULL COMMENT '净持仓，买单-卖单',
            `net_change` bigint DEFAULT NULL COMMENT '净持仓较上交易日增减',
            `net_rank` int DEFAULT NULL COMMENT '净持仓名次，按合约分别排名',
            `created_at` datetime DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (`trading_day`, `short_name`, `instrument_id`)
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_0900_ai_ci;";
        let res = self.db.exec(create_table_sql, vec![]).await?;
        Ok(res)
    }

    /// 批量插入一个抓取单元的全部记录，主键冲突以AppError::Constraint返回
    pub async fn add_list(&self, list: &[BrokerPositionEntity]) -> Result<u64, AppError> {
        if list.is_empty() {
            return Ok(0);
        }
        let res = BrokerPositionEntity::insert_batch(&self.db, list, list.len() as u64).await?;
        debug!("insert_batch = {}", json!(res));
        Ok(res.rows_affected)
    }

    /// 回读当日全部有净持仓的记录，排名阶段的输入。
    /// 排序(合约升序, 净持仓降序)即名次编排所需的顺序
    pub async fn select_net_records(&self, trading_day: &str) -> Result<Vec<NetRecord>, AppError> {
        let query = "select trading_day, short_name, instrument_id, net_volume \
             from broker_position \
             where trading_day = ? and net_volume is not null \
             order by instrument_id asc, net_volume desc";
        debug!("query: {}", query);
        let records: Vec<NetRecord> = self
            .db
            .query_decode(query, vec![Value::String(trading_day.to_string())])
            .await?;
        Ok(records)
    }

    /// 回写净持仓名次，逐条按主键更新
    pub async fn update_ranks(&self, updates: &[RankUpdate]) -> Result<u64, AppError> {
        let mut affected = 0u64;
        for update in updates {
            let res = self
                .db
                .exec(
                    "update broker_position set net_rank = ? \
                     where trading_day = ? and short_name = ? and instrument_id = ?",
                    vec![
                        Value::I32(update.net_rank),
                        Value::String(update.trading_day.clone()),
                        Value::String(update.short_name.clone()),
                        Value::String(update.instrument_id.clone()),
                    ],
                )
                .await?;
            affected += res.rows_affected;
        }
        Ok(affected)
    }
}
