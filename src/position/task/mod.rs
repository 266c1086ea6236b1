use anyhow::anyhow;
use chrono::NaiveDate;
use rbatis::RBatis;
use tracing::{error, info, span, Level};

use crate::position::cffex::position_document::parse_position_document;
use crate::position::cffex::CffexApi;
use crate::position::extract::extract_records;
use crate::position::model::broker_position::BrokerPositionModel;
use crate::position::net::{contract_net_position, integrated_net_position};
use crate::position::services::position_sync_service::PositionSyncService;
use crate::time_util;

/// 建表，幂等
pub async fn init_create_table(db: &RBatis) -> anyhow::Result<()> {
    BrokerPositionModel::new(db).create_table().await?;
    Ok(())
}

/** 同步持仓数据 任务 **/
pub async fn run_position_sync_job(
    db: &RBatis,
    start: NaiveDate,
    end: NaiveDate,
    underlyings: &[String],
) -> anyhow::Result<()> {
    let span = span!(Level::DEBUG, "run_position_sync_job");
    let _enter = span.enter();

    init_create_table(db).await?;
    let service = PositionSyncService::new(db)?;

    for date in time_util::date_range(start, end) {
        for underlying in underlyings {
            // 单个单元失败只记录日志，不影响其余日期与品种
            match service.sync_one(date, underlying).await {
                Ok(outcome) => {
                    info!(
                        "同步完成 {} {}: {:?}",
                        time_util::format_day(date),
                        underlying,
                        outcome
                    );
                }
                Err(e) => {
                    error!(
                        "同步失败 {} {}: {}",
                        time_util::format_day(date),
                        underlying,
                        e
                    );
                }
            }
        }
    }
    Ok(())
}

/// 查看指定日期与品种的净持仓，不入库。
/// mode 0合并月份计算，mode 1分月份计算且仅含双边持仓的公司
pub async fn run_net_position_query(
    date: NaiveDate,
    underlying: &str,
    mode: u8,
) -> anyhow::Result<()> {
    let api = CffexApi::from_env()?;
    let xml = api.get_position_document(date, underlying).await?;
    let document = parse_position_document(&xml)?;
    let positions = extract_records(&document.entries)?;

    match mode {
        0 => {
            for row in integrated_net_position(&positions, underlying) {
                println!("{}   {}   {}", row.short_name, row.net, row.side);
            }
        }
        1 => {
            for row in contract_net_position(&positions) {
                println!("{}   {}   {}", row.instrument_id, row.short_name, row.net);
            }
        }
        other => return Err(anyhow!("不支持的mode参数: {}", other)),
    }
    Ok(())
}
