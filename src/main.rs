use anyhow::anyhow;
use clap::Parser;
use dotenv::dotenv;

use cffex_position::app_config::db::init_db;
use cffex_position::app_config::log::setup_logging;
use cffex_position::position::task;
use cffex_position::time_util;

/// 中金所国债期货会员持仓数据抓取与净持仓排名
#[derive(Parser, Debug)]
struct Args {
    /// 开始日期，格式yyyymmdd
    #[arg(long)]
    start: String,

    /// 结束日期，格式yyyymmdd，缺省为开始日期
    #[arg(long)]
    end: Option<String>,

    /// 品种列表，逗号分隔
    #[arg(long, value_delimiter = ',', default_value = "T,TF,TS")]
    underlyings: Vec<String>,

    /// 仅查看净持仓不入库：0合并月份，1分月份
    #[arg(long)]
    mode: Option<u8>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 设置日志
    setup_logging().await?;

    let args = Args::parse();
    let start = time_util::parse_day(&args.start)?;
    let end = match &args.end {
        Some(e) => time_util::parse_day(e)?,
        None => start,
    };
    if end < start {
        return Err(anyhow!("结束日期早于开始日期"));
    }

    // 查看模式：抓取并打印开始日期的净持仓，不涉及数据库
    if let Some(mode) = args.mode {
        for underlying in &args.underlyings {
            println!();
            task::run_net_position_query(start, underlying, mode).await?;
        }
        return Ok(());
    }

    let db = init_db().await?;
    task::run_position_sync_job(&db, start, end, &args.underlyings).await?;
    Ok(())
}
