use std::env;

use anyhow::Context;
use rbatis::RBatis;
use rbdc_mysql::MysqlDriver;

/// 初始化数据库连接，返回句柄由调用方注入各层
pub async fn init_db() -> anyhow::Result<RBatis> {
    let db_host = env::var("DB_HOST").context("DB_HOST config is none")?;
    let rb = RBatis::new();
    rb.link(MysqlDriver {}, &db_host).await?;
    // 这里建议按需调整数据库的最大连接数
    rb.get_pool()?.set_max_open_conns(50).await;
    Ok(rb)
}
