use anyhow::anyhow;
use chrono::{Duration, NaiveDate};

/// 解析yyyymmdd格式的日期
pub fn parse_day(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y%m%d")
        .map_err(|e| anyhow!("日期格式错误（应为yyyymmdd）: {} {}", s, e))
}

/// 格式化为yyyymmdd
pub fn format_day(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// 拆分为(yyyymm, dd)，用于拼接披露文件的url路径
pub fn split_year_month_day(date: NaiveDate) -> (String, String) {
    let s = format_day(date);
    (s[0..6].to_string(), s[6..8].to_string())
}

/// 闭区间[start, end]内的全部自然日，start晚于end时为空
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        day = day + Duration::days(1);
    }
    days
}
