use thiserror::Error;

/// 应用错误
#[derive(Error, Debug)]
pub enum AppError {
    /// 网络错误：目标不可达、请求超时或非2xx响应
    #[error("网络错误: {0}")]
    Network(String),

    /// 解析错误：披露文档结构异常
    #[error("解析错误: {0}")]
    Parse(String),

    /// 格式错误：数值字段无法解析为整数
    #[error("数据格式错误: {0}")]
    Format(String),

    /// 主键冲突：该交易日该合约数据已入库
    #[error("主键冲突: {0}")]
    Constraint(String),

    /// 其他数据库错误
    #[error("数据库错误: {0}")]
    Db(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<quick_xml::DeError> for AppError {
    fn from(err: quick_xml::DeError) -> Self {
        AppError::Parse(err.to_string())
    }
}

/// 数据库错误归类：主键冲突需要单独识别，重复抓取同一交易日时跳过而不中断批次
impl From<rbatis::rbdc::Error> for AppError {
    fn from(err: rbatis::rbdc::Error) -> Self {
        let msg = err.to_string();
        if msg.contains("Duplicate entry") || msg.contains("1062") {
            AppError::Constraint(msg)
        } else {
            AppError::Db(msg)
        }
    }
}
