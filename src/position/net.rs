use std::collections::BTreeMap;
use std::fmt;

use crate::position::extract::{underlying_of, BrokerVolumes, ContractPositions, VolumeKind};

/// 净持仓：买单为正，卖单为负
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetPosition {
    pub net: i64,
    pub net_delta: Option<i64>,
}

/// 由买卖双边量值推导净持仓。
/// 中金所只公布前二十名，无双边数据的公司按单边计算；双边都缺失时不产生净持仓。
/// 任一边增减缺失时净持仓增减同样缺失
pub fn derive_net(volumes: &BrokerVolumes) -> Option<NetPosition> {
    match (&volumes.long, &volumes.short) {
        (None, None) => None,
        (Some(long), None) => Some(NetPosition {
            net: long.volume,
            net_delta: long.delta,
        }),
        (None, Some(short)) => Some(NetPosition {
            net: -short.volume,
            net_delta: short.delta.map(|d| -d),
        }),
        (Some(long), Some(short)) => Some(NetPosition {
            net: long.volume - short.volume,
            net_delta: match (long.delta, short.delta) {
                (Some(l), Some(s)) => Some(l - s),
                _ => None,
            },
        }),
    }
}

/// 多空方向分组
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSide {
    /// 仅有买单持仓
    Long,
    /// 买卖双边都有
    Net,
    /// 仅有卖单持仓
    Short,
}

impl PositionSide {
    /// 分组排序权重：买1、净0、卖-1，降序排列后买单组在前、卖单组垫底
    pub fn group_rank(&self) -> i32 {
        match self {
            PositionSide::Long => 1,
            PositionSide::Net => 0,
            PositionSide::Short => -1,
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PositionSide::Long => "买",
            PositionSide::Net => "净",
            PositionSide::Short => "卖",
        };
        write!(f, "{}", label)
    }
}

/// 跨月份合并后的单家公司净持仓
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegratedNet {
    pub short_name: String,
    pub net: i64,
    pub side: PositionSide,
}

/// 分月份的单家公司净持仓
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractNet {
    pub instrument_id: String,
    pub short_name: String,
    pub net: i64,
}

/// 将某品种不同合约月份的某类持仓加总，无视月份区别
pub fn integrated_volume(
    positions: &ContractPositions,
    underlying: &str,
    kind: VolumeKind,
) -> BTreeMap<String, i64> {
    let mut integrated = BTreeMap::new();
    for (instrument_id, brokers) in positions {
        if underlying_of(instrument_id) != underlying {
            continue;
        }
        for (short_name, volumes) in brokers {
            let measure = match kind {
                VolumeKind::Traded => &volumes.traded,
                VolumeKind::Long => &volumes.long,
                VolumeKind::Short => &volumes.short,
            };
            if let Some(m) = measure {
                *integrated.entry(short_name.clone()).or_insert(0) += m.volume;
            }
        }
    }
    integrated
}

/// 模式0：跨月份合并计算各公司净持仓。
/// 双边都有的公司按买减卖计净，单边公司按单边计，
/// 输出按(方向分组权重降序, 净持仓降序)排列
pub fn integrated_net_position(
    positions: &ContractPositions,
    underlying: &str,
) -> Vec<IntegratedNet> {
    let long = integrated_volume(positions, underlying, VolumeKind::Long);
    let short = integrated_volume(positions, underlying, VolumeKind::Short);

    let mut net = Vec::new();
    for (short_name, long_volume) in &long {
        match short.get(short_name) {
            Some(short_volume) => net.push(IntegratedNet {
                short_name: short_name.clone(),
                net: long_volume - short_volume,
                side: PositionSide::Net,
            }),
            None => net.push(IntegratedNet {
                short_name: short_name.clone(),
                net: *long_volume,
                side: PositionSide::Long,
            }),
        }
    }
    for (short_name, short_volume) in &short {
        if !long.contains_key(short_name) {
            net.push(IntegratedNet {
                short_name: short_name.clone(),
                net: -short_volume,
                side: PositionSide::Short,
            });
        }
    }

    net.sort_by(|a, b| {
        b.side
            .group_rank()
            .cmp(&a.side.group_rank())
            .then_with(|| b.net.cmp(&a.net))
    });
    net
}

/// 模式1：分月份计算，仅保留该月份上同时有买卖双边持仓的公司。
/// 输出按(合约升序, 净持仓降序)排列
pub fn contract_net_position(positions: &ContractPositions) -> Vec<ContractNet> {
    let mut out = Vec::new();
    // BTreeMap遍历即合约升序
    for (instrument_id, brokers) in positions {
        let mut rows = Vec::new();
        for (short_name, volumes) in brokers {
            if let (Some(long), Some(short)) = (&volumes.long, &volumes.short) {
                rows.push(ContractNet {
                    instrument_id: instrument_id.clone(),
                    short_name: short_name.clone(),
                    net: long.volume - short.volume,
                });
            }
        }
        rows.sort_by(|a, b| b.net.cmp(&a.net));
        out.extend(rows);
    }
    out
}
