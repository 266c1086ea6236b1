use cffex_position::error::AppError;
use cffex_position::position::cffex::position_document::DataTag;
use cffex_position::position::extract::{extract_records, underlying_of, VolumeKind};

fn tag(value: &str, instrument_id: &str, short_name: &str, volume: &str, var_volume: Option<&str>, rank: Option<&str>) -> DataTag {
    DataTag {
        value: value.to_string(),
        instrument_id: instrument_id.to_string(),
        trading_day: Some("20180817".to_string()),
        short_name: short_name.to_string(),
        volume: volume.to_string(),
        var_volume: var_volume.map(|s| s.to_string()),
        rank: rank.map(|s| s.to_string()),
        party_id: None,
    }
}

#[test]
fn test_extract_slots_by_kind() {
    let tags = vec![
        tag("0", "TS1812", "甲期货", "1200", Some("35"), Some("1")),
        tag("1", "TS1812", "甲期货", "300", Some("-5"), Some("2")),
        tag("2", "TS1812", "甲期货", "210", Some("10"), Some("3")),
    ];
    let positions = extract_records(&tags).unwrap();
    let broker = &positions["TS1812"]["甲期货"];

    let traded = broker.traded.as_ref().unwrap();
    assert_eq!(traded.volume, 1200);
    assert_eq!(traded.delta, Some(35));
    assert_eq!(traded.rank, Some(1));

    assert_eq!(broker.long.as_ref().unwrap().volume, 300);
    assert_eq!(broker.long.as_ref().unwrap().delta, Some(-5));
    assert_eq!(broker.short.as_ref().unwrap().volume, 210);
}

#[test]
fn test_unreported_slot_is_absent_not_zero() {
    // 只披露了买单，成交量与卖单槽位必须是None而不是0
    let tags = vec![tag("1", "T1903", "乙期货", "50", Some("0"), Some("8"))];
    let positions = extract_records(&tags).unwrap();
    let broker = &positions["T1903"]["乙期货"];

    assert!(broker.traded.is_none());
    assert!(broker.short.is_none());
    let long = broker.long.as_ref().unwrap();
    assert_eq!(long.volume, 50);
    // 增减为0是有效披露值，与缺失不同
    assert_eq!(long.delta, Some(0));
}

#[test]
fn test_missing_or_blank_optional_fields() {
    let tags = vec![
        tag("1", "T1903", "乙期货", "50", None, None),
        tag("2", "T1903", "丙期货", "20", Some("  "), Some("")),
    ];
    let positions = extract_records(&tags).unwrap();
    assert_eq!(positions["T1903"]["乙期货"].long.as_ref().unwrap().delta, None);
    assert_eq!(positions["T1903"]["乙期货"].long.as_ref().unwrap().rank, None);
    assert_eq!(positions["T1903"]["丙期货"].short.as_ref().unwrap().delta, None);
    assert_eq!(positions["T1903"]["丙期货"].short.as_ref().unwrap().rank, None);
}

#[test]
fn test_malformed_volume_is_format_error() {
    let tags = vec![tag("1", "T1903", "乙期货", "五十", None, None)];
    let err = extract_records(&tags).unwrap_err();
    assert!(matches!(err, AppError::Format(_)), "unexpected: {:?}", err);

    // 可缺失字段一旦出现也必须是整数
    let tags = vec![tag("1", "T1903", "乙期货", "50", Some("n/a"), None)];
    let err = extract_records(&tags).unwrap_err();
    assert!(matches!(err, AppError::Format(_)), "unexpected: {:?}", err);
}

#[test]
fn test_unknown_kind_is_parse_error() {
    let tags = vec![tag("7", "T1903", "乙期货", "50", None, None)];
    let err = extract_records(&tags).unwrap_err();
    assert!(matches!(err, AppError::Parse(_)), "unexpected: {:?}", err);
}

#[test]
fn test_volume_kind_from_value() {
    assert_eq!(VolumeKind::from_value("0").unwrap(), VolumeKind::Traded);
    assert_eq!(VolumeKind::from_value("1").unwrap(), VolumeKind::Long);
    assert_eq!(VolumeKind::from_value("2").unwrap(), VolumeKind::Short);
    assert!(VolumeKind::from_value("x").is_err());
}

#[test]
fn test_underlying_of_prefix() {
    assert_eq!(underlying_of("TS1812"), "TS");
    assert_eq!(underlying_of("TF1812"), "TF");
    assert_eq!(underlying_of("T1903"), "T");
    assert_eq!(underlying_of("IF2001"), "IF");
}
