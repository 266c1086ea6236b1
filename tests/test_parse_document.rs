use cffex_position::position::cffex::position_document::parse_position_document;
use cffex_position::position::extract::extract_records;

const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<positionRank>
  <data Value="0" Text="成交量">
    <instrumentid>TS1812</instrumentid>
    <tradingday>20180817</tradingday>
    <rank>1</rank>
    <shortname>甲期货</shortname>
    <volume>1024</volume>
    <varvolume>-12</varvolume>
    <partyid>00001</partyid>
  </data>
  <data Value="1" Text="持买单量">
    <instrumentid>TS1812</instrumentid>
    <tradingday>20180817</tradingday>
    <rank>1</rank>
    <shortname>甲期货</shortname>
    <volume>300</volume>
    <varvolume>25</varvolume>
    <partyid>00001</partyid>
  </data>
  <data Value="2" Text="持卖单量">
    <instrumentid>TS1812</instrumentid>
    <tradingday>20180817</tradingday>
    <rank>3</rank>
    <shortname>乙期货</shortname>
    <volume>180</volume>
    <partyid>00002</partyid>
  </data>
</positionRank>"#;

#[test]
fn test_parse_sample_document() {
    let document = parse_position_document(SAMPLE).unwrap();
    assert_eq!(document.entries.len(), 3);

    let first = &document.entries[0];
    assert_eq!(first.value, "0");
    assert_eq!(first.instrument_id, "TS1812");
    assert_eq!(first.short_name, "甲期货");
    assert_eq!(first.volume, "1024");
    assert_eq!(first.var_volume.as_deref(), Some("-12"));
    assert_eq!(first.trading_day.as_deref(), Some("20180817"));

    // 第三条缺varvolume标签
    assert_eq!(document.entries[2].var_volume, None);
}

#[test]
fn test_parsed_entries_feed_extraction() {
    let document = parse_position_document(SAMPLE).unwrap();
    let positions = extract_records(&document.entries).unwrap();

    let jia = &positions["TS1812"]["甲期货"];
    assert_eq!(jia.traded.as_ref().unwrap().volume, 1024);
    assert_eq!(jia.traded.as_ref().unwrap().delta, Some(-12));
    assert_eq!(jia.long.as_ref().unwrap().volume, 300);
    assert!(jia.short.is_none());

    let yi = &positions["TS1812"]["乙期货"];
    assert!(yi.long.is_none());
    assert_eq!(yi.short.as_ref().unwrap().volume, 180);
    assert_eq!(yi.short.as_ref().unwrap().delta, None);
    assert_eq!(yi.short.as_ref().unwrap().rank, Some(3));
}

#[test]
fn test_document_without_data_tags_is_empty() {
    // 非交易日返回的空文档不是错误
    let xml = r#"<?xml version="1.0" encoding="utf-8"?><positionRank></positionRank>"#;
    let document = parse_position_document(xml).unwrap();
    assert!(document.entries.is_empty());
}

#[test]
fn test_malformed_markup_is_parse_error() {
    let xml = "<positionRank><data Value=\"1\"><instrumentid>TS1812";
    assert!(parse_position_document(xml).is_err());
}
