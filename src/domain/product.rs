// ==========================================
// 库存需求投影看板 - 投影记录领域模型
// ==========================================
// 数据源: JSON 文档 {"Datos": 记录 | [记录...]}
// 字段命名: PascalCase (与数据源一致)
// ==========================================

use crate::domain::calendar::parse_forecast_date;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ==========================================
// ProductRecord - 投影记录
// ==========================================
// 一条记录 = 一个产品在一个预测日期上的观测
// 红线: net_flow 不可编辑,只有 make_to_order 随人工编辑变化
// 红线: 三个区间宽度非负,且为累加宽度（不是绝对阈值）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProductRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub center_code: String, // 库存中心代码
    #[serde(deserialize_with = "lenient_text")]
    pub reference: String, // 产品编码
    #[serde(deserialize_with = "lenient_text")]
    pub visible_forecasted_date: String, // 预测时间戳（原始字符串）
    #[serde(deserialize_with = "lenient_number")]
    pub net_flow: f64, // 净流量
    #[serde(deserialize_with = "lenient_number")]
    pub green_zone: f64, // 绿区宽度
    #[serde(deserialize_with = "lenient_number")]
    pub yellow_zone: f64, // 黄区宽度
    #[serde(deserialize_with = "lenient_number")]
    pub red_zone: f64, // 红区宽度
    #[serde(deserialize_with = "lenient_number")]
    pub make_to_order: f64, // 按单生产量（可编辑）
}

// ==========================================
// 字段级宽松反序列化
// ==========================================
// 单个字段为 null 或类型不符时取默认值,不影响同一文档中的其他记录

/// 数值字段: 数字原样取值,数字字符串解析,其余（null、非有限值）取 0
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|v| v.is_finite()).unwrap_or_default())
}

/// 文本字段: 字符串原样取值,数字转为文本,其余取空串
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

impl ProductRecord {
    /// 参与着色判定的合计值
    pub fn total(&self) -> f64 {
        self.net_flow + self.make_to_order
    }

    /// 本地日历日期（无法解析时为 None）
    pub fn forecast_date(&self) -> Option<NaiveDate> {
        parse_forecast_date(&self.visible_forecasted_date)
    }
}

// ==========================================
// ProductDataResponse - 数据源文档
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDataResponse {
    #[serde(rename = "Datos", default)]
    pub datos: Option<DatosPayload>,
}

/// Datos 既可能是单个对象,也可能是数组
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatosPayload {
    Many(Vec<ProductRecord>),
    One(ProductRecord),
}

impl ProductDataResponse {
    /// 展开为记录列表（缺失 Datos 时为空）
    pub fn into_records(self) -> Vec<ProductRecord> {
        match self.datos {
            Some(DatosPayload::Many(records)) => records,
            Some(DatosPayload::One(record)) => vec![record],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_names() {
        let json = r#"{
            "CenterCode": "AKL",
            "Reference": "210003000015R30",
            "VisibleForecastedDate": "2025-03-20T00:00:00",
            "NetFlow": 200.0,
            "GreenZone": 20.0,
            "YellowZone": 20.0,
            "RedZone": 30.0,
            "MakeToOrder": 5
        }"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.center_code, "AKL");
        assert_eq!(record.red_zone, 30.0);
        assert_eq!(record.total(), 205.0);
        assert_eq!(record.forecast_date(), NaiveDate::from_ymd_opt(2025, 3, 20));
    }

    #[test]
    fn test_missing_fields_default() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"Reference": "REF1", "NetFlow": 10}"#).unwrap();
        assert_eq!(record.reference, "REF1");
        assert_eq!(record.make_to_order, 0.0);
        assert!(record.center_code.is_empty());
        assert!(record.forecast_date().is_none());
    }

    #[test]
    fn test_null_and_mistyped_fields_default() {
        let json = r#"{
            "CenterCode": null,
            "Reference": "A",
            "NetFlow": "12.5",
            "GreenZone": true,
            "YellowZone": null,
            "RedZone": "n/a",
            "MakeToOrder": null
        }"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert!(record.center_code.is_empty());
        assert_eq!(record.net_flow, 12.5);
        assert_eq!(record.green_zone, 0.0);
        assert_eq!(record.yellow_zone, 0.0);
        assert_eq!(record.red_zone, 0.0);
        assert_eq!(record.make_to_order, 0.0);
    }

    #[test]
    fn test_one_bad_field_keeps_sibling_records() {
        let response: ProductDataResponse = serde_json::from_str(
            r#"{"Datos": [{"Reference": "A", "MakeToOrder": null}, {"Reference": "B", "NetFlow": 3}]}"#,
        )
        .unwrap();
        let records = response.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].net_flow, 3.0);
    }

    #[test]
    fn test_datos_one_or_many() {
        let many: ProductDataResponse =
            serde_json::from_str(r#"{"Datos": [{"Reference": "A"}, {"Reference": "B"}]}"#).unwrap();
        assert_eq!(many.into_records().len(), 2);

        let one: ProductDataResponse =
            serde_json::from_str(r#"{"Datos": {"Reference": "A"}}"#).unwrap();
        assert_eq!(one.into_records().len(), 1);

        let none: ProductDataResponse = serde_json::from_str(r#"{"Other": 1}"#).unwrap();
        assert!(none.into_records().is_empty());
    }
}
