// ==========================================
// 库存需求投影看板 - 数据清洗器
// ==========================================
// 职责: TRIM 文本字段 / 区间宽度非负化 / 日期可解析校验
// ==========================================

use crate::domain::product::ProductRecord;
use crate::importer::error::ImportError;

pub struct DataCleaner;

impl DataCleaner {
    pub fn new() -> Self {
        Self
    }

    /// 清洗文本（TRIM）
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 区间宽度非负化
    ///
    /// # 返回
    /// (清洗后的值, 是否被修正)
    ///
    /// 负数与非有限值均修正为 0
    pub fn clamp_zone(&self, value: f64) -> (f64, bool) {
        if value.is_finite() && value >= 0.0 {
            (value, false)
        } else {
            (0.0, true)
        }
    }

    /// 清洗单条记录
    ///
    /// # 参数
    /// - `row`: 记录在数据源中的序号（从 0 开始）
    /// - `record`: 原始记录
    ///
    /// # 返回
    /// - Ok((record, clamped_fields)): 清洗后的记录 + 被修正的区间字段数
    /// - Err(ImportError::DateFormatError): 预测日期无法解析,记录不可索引
    pub fn clean_record(
        &self,
        row: usize,
        mut record: ProductRecord,
    ) -> Result<(ProductRecord, usize), ImportError> {
        record.reference = self.clean_text(&record.reference);
        record.center_code = self.clean_text(&record.center_code);
        record.visible_forecasted_date = self.clean_text(&record.visible_forecasted_date);

        if record.forecast_date().is_none() {
            return Err(ImportError::DateFormatError {
                row,
                reference: record.reference,
                value: record.visible_forecasted_date,
            });
        }

        let mut clamped = 0;
        for zone in [
            &mut record.red_zone,
            &mut record.yellow_zone,
            &mut record.green_zone,
        ] {
            let (value, fixed) = self.clamp_zone(*zone);
            if fixed {
                clamped += 1;
            }
            *zone = value;
        }

        Ok((record, clamped))
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, red: f64) -> ProductRecord {
        ProductRecord {
            center_code: " AKL ".to_string(),
            reference: " REF1 ".to_string(),
            visible_forecasted_date: date.to_string(),
            net_flow: 10.0,
            green_zone: 5.0,
            yellow_zone: 5.0,
            red_zone: red,
            make_to_order: 0.0,
        }
    }

    #[test]
    fn test_clean_trims_text() {
        let cleaner = DataCleaner::new();
        let (cleaned, clamped) = cleaner
            .clean_record(0, record("2025-03-20T00:00:00", 5.0))
            .unwrap();
        assert_eq!(cleaned.reference, "REF1");
        assert_eq!(cleaned.center_code, "AKL");
        assert_eq!(clamped, 0);
    }

    #[test]
    fn test_negative_zone_clamped() {
        let cleaner = DataCleaner::new();
        let (cleaned, clamped) = cleaner
            .clean_record(0, record("2025-03-20T00:00:00", -3.0))
            .unwrap();
        assert_eq!(cleaned.red_zone, 0.0);
        assert_eq!(clamped, 1);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let cleaner = DataCleaner::new();
        let err = cleaner.clean_record(7, record("", 5.0)).unwrap_err();
        match err {
            ImportError::DateFormatError { row, reference, .. } => {
                assert_eq!(row, 7);
                assert_eq!(reference, "REF1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
