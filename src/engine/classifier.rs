// ==========================================
// 库存需求投影看板 - 着色判定
// ==========================================
// 输入: 合计值 (net_flow + make_to_order) + 红/黄/绿区宽度
// 输出: CellColor
// 红线: 区间宽度累加,上界闭合 (<=),下界开放 (>)
// ==========================================
// 区间划分:
//   total == 0                    → Black
//   0 < total <= R                → Red
//   R < total <= R+Y              → Yellow
//   R+Y < total <= R+Y+G          → Green
//   其他（含 total < 0）           → Blue
// ==========================================

use crate::domain::product::ProductRecord;
use crate::domain::types::CellColor;

/// 按区间判定颜色（纯函数,无错误分支）
pub fn classify(total: f64, red_zone: f64, yellow_zone: f64, green_zone: f64) -> CellColor {
    if total == 0.0 {
        return CellColor::Black;
    }

    let red_top = red_zone;
    let yellow_top = red_top + yellow_zone;
    let green_top = yellow_top + green_zone;

    if total > 0.0 && total <= red_top {
        CellColor::Red
    } else if total > red_top && total <= yellow_top {
        CellColor::Yellow
    } else if total > yellow_top && total <= green_top {
        CellColor::Green
    } else {
        CellColor::Blue
    }
}

/// 判定单条记录的颜色
pub fn classify_record(record: &ProductRecord) -> CellColor {
    classify(
        record.total(),
        record.red_zone,
        record.yellow_zone,
        record.green_zone,
    )
}
