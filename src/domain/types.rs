// ==========================================
// 库存需求投影看板 - 领域类型定义
// ==========================================
// 着色状态: 由净流量 + 按单生产量落入的阈值区间决定
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 单元格颜色 (Cell Color)
// ==========================================
// 顺序: Black < Red < Yellow < Green < Blue
// Black = 恰好为零, Red = 轻度缺货, Yellow = 中度, Green = 健康, Blue = 积压
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellColor {
    Black,  // 零库存
    Red,    // 红区
    Yellow, // 黄区
    Green,  // 绿区
    Blue,   // 超出全部区间
}

impl CellColor {
    /// 全部颜色（按严重度排序）
    pub const ALL: [CellColor; 5] = [
        CellColor::Black,
        CellColor::Red,
        CellColor::Yellow,
        CellColor::Green,
        CellColor::Blue,
    ];

    /// 汇总面板展示顺序
    pub const DISPLAY_ORDER: [CellColor; 5] = [
        CellColor::Blue,
        CellColor::Green,
        CellColor::Yellow,
        CellColor::Red,
        CellColor::Black,
    ];

    /// 转换为字符串标识
    pub fn as_str(&self) -> &'static str {
        match self {
            CellColor::Black => "black",
            CellColor::Red => "red",
            CellColor::Yellow => "yellow",
            CellColor::Green => "green",
            CellColor::Blue => "blue",
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_serde_lowercase() {
        let json = serde_json::to_string(&CellColor::Yellow).unwrap();
        assert_eq!(json, "\"yellow\"");

        let color: CellColor = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(color, CellColor::Blue);
    }

    #[test]
    fn test_severity_order() {
        assert!(CellColor::Black < CellColor::Red);
        assert!(CellColor::Green < CellColor::Blue);
        assert_eq!(CellColor::DISPLAY_ORDER[0], CellColor::Blue);
    }
}
