// ==========================================
// 库存需求投影看板 - 颜色汇总
// ==========================================
// 红线: 各颜色计数之和 == total == 统计范围内的记录数
// 说明: 汇总为派生数据,每次加载/编辑/切换日期后整体重算
// ==========================================

use crate::domain::types::CellColor;
use serde::{Deserialize, Serialize};

// ==========================================
// ColorSummary - 颜色汇总
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorSummary {
    pub red: usize,
    pub yellow: usize,
    pub green: usize,
    pub black: usize,
    pub blue: usize,
    pub total: usize,
}

impl ColorSummary {
    /// 空汇总（全部为零）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 从颜色序列统计
    pub fn from_colors<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = CellColor>,
    {
        let mut summary = Self::empty();
        for color in colors {
            summary.record(color);
        }
        summary
    }

    /// 计入一个单元格
    pub fn record(&mut self, color: CellColor) {
        *self.slot_mut(color) += 1;
        self.total += 1;
    }

    /// 指定颜色的计数
    pub fn count(&self, color: CellColor) -> usize {
        match color {
            CellColor::Black => self.black,
            CellColor::Red => self.red,
            CellColor::Yellow => self.yellow,
            CellColor::Green => self.green,
            CellColor::Blue => self.blue,
        }
    }

    /// 指定颜色的占比（四舍五入到整数百分比,total 为 0 时返回 0）
    pub fn percentage(&self, color: CellColor) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.count(color) as f64 / self.total as f64) * 100.0).round() as u32
    }

    /// 校验计数和 == total
    pub fn is_consistent(&self) -> bool {
        CellColor::ALL.iter().map(|c| self.count(*c)).sum::<usize>() == self.total
    }

    fn slot_mut(&mut self, color: CellColor) -> &mut usize {
        match color {
            CellColor::Black => &mut self.black,
            CellColor::Red => &mut self.red,
            CellColor::Yellow => &mut self.yellow,
            CellColor::Green => &mut self.green,
            CellColor::Blue => &mut self.blue,
        }
    }
}
