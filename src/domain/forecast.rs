// ==========================================
// 定期配送计划系统 - 预测结果领域模型
// ==========================================
// 红线: ForecastResult 是派生数据,不直接持久化;
// 仅 planned_dates 经对账引擎物化为 plan_entry
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// YearlyCount - 年度配送次数
// ==========================================
// 派生数据,不落库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyCount {
    pub year: i32,  // 年份
    pub count: u32, // 该年配送次数
}

// ==========================================
// ForecastResult - 单客户单次预测结果
// ==========================================
// 不变式:
// - planned_dates 严格升序且无重复
// - monthly_counts 合计 == target_year_count (构造保证)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub target_year_count: u32,        // 未来一年目标配送次数
    pub monthly_counts: [u32; 12],     // 月度分配 (1月..12月)
    pub planned_dates: Vec<NaiveDate>, // 计划配送日期
}

impl ForecastResult {
    /// 月度分配合计
    pub fn monthly_total(&self) -> u32 {
        self.monthly_counts.iter().sum()
    }
}
