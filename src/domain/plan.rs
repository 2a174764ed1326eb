// ==========================================
// 定期配送计划系统 - 计划条目领域模型
// ==========================================
// 红线: 未来计划条目 (date >= today) 全权由对账引擎生命周期管理;
// 已过期条目 (date < today) 对账过程绝不触碰
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// PlanEntry - 计划配送条目
// ==========================================
// 唯一键: (customer_id, date)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub entry_id: String,    // 条目ID (uuid v4)
    pub customer_id: String, // 客户ID
    pub date: NaiveDate,     // 计划配送日期
}

impl PlanEntry {
    /// 创建新条目 (自动生成 entry_id)
    pub fn new(customer_id: &str, date: NaiveDate) -> Self {
        Self {
            entry_id: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            date,
        }
    }

    /// 是否为未来条目 (含今天)
    pub fn is_future(&self, today: NaiveDate) -> bool {
        self.date >= today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_future() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let e = PlanEntry::new("C001", today);
        assert!(e.is_future(today));

        let past = PlanEntry::new("C001", NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
        assert!(!past.is_future(today));
    }
}
