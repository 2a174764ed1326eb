// ==========================================
// 定期配送计划系统 - 配送记录与客户领域模型
// ==========================================
// 红线: DeliveryRecord 一经创建不可变,仅由外部显式清理删除
// ==========================================

use crate::domain::types::TankProfile;
use serde::{Deserialize, Serialize};

// ==========================================
// DeliveryRecord - 历史配送记录
// ==========================================
// 说明: date 保留订单库中的原始字符串,解析在提取引擎内完成;
// 无法解析的日期视为数据卫生问题,静默跳过
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub customer_id: String, // 客户ID
    pub date: String,        // 配送日期 (原始字符串, 期望格式 YYYY-MM-DD)
}

// ==========================================
// Customer - 客户主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,               // 客户ID
    pub name: String,                      // 客户名称
    pub tank_type: Option<TankProfile>,    // 储罐规格 (缺失时回退周期取默认值)
    pub tank_capacity_kg: Option<f64>,     // 储罐容量(kg)
}

impl Customer {
    /// 回退周期天数 (储罐规格缺失时使用传入默认值)
    pub fn fallback_cycle_days(&self, default_days: i64) -> i64 {
        self.tank_type.map(|t| t.cycle_days()).unwrap_or(default_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_cycle_days() {
        let mut c = Customer {
            customer_id: "C001".to_string(),
            name: "テスト顧客".to_string(),
            tank_type: Some(TankProfile::C),
            tank_capacity_kg: Some(50.0),
        };
        assert_eq!(c.fallback_cycle_days(42), 51);

        c.tank_type = None;
        assert_eq!(c.fallback_cycle_days(42), 42);
    }
}
