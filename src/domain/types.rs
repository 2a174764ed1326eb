// ==========================================
// 定期配送计划系统 - 领域类型定义
// ==========================================
// 职责: 类型安全的枚举定义
// 红线: 客户分类每次运行重新推导,不落库
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// TankProfile - 储罐规格
// ==========================================
// 用途: 仅供回退周期引擎使用,决定固定配送周期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankProfile {
    /// A型罐 (标称周期 38 天)
    A,
    /// B型罐 (标称周期 42 天)
    B,
    /// C型罐 (标称周期 51 天)
    C,
}

impl TankProfile {
    /// 标称配送周期(天)
    pub fn cycle_days(&self) -> i64 {
        match self {
            TankProfile::A => 38,
            TankProfile::B => 42,
            TankProfile::C => 51,
        }
    }

    /// 数据库存储用字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            TankProfile::A => "A",
            TankProfile::B => "B",
            TankProfile::C => "C",
        }
    }
}

impl FromStr for TankProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(TankProfile::A),
            "B" => Ok(TankProfile::B),
            "C" => Ok(TankProfile::C),
            other => Err(format!("未知的储罐规格: {}", other)),
        }
    }
}

impl fmt::Display for TankProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// CustomerClass - 客户分类
// ==========================================
// 规则 (每次对账运行从当前数据重新推导):
// - New: 从无任何配送记录
// - Forecasted: 基准年内存在配送记录
// - Fallback: 有历史但基准年为空,或预测分支失败降级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerClass {
    /// 新客户 (无任何历史)
    New,
    /// 统计预测
    Forecasted,
    /// 固定周期回退
    Fallback,
}

impl fmt::Display for CustomerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CustomerClass::New => "NEW",
            CustomerClass::Forecasted => "FORECASTED",
            CustomerClass::Fallback => "FALLBACK",
        };
        write!(f, "{}", s)
    }
}
