// ==========================================
// 定期配送计划系统 - 配置层
// ==========================================
// 职责: 系统参数的默认值与加载
// ==========================================

pub mod planning_config;

pub use planning_config::PlanningConfig;
