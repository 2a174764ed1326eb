// ==========================================
// 定期配送计划系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod delivery;
pub mod forecast;
pub mod plan;
pub mod route;
pub mod types;

// 重导出核心类型
pub use delivery::{Customer, DeliveryRecord};
pub use forecast::{ForecastResult, YearlyCount};
pub use plan::PlanEntry;
pub use route::{GeoPoint, RouteResult, Stop};
pub use types::{CustomerClass, TankProfile};
