// ==========================================
// 定期配送计划系统 - 引擎层
// ==========================================
// 职责: 实现预测/对账/路线业务规则,不拼 SQL
// 红线: Engine 只通过存储端口访问数据
// ==========================================

pub mod distribute;
pub mod fallback;
pub mod history;
pub mod horizon;
pub mod ports;
pub mod reconcile;
pub mod remote;
pub mod route;
pub mod spacing;
pub mod target;

// 重导出核心引擎
pub use distribute::MonthlyDistributor;
pub use fallback::FallbackCycler;
pub use history::HistoryExtractor;
pub use horizon::HorizonAssembler;
pub use ports::{CustomerStore, OrderStore, PlanStore, PlanningStores};
pub use reconcile::{PlanReconciler, PlanningError, ReconcileSummary};
pub use remote::RemoteCycleAdvisor;
pub use route::{haversine_km, RouteSequencer};
pub use spacing::DateSpacer;
pub use target::YearlyTargetEstimator;
