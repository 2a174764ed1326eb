// ==========================================
// 定期配送计划系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 配送预测与计划对账核心 (计划库内容是唯一可见产物)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施(连接初始化/PRAGMA 统一/建表)
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Customer, CustomerClass, DeliveryRecord, ForecastResult, GeoPoint, PlanEntry, RouteResult,
    Stop, TankProfile, YearlyCount,
};

// 引擎
pub use engine::{
    DateSpacer, FallbackCycler, HistoryExtractor, HorizonAssembler, MonthlyDistributor,
    PlanReconciler, PlanningError, PlanningStores, ReconcileSummary, RouteSequencer,
    YearlyTargetEstimator,
};

// 存储端口
pub use engine::{CustomerStore, OrderStore, PlanStore};

// 配置
pub use config::PlanningConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "定期配送计划系统";
