// ==========================================
// 定期配送计划系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问实现,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod customer_repo;
pub mod delivery_order_repo;
pub mod error;
pub mod plan_entry_repo;

// 重导出核心仓储
pub use customer_repo::CustomerRepository;
pub use delivery_order_repo::DeliveryOrderRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use plan_entry_repo::PlanEntryRepository;
