// ==========================================
// 定期配送计划系统 - 引擎层存储端口
// ==========================================
// 职责: 定义引擎依赖的抽象存储契约,并聚合注入
// 目标: 消除对共享存储对象的隐式全局引用,
//       测试时可用内存假实现替换
// ==========================================

use crate::domain::{Customer, DeliveryRecord, PlanEntry};
use crate::repository::RepositoryResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

// ==========================================
// OrderStore - 配送记录读取端口
// ==========================================
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// 按客户列出全部配送记录
    async fn list_by_customer(&self, customer_id: &str) -> RepositoryResult<Vec<DeliveryRecord>>;
}

// ==========================================
// CustomerStore - 客户主数据读取端口
// ==========================================
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// 列出全部客户
    async fn list(&self) -> RepositoryResult<Vec<Customer>>;
}

// ==========================================
// PlanStore - 计划条目读写端口
// ==========================================
// 红线: 计划库仅由对账引擎写入
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// 按客户列出全部计划条目
    async fn query_by_customer(&self, customer_id: &str) -> RepositoryResult<Vec<PlanEntry>>;

    /// 插入计划条目, (customer_id, date) 冲突时幂等
    async fn upsert(&self, customer_id: &str, date: NaiveDate) -> RepositoryResult<()>;

    /// 批量删除计划条目 (按entry_id)
    async fn bulk_delete(&self, entry_ids: &[String]) -> RepositoryResult<()>;
}

// ==========================================
// PlanningStores - 对账引擎存储集合
// ==========================================
/// 对账引擎存储集合
///
/// 聚合对账引擎所需的全部存储端口,简化依赖注入。
#[derive(Clone)]
pub struct PlanningStores {
    /// 配送记录端口
    pub orders: Arc<dyn OrderStore>,
    /// 客户主数据端口
    pub customers: Arc<dyn CustomerStore>,
    /// 计划条目端口
    pub plans: Arc<dyn PlanStore>,
}

impl PlanningStores {
    /// 创建新的存储集合
    pub fn new(
        orders: Arc<dyn OrderStore>,
        customers: Arc<dyn CustomerStore>,
        plans: Arc<dyn PlanStore>,
    ) -> Self {
        Self {
            orders,
            customers,
            plans,
        }
    }
}
