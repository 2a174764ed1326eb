// ==========================================
// 定期配送计划系统 - 配送记录仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: date 列按原始文本返回,日期解析属于引擎层职责
// ==========================================

use crate::domain::DeliveryRecord;
use crate::engine::ports::OrderStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// DeliveryOrderRepository - 配送记录仓储
// ==========================================
pub struct DeliveryOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DeliveryOrderRepository {
    /// 创建新的DeliveryOrderRepository实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入配送记录
    ///
    /// # 参数
    /// - `record`: 配送记录
    pub fn insert(&self, record: &DeliveryRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO delivery_record (customer_id, delivery_date)
               VALUES (?, ?)"#,
            params![&record.customer_id, &record.date],
        )?;

        Ok(())
    }

    /// 按客户查询全部配送记录 (按日期文本升序)
    pub fn find_by_customer(&self, customer_id: &str) -> RepositoryResult<Vec<DeliveryRecord>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT customer_id, delivery_date
               FROM delivery_record
               WHERE customer_id = ?
               ORDER BY delivery_date ASC"#,
        )?;

        let records = stmt
            .query_map(params![customer_id], |row| {
                Ok(DeliveryRecord {
                    customer_id: row.get(0)?,
                    date: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<DeliveryRecord>, _>>()?;

        Ok(records)
    }
}

// 异步存储端口实现 (rusqlite 为同步库,方法体在连接互斥锁内同步完成)
#[async_trait]
impl OrderStore for DeliveryOrderRepository {
    async fn list_by_customer(&self, customer_id: &str) -> RepositoryResult<Vec<DeliveryRecord>> {
        self.find_by_customer(customer_id)
    }
}
