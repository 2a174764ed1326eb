// ==========================================
// 定期配送计划系统 - 客户主数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::{Customer, TankProfile};
use crate::engine::ports::CustomerStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// CustomerRepository - 客户主数据仓储
// ==========================================
pub struct CustomerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CustomerRepository {
    /// 创建新的CustomerRepository实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 创建客户
    pub fn create(&self, customer: &Customer) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO customer (customer_id, name, tank_type, tank_capacity_kg)
               VALUES (?, ?, ?, ?)"#,
            params![
                &customer.customer_id,
                &customer.name,
                &customer.tank_type.map(|t| t.as_str().to_string()),
                &customer.tank_capacity_kg,
            ],
        )?;

        Ok(customer.customer_id.clone())
    }

    /// 按customer_id查询客户
    pub fn find_by_id(&self, customer_id: &str) -> RepositoryResult<Option<Customer>> {
        let conn = self.get_conn()?;

        match conn.query_row(
            r#"SELECT customer_id, name, tank_type, tank_capacity_kg
               FROM customer
               WHERE customer_id = ?"#,
            params![customer_id],
            map_row,
        ) {
            Ok(customer) => Ok(Some(customer)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询所有客户 (按customer_id升序)
    pub fn list_all(&self) -> RepositoryResult<Vec<Customer>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT customer_id, name, tank_type, tank_capacity_kg
               FROM customer
               ORDER BY customer_id ASC"#,
        )?;

        let customers = stmt
            .query_map([], map_row)?
            .collect::<Result<Vec<Customer>, _>>()?;

        Ok(customers)
    }
}

/// 映射数据库行到Customer对象
///
/// tank_type 列为非法值时按缺失处理 (数据卫生,不报错)
fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Customer> {
    let tank_type: Option<String> = row.get(2)?;

    Ok(Customer {
        customer_id: row.get(0)?,
        name: row.get(1)?,
        tank_type: tank_type.and_then(|s| s.parse::<TankProfile>().ok()),
        tank_capacity_kg: row.get(3)?,
    })
}

// 异步存储端口实现
#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn list(&self) -> RepositoryResult<Vec<Customer>> {
        self.list_all()
    }
}
