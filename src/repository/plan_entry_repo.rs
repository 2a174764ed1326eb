// ==========================================
// 定期配送计划系统 - 计划条目仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 唯一键: (customer_id, plan_date) — 由表级 UNIQUE 约束保证
// ==========================================

use crate::domain::PlanEntry;
use crate::engine::ports::PlanStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

const DATE_FMT: &str = "%Y-%m-%d";

// ==========================================
// PlanEntryRepository - 计划条目仓储
// ==========================================
pub struct PlanEntryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PlanEntryRepository {
    /// 创建新的PlanEntryRepository实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按客户查询全部计划条目 (按日期升序)
    pub fn find_by_customer(&self, customer_id: &str) -> RepositoryResult<Vec<PlanEntry>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT entry_id, customer_id, plan_date
               FROM plan_entry
               WHERE customer_id = ?
               ORDER BY plan_date ASC"#,
        )?;

        let entries = stmt
            .query_map(params![customer_id], map_row)?
            .collect::<Result<Vec<PlanEntry>, _>>()?;

        Ok(entries)
    }

    /// 插入或更新计划条目
    ///
    /// (customer_id, plan_date) 冲突时保留原条目 (entry_id 不变),幂等
    pub fn upsert_entry(&self, customer_id: &str, date: NaiveDate) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO plan_entry (entry_id, customer_id, plan_date)
               VALUES (?, ?, ?)
               ON CONFLICT(customer_id, plan_date) DO NOTHING"#,
            params![
                Uuid::new_v4().to_string(),
                customer_id,
                date.format(DATE_FMT).to_string(),
            ],
        )?;

        Ok(())
    }

    /// 批量删除计划条目 (按entry_id)
    pub fn delete_by_ids(&self, entry_ids: &[String]) -> RepositoryResult<()> {
        if entry_ids.is_empty() {
            return Ok(());
        }

        let mut conn = self.get_conn()?;

        // 单事务内逐条删除,避免半途失败留下残缺状态
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        for entry_id in entry_ids {
            tx.execute("DELETE FROM plan_entry WHERE entry_id = ?", params![entry_id])?;
        }
        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(())
    }

    /// 统计全部计划条目数 (测试/诊断用)
    pub fn count_all(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM plan_entry", [], |row| row.get(0))?;

        Ok(count)
    }
}

/// 映射数据库行到PlanEntry对象
fn map_row(row: &rusqlite::Row) -> rusqlite::Result<PlanEntry> {
    let raw: String = row.get(2)?;
    let date = NaiveDate::parse_from_str(&raw, DATE_FMT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(PlanEntry {
        entry_id: row.get(0)?,
        customer_id: row.get(1)?,
        date,
    })
}

// 异步存储端口实现
#[async_trait]
impl PlanStore for PlanEntryRepository {
    async fn query_by_customer(&self, customer_id: &str) -> RepositoryResult<Vec<PlanEntry>> {
        self.find_by_customer(customer_id)
    }

    async fn upsert(&self, customer_id: &str, date: NaiveDate) -> RepositoryResult<()> {
        self.upsert_entry(customer_id, date)
    }

    async fn bulk_delete(&self, entry_ids: &[String]) -> RepositoryResult<()> {
        self.delete_by_ids(entry_ids)
    }
}
