// ==========================================
// 定期配送计划系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout,减少并发写入时的偶发 busy 错误
// - 提供建表入口,三张业务表 + config_kv
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout(毫秒)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明:
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema (幂等)
///
/// 表说明:
/// - delivery_record: 历史配送记录 (外部订单库喂入, 本核心只读)
/// - customer: 客户主数据
/// - plan_entry: 计划条目, 唯一键 (customer_id, plan_date)
/// - config_kv: 参数覆盖
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS customer (
            customer_id TEXT PRIMARY KEY,
            name TEXT NOT NULL DEFAULT '',
            tank_type TEXT,
            tank_capacity_kg REAL
        );

        CREATE TABLE IF NOT EXISTS delivery_record (
            record_id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id TEXT NOT NULL,
            delivery_date TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_delivery_record_customer
            ON delivery_record (customer_id, delivery_date);

        CREATE TABLE IF NOT EXISTS plan_entry (
            entry_id TEXT PRIMARY KEY,
            customer_id TEXT NOT NULL,
            plan_date TEXT NOT NULL,
            UNIQUE (customer_id, plan_date)
        );
        CREATE INDEX IF NOT EXISTS idx_plan_entry_customer
            ON plan_entry (customer_id, plan_date);

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )
}
