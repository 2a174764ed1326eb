// ==========================================
// 定期配送计划系统 - 计划参数配置
// ==========================================
// 职责: 预测/对账引擎的参数集合与加载
// 存储: config_kv 表 (key-value, scope_id='global'), 键前缀 planning/
// 规则: 库中无覆盖值或值非法时使用默认值 (非法值告警)
// ==========================================

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

// ==========================================
// PlanningConfig - 计划参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningConfig {
    pub horizon_days: i64,                  // 计划窗口天数: 370
    pub max_years_back: i32,                // 历史回看年数: 3
    pub fallback_cycle_days: i64,           // 默认回退周期天数: 42
    pub w_last: f64,                        // 基准年季节性权重: 0.7
    pub w_past: f64,                        // 其余年份季节性权重: 0.3
    pub clamp_low: f64,                     // 年度目标夹取下限系数: 0.85
    pub clamp_high: f64,                    // 年度目标夹取上限系数: 1.3
    pub remote_advisor_url: Option<String>, // 远端周期顾问地址 (可选)
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            horizon_days: 370,
            max_years_back: 3,
            fallback_cycle_days: 42,
            w_last: 0.7,
            w_past: 0.3,
            clamp_low: 0.85,
            clamp_high: 1.3,
            remote_advisor_url: None,
        }
    }
}

impl PlanningConfig {
    /// 从 config_kv 表加载参数 (global scope, 键前缀 planning/)
    ///
    /// 表不存在或查询失败时整体回退默认值
    pub fn load(conn: &Connection) -> Self {
        let mut config = Self::default();

        config.horizon_days = read_or(conn, "planning/horizon_days", config.horizon_days);
        config.max_years_back = read_or(conn, "planning/max_years_back", config.max_years_back);
        config.fallback_cycle_days =
            read_or(conn, "planning/fallback_cycle_days", config.fallback_cycle_days);
        config.w_last = read_or(conn, "planning/w_last", config.w_last);
        config.w_past = read_or(conn, "planning/w_past", config.w_past);
        config.clamp_low = read_or(conn, "planning/clamp_low", config.clamp_low);
        config.clamp_high = read_or(conn, "planning/clamp_high", config.clamp_high);
        config.remote_advisor_url = read_raw(conn, "planning/remote_advisor_url");

        config
    }
}

/// 读取单个配置值并解析,缺失/非法时返回默认值
fn read_or<T: FromStr + Copy>(conn: &Connection, key: &str, default: T) -> T {
    match read_raw(conn, key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                warn!(key = %key, raw = %raw, "配置值无法解析,使用默认值");
                default
            }
        },
        None => default,
    }
}

/// 读取 config_kv 原始字符串值
fn read_raw(conn: &Connection, key: &str) -> Option<String> {
    conn.query_row(
        "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
        params![key],
        |row| row.get::<_, String>(0),
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"CREATE TABLE config_kv (
                scope_id TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (scope_id, key)
            );"#,
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_defaults_when_table_empty() {
        let conn = setup_conn();
        let config = PlanningConfig::load(&conn);
        assert_eq!(config.horizon_days, 370);
        assert_eq!(config.max_years_back, 3);
        assert_eq!(config.fallback_cycle_days, 42);
        assert!(config.remote_advisor_url.is_none());
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let conn = setup_conn();
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', 'planning/horizon_days', '400')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', 'planning/w_last', 'abc')",
            [],
        )
        .unwrap();

        let config = PlanningConfig::load(&conn);
        assert_eq!(config.horizon_days, 400);
        assert_eq!(config.w_last, 0.7); // 非法值回退默认
    }

    #[test]
    fn test_defaults_when_table_missing() {
        let conn = Connection::open_in_memory().unwrap();
        let config = PlanningConfig::load(&conn);
        assert_eq!(config.horizon_days, 370);
    }
}
