// ==========================================
// 定期配送计划系统 - 批次入口
// ==========================================
// 职责: 打开数据库,装配存储端口,执行一次计划对账批次
// 约束: 同一时刻最多一个对账批次在运行
// ==========================================

use chrono::Local;
use delivery_aps::config::PlanningConfig;
use delivery_aps::engine::{PlanReconciler, PlanningStores};
use delivery_aps::repository::{CustomerRepository, DeliveryOrderRepository, PlanEntryRepository};
use delivery_aps::{db, logging};
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", delivery_aps::APP_NAME, delivery_aps::VERSION);
    tracing::info!("==================================================");

    // 数据库路径: 第一个命令行参数,默认 delivery_aps.db
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "delivery_aps.db".to_string());
    tracing::info!("使用数据库: {}", db_path);

    let conn = db::open_sqlite_connection(&db_path)?;
    db::init_schema(&conn)?;
    let config = PlanningConfig::load(&conn);

    let conn = Arc::new(Mutex::new(conn));
    let stores = PlanningStores::new(
        Arc::new(DeliveryOrderRepository::new(conn.clone())),
        Arc::new(CustomerRepository::new(conn.clone())),
        Arc::new(PlanEntryRepository::new(conn)),
    );

    let reconciler = PlanReconciler::new(stores, config);
    let today = Local::now().date_naive();
    let summary = reconciler.reconcile_all(today).await?;

    tracing::info!(
        "对账完成: 客户 {} (预测 {} / 回退 {} / 清空 {}), 写入条目 {}, 耗时 {}ms",
        summary.total_customers,
        summary.forecasted,
        summary.fallback,
        summary.cleared,
        summary.planned_entries,
        summary.elapsed_ms
    );

    Ok(())
}
