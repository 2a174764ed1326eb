// ==========================================
// 定期配送计划系统 - 计划对账引擎
// ==========================================
// 职责: 逐客户编排预测流水线,并把计划库对齐到最新预测
// 分类 (每次运行从当前数据重新推导,不落库):
// - NEW: 从无任何可用配送记录 → 清空该客户未来计划条目
// - FORECASTED: 基准年内有配送记录 → 统计预测,整体替换未来条目
// - FALLBACK: 有历史但基准年为空,或预测分支失败 → 固定周期回退
// 红线:
// - date < today 的条目 (历史计划) 绝不创建/修改/删除
// - 单客户失败只降级该客户,批次继续; 仅存储级错误中止整批
// - 不支持同一时刻并发执行两个对账批次
// ==========================================

use crate::config::PlanningConfig;
use crate::domain::{Customer, CustomerClass, ForecastResult};
use crate::engine::distribute::MonthlyDistributor;
use crate::engine::fallback::FallbackCycler;
use crate::engine::history::HistoryExtractor;
use crate::engine::horizon::HorizonAssembler;
use crate::engine::ports::PlanningStores;
use crate::engine::remote::RemoteCycleAdvisor;
use crate::engine::target::YearlyTargetEstimator;
use crate::repository::RepositoryError;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};

// ==========================================
// PlanningError - 对账引擎错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum PlanningError {
    /// 存储级错误: 没有可用的存储就没有有意义的部分状态,整批中止
    #[error("存储访问失败: {0}")]
    Store(#[from] RepositoryError),

    /// 单客户预测计算失败: 在每客户边界捕获并降级回退,不出批次
    #[error("预测计算失败: {0}")]
    Forecast(String),
}

// ==========================================
// ReconcileSummary - 对账批次结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileSummary {
    pub total_customers: usize, // 处理客户总数
    pub forecasted: usize,      // 统计预测客户数
    pub fallback: usize,        // 固定周期回退客户数
    pub cleared: usize,         // 清空计划的新客户数
    pub planned_entries: usize, // 本次写入的计划条目总数
    pub elapsed_ms: i64,        // 耗时(毫秒)
}

// ==========================================
// PlanReconciler - 计划对账引擎
// ==========================================
pub struct PlanReconciler {
    // 存储端口
    stores: PlanningStores,

    // 子引擎
    history: HistoryExtractor,
    estimator: YearlyTargetEstimator,
    distributor: MonthlyDistributor,
    assembler: HorizonAssembler,
    cycler: FallbackCycler,

    // 远端周期顾问 (可选,仅建议性)
    advisor: Option<RemoteCycleAdvisor>,

    // 配置
    config: PlanningConfig,
}

impl PlanReconciler {
    /// 创建新的计划对账引擎
    pub fn new(stores: PlanningStores, config: PlanningConfig) -> Self {
        let advisor = config
            .remote_advisor_url
            .clone()
            .map(RemoteCycleAdvisor::new);

        Self {
            stores,
            history: HistoryExtractor::new(),
            estimator: YearlyTargetEstimator::new(config.clamp_low, config.clamp_high),
            distributor: MonthlyDistributor::new(config.w_last, config.w_past),
            assembler: HorizonAssembler::new(config.horizon_days),
            cycler: FallbackCycler::new(),
            advisor,
            config,
        }
    }

    /// 基准年: 最近一个已结束的自然年
    pub fn base_year(today: NaiveDate) -> i32 {
        today.year() - 1
    }

    /// 对账整批客户
    ///
    /// 逐客户顺序执行,每次存储读写都是一个挂起点;
    /// 不存在跨客户事务,批次中途可被观察到部分客户已对账
    #[instrument(skip(self), fields(today = %today))]
    pub async fn reconcile_all(&self, today: NaiveDate) -> Result<ReconcileSummary, PlanningError> {
        let started = std::time::Instant::now();

        let customers = self.stores.customers.list().await?;

        let mut summary = ReconcileSummary {
            total_customers: customers.len(),
            forecasted: 0,
            fallback: 0,
            cleared: 0,
            planned_entries: 0,
            elapsed_ms: 0,
        };

        for customer in &customers {
            let (class, written) = self.reconcile_customer(customer, today).await?;
            match class {
                CustomerClass::New => summary.cleared += 1,
                CustomerClass::Forecasted => summary.forecasted += 1,
                CustomerClass::Fallback => summary.fallback += 1,
            }
            summary.planned_entries += written;
        }

        summary.elapsed_ms = started.elapsed().as_millis() as i64;
        info!(
            total = summary.total_customers,
            forecasted = summary.forecasted,
            fallback = summary.fallback,
            cleared = summary.cleared,
            planned_entries = summary.planned_entries,
            elapsed_ms = summary.elapsed_ms,
            "计划对账批次完成"
        );

        Ok(summary)
    }

    /// 对账单个客户
    ///
    /// # 返回
    /// - (最终分类, 本次写入条目数)
    #[instrument(skip(self, customer), fields(customer_id = %customer.customer_id))]
    pub async fn reconcile_customer(
        &self,
        customer: &Customer,
        today: NaiveDate,
    ) -> Result<(CustomerClass, usize), PlanningError> {
        let base_year = Self::base_year(today);

        let records = self.stores.orders.list_by_customer(&customer.customer_id).await?;
        let windowed = self
            .history
            .extract(&records, base_year, self.config.max_years_back);
        let last_known = self.history.latest_date(&records);

        match Self::classify(&windowed, last_known, base_year) {
            CustomerClass::New => {
                // 无任何可用历史: 只清空未来条目,不做预测
                self.replace_future_entries(&customer.customer_id, &[], today)
                    .await?;
                Ok((CustomerClass::New, 0))
            }
            CustomerClass::Forecasted => {
                match self.compute_forecast(&windowed, base_year, today) {
                    Ok(forecast) => {
                        let written = self
                            .replace_future_entries(
                                &customer.customer_id,
                                &forecast.planned_dates,
                                today,
                            )
                            .await?;
                        Ok((CustomerClass::Forecasted, written))
                    }
                    Err(PlanningError::Forecast(reason)) => {
                        // 每客户边界: 预测失败降级回退,批次继续
                        warn!(
                            customer_id = %customer.customer_id,
                            reason = %reason,
                            "预测分支失败,降级为固定周期回退"
                        );
                        let written = self
                            .apply_fallback(customer, last_known, today)
                            .await?;
                        Ok((CustomerClass::Fallback, written))
                    }
                    Err(e) => Err(e),
                }
            }
            CustomerClass::Fallback => {
                let written = self.apply_fallback(customer, last_known, today).await?;
                Ok((CustomerClass::Fallback, written))
            }
        }
    }

    /// 客户分类 (无状态,纯函数)
    ///
    /// 相邻两次运行之间客户可以仅凭当前数据在
    /// FORECASTED / FALLBACK 之间迁移,没有额外的迁移守卫
    pub fn classify(
        windowed_dates: &[NaiveDate],
        last_known: Option<NaiveDate>,
        base_year: i32,
    ) -> CustomerClass {
        if last_known.is_none() {
            return CustomerClass::New;
        }
        if windowed_dates.iter().any(|d| d.year() == base_year) {
            CustomerClass::Forecasted
        } else {
            CustomerClass::Fallback
        }
    }

    /// 预测流水线: 年度目标 → 月度分配 → 窗口拼装
    pub fn compute_forecast(
        &self,
        dates: &[NaiveDate],
        base_year: i32,
        today: NaiveDate,
    ) -> Result<ForecastResult, PlanningError> {
        let yearly = self.history.yearly_counts(dates);
        let target_year_count = self.estimator.estimate(&yearly, base_year);

        let monthly_counts = self
            .distributor
            .distribute(dates, base_year, target_year_count);

        // 月度分配的余数修正受轮转上限约束,病态输入下可能未收敛;
        // 此时走每客户降级路径而不是带着坏分配写库
        let allocated: u32 = monthly_counts.iter().sum();
        if allocated != target_year_count {
            return Err(PlanningError::Forecast(format!(
                "月度分配未收敛: target={} allocated={}",
                target_year_count, allocated
            )));
        }

        let planned_dates = self.assembler.assemble(&monthly_counts, today);

        Ok(ForecastResult {
            target_year_count,
            monthly_counts,
            planned_dates,
        })
    }

    /// 回退分支: 清空未来条目后按固定周期写入窗口内日期
    ///
    /// 先咨询远端周期顾问 (若配置); 任何失败静默回退本地相位保持计算
    async fn apply_fallback(
        &self,
        customer: &Customer,
        last_known: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<usize, PlanningError> {
        let last_date = match last_known {
            Some(d) => d,
            None => {
                // 分类为回退却无锚点日期不应发生; 按新客户语义清空
                self.replace_future_entries(&customer.customer_id, &[], today)
                    .await?;
                return Ok(0);
            }
        };

        let cycle_days = customer.fallback_cycle_days(self.config.fallback_cycle_days);
        let dates = self
            .fallback_dates(last_date, cycle_days, today)
            .await;

        let written = self
            .replace_future_entries(&customer.customer_id, &dates, today)
            .await?;
        Ok(written)
    }

    /// 回退日期列表: 远端建议的首日 + 本地周期步进补满窗口
    async fn fallback_dates(
        &self,
        last_date: NaiveDate,
        cycle_days: i64,
        today: NaiveDate,
    ) -> Vec<NaiveDate> {
        if let Some(advisor) = &self.advisor {
            if let Some(next) = advisor.next_date(last_date, cycle_days).await {
                if next > today {
                    let end = today + Duration::days(self.config.horizon_days);
                    return self.cycler.dates_from(next, cycle_days, end);
                }
            }
        }

        self.cycler
            .planned_dates(last_date, cycle_days, today, self.config.horizon_days)
    }

    /// 整体替换客户的未来计划条目
    ///
    /// 删除 date >= today 的既有条目,再逐日 upsert;
    /// date < today 的历史条目一律不触碰
    async fn replace_future_entries(
        &self,
        customer_id: &str,
        dates: &[NaiveDate],
        today: NaiveDate,
    ) -> Result<usize, PlanningError> {
        let existing = self.stores.plans.query_by_customer(customer_id).await?;
        let future_ids: Vec<String> = existing
            .iter()
            .filter(|e| e.is_future(today))
            .map(|e| e.entry_id.clone())
            .collect();

        self.stores.plans.bulk_delete(&future_ids).await?;

        let mut written = 0;
        for date in dates {
            if *date < today {
                continue;
            }
            self.stores.plans.upsert(customer_id, *date).await?;
            written += 1;
        }

        Ok(written)
    }
}
