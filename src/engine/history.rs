// ==========================================
// 定期配送计划系统 - 历史提取引擎
// ==========================================
// 职责: 界定并排序单客户的历史配送日期
// 输入: 原始配送记录 + 基准年 + 回看年数
// 输出: [B-W, B] 区间内的升序日期列表
// 边界: 无法解析的日期静默丢弃 (数据卫生,非错误)
// ==========================================

use crate::domain::{DeliveryRecord, YearlyCount};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use tracing::debug;

const DATE_FMT: &str = "%Y-%m-%d";

// ==========================================
// HistoryExtractor - 历史提取引擎
// ==========================================
pub struct HistoryExtractor;

impl HistoryExtractor {
    /// 创建新的历史提取引擎
    pub fn new() -> Self {
        Self
    }

    /// 提取基准年回看窗口内的配送日期
    ///
    /// # 参数
    /// - `records`: 单客户原始配送记录
    /// - `base_year`: 基准年 B
    /// - `lookback_years`: 回看年数 W (保留年份区间 [B-W, B])
    ///
    /// # 返回
    /// - 升序日期列表; 无法解析的日期已丢弃
    pub fn extract(
        &self,
        records: &[DeliveryRecord],
        base_year: i32,
        lookback_years: i32,
    ) -> Vec<NaiveDate> {
        let min_year = base_year - lookback_years;

        let mut dates: Vec<NaiveDate> = records
            .iter()
            .filter_map(|r| match NaiveDate::parse_from_str(r.date.trim(), DATE_FMT) {
                Ok(d) => Some(d),
                Err(_) => {
                    debug!(customer_id = %r.customer_id, raw = %r.date, "配送日期无法解析,已跳过");
                    None
                }
            })
            .filter(|d| d.year() >= min_year && d.year() <= base_year)
            .collect();

        dates.sort_unstable();
        dates
    }

    /// 最后一次可解析的配送日期 (不受回看窗口限制)
    ///
    /// 回退周期引擎的锚点: 即便全部记录落在回看窗口之外,
    /// 相位仍锚定在最近一次真实配送上
    pub fn latest_date(&self, records: &[DeliveryRecord]) -> Option<NaiveDate> {
        records
            .iter()
            .filter_map(|r| NaiveDate::parse_from_str(r.date.trim(), DATE_FMT).ok())
            .max()
    }

    /// 按年统计配送次数 (仅包含有记录的年份, 按年份升序)
    pub fn yearly_counts(&self, dates: &[NaiveDate]) -> Vec<YearlyCount> {
        let mut counts: BTreeMap<i32, u32> = BTreeMap::new();
        for d in dates {
            *counts.entry(d.year()).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .map(|(year, count)| YearlyCount { year, count })
            .collect()
    }

    /// 按 (年, 月) 统计配送次数
    pub fn monthly_counts(&self, dates: &[NaiveDate]) -> BTreeMap<(i32, u32), u32> {
        let mut counts: BTreeMap<(i32, u32), u32> = BTreeMap::new();
        for d in dates {
            *counts.entry((d.year(), d.month())).or_insert(0) += 1;
        }
        counts
    }
}

impl Default for HistoryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(customer_id: &str, date: &str) -> DeliveryRecord {
        DeliveryRecord {
            customer_id: customer_id.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_extract_sorts_and_bounds() {
        let records = vec![
            record("C001", "2024-06-15"),
            record("C001", "2024-01-05"),
            record("C001", "2020-12-31"), // 超出回看窗口
            record("C001", "2022-03-10"),
        ];

        let dates = HistoryExtractor::new().extract(&records, 2024, 3);

        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2022, 3, 10).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            ]
        );
    }

    #[test]
    fn test_extract_drops_malformed_dates() {
        let records = vec![
            record("C001", "2024-02-30"), // 不存在的日期
            record("C001", "not-a-date"),
            record("C001", ""),
            record("C001", "2024-02-29"), // 闰年,合法
        ];

        let dates = HistoryExtractor::new().extract(&records, 2024, 3);
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()]);
    }

    #[test]
    fn test_latest_date_ignores_window_and_malformed() {
        let records = vec![
            record("C001", "2021-01-01"),
            record("C001", "2025-05-09"),
            record("C001", "garbage"),
        ];
        let latest = HistoryExtractor::new().latest_date(&records);
        assert_eq!(latest, Some(NaiveDate::from_ymd_opt(2025, 5, 9).unwrap()));

        assert_eq!(HistoryExtractor::new().latest_date(&[]), None);
    }

    #[test]
    fn test_yearly_and_monthly_counts() {
        let extractor = HistoryExtractor::new();
        let dates = vec![
            NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 3).unwrap(),
        ];

        let yearly = extractor.yearly_counts(&dates);
        assert_eq!(
            yearly,
            vec![
                YearlyCount { year: 2023, count: 1 },
                YearlyCount { year: 2024, count: 3 },
            ]
        );

        let monthly = extractor.monthly_counts(&dates);
        assert_eq!(monthly.get(&(2024, 5)), Some(&2));
        assert_eq!(monthly.get(&(2024, 9)), Some(&1));
    }
}
