// ==========================================
// 定期配送计划系统 - 计划窗口拼装引擎
// ==========================================
// 职责: 把月度分配串接为有界升序的计划日期列表
// 规则: 从起始日所在月逐月前进,直到月首超出 start + horizon;
//       每月调用日期铺排引擎,结果过滤到闭区间 [start, start+horizon],
//       升序排序并去重 (ForecastResult 不变式)
// ==========================================

use crate::engine::spacing::DateSpacer;
use chrono::{Datelike, Duration, NaiveDate};

// ==========================================
// HorizonAssembler - 计划窗口拼装引擎
// ==========================================
pub struct HorizonAssembler {
    horizon_days: i64, // 计划窗口长度(天), 默认 370
}

impl HorizonAssembler {
    /// 创建新的计划窗口拼装引擎
    pub fn new(horizon_days: i64) -> Self {
        Self { horizon_days }
    }

    /// 拼装计划日期列表
    ///
    /// # 参数
    /// - `monthly_counts`: 月度分配 (下标 0 = 1月)
    /// - `start`: 起始日 (通常为今天)
    ///
    /// # 返回
    /// - [start, start+horizon] 内的严格升序无重复日期列表
    pub fn assemble(&self, monthly_counts: &[u32; 12], start: NaiveDate) -> Vec<NaiveDate> {
        let end = start + Duration::days(self.horizon_days);

        let mut dates: Vec<NaiveDate> = Vec::new();
        let mut year = start.year();
        let mut month = start.month();

        loop {
            let month_first = NaiveDate::from_ymd_opt(year, month, 1).expect("非法月份");
            if month_first > end {
                break;
            }

            let count = monthly_counts[(month - 1) as usize];
            dates.extend(DateSpacer::spread(year, month, count));

            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }

        dates.retain(|d| *d >= start && *d <= end);
        dates.sort_unstable();
        dates.dedup();
        dates
    }
}

impl Default for HorizonAssembler {
    fn default() -> Self {
        Self::new(370)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_assemble_bounds_and_order() {
        let assembler = HorizonAssembler::new(370);
        let monthly = [1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let start = d(2025, 6, 1);

        let dates = assembler.assemble(&monthly, start);
        let end = start + Duration::days(370);

        assert!(!dates.is_empty());
        for w in dates.windows(2) {
            assert!(w[0] < w[1], "必须严格升序: {:?}", dates);
        }
        for date in &dates {
            assert!(*date >= start && *date <= end);
        }

        // 窗口覆盖 2026 年 1-3 月各一次 (2025 年 1-3 月已过)
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0], d(2026, 1, 16));
        assert_eq!(dates[1], d(2026, 2, 14));
        assert_eq!(dates[2], d(2026, 3, 16));
    }

    #[test]
    fn test_assemble_filters_dates_before_start() {
        let assembler = HorizonAssembler::new(370);
        let monthly = [0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0];
        // 起始日在 6 月下旬: 当月早于 start 的铺排日期必须被过滤
        let start = d(2025, 6, 20);

        let dates = assembler.assemble(&monthly, start);
        for date in &dates {
            assert!(*date >= start);
        }
        // 2025-06 的第二个点 (6/23) 保留, 2026-06 两个点均在窗口内
        assert_eq!(dates.len(), 3);
    }

    #[test]
    fn test_assemble_empty_allocation() {
        let assembler = HorizonAssembler::default();
        assert!(assembler.assemble(&[0; 12], d(2025, 1, 1)).is_empty());
    }

    #[test]
    fn test_assemble_deterministic() {
        let assembler = HorizonAssembler::default();
        let monthly = [2, 1, 0, 1, 0, 0, 3, 0, 0, 1, 0, 2];
        let start = d(2025, 4, 15);

        let a = assembler.assemble(&monthly, start);
        let b = assembler.assemble(&monthly, start);
        assert_eq!(a, b);
    }
}
