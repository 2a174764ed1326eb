// ==========================================
// 定期配送计划系统 - 固定周期回退引擎
// ==========================================
// 职责: 历史稀疏客户的相位保持式下次日期推算
// 规则: next = last + cycle; next ≤ today 时不断 += cycle。
//       日程锚定在历史配送日上按整周期步进,绝不重置为 today + cycle,
//       从而保持客户既有的周期内相位
// ==========================================

use chrono::{Duration, NaiveDate};

// ==========================================
// FallbackCycler - 固定周期回退引擎
// ==========================================
pub struct FallbackCycler;

impl FallbackCycler {
    /// 创建新的固定周期回退引擎
    pub fn new() -> Self {
        Self
    }

    /// 推算下一个配送日 (严格晚于 today)
    ///
    /// # 参数
    /// - `last_date`: 最后一次已知配送日
    /// - `cycle_days`: 固定周期(天), 非正值按 1 处理
    /// - `today`: 今天
    pub fn next_date(&self, last_date: NaiveDate, cycle_days: i64, today: NaiveDate) -> NaiveDate {
        let cycle = Duration::days(cycle_days.max(1));

        let mut next = last_date + cycle;
        while next <= today {
            next += cycle;
        }
        next
    }

    /// 从给定首日起按周期步进,收集到窗口终点为止 (含 first 与 end)
    ///
    /// 本地相位保持路径与远端建议锚点路径共用同一个步进循环
    pub fn dates_from(&self, first: NaiveDate, cycle_days: i64, end: NaiveDate) -> Vec<NaiveDate> {
        let cycle = Duration::days(cycle_days.max(1));

        let mut dates = Vec::new();
        let mut next = first;
        while next <= end {
            dates.push(next);
            next += cycle;
        }
        dates
    }

    /// 周年变体: 从相位保持的下一日起按周期步进,直到越过窗口边界
    ///
    /// # 返回
    /// - (today, today+horizon] 内的升序日期列表
    pub fn planned_dates(
        &self,
        last_date: NaiveDate,
        cycle_days: i64,
        today: NaiveDate,
        horizon_days: i64,
    ) -> Vec<NaiveDate> {
        let first = self.next_date(last_date, cycle_days, today);
        self.dates_from(first, cycle_days, today + Duration::days(horizon_days))
    }
}

impl Default for FallbackCycler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_phase_preservation() {
        // last=2024-01-10, cycle=38, today=2024-02-20:
        // 候选 2024-02-17 ≤ today → 继续步进到 2024-03-26
        let cycler = FallbackCycler::new();
        let next = cycler.next_date(d(2024, 1, 10), 38, d(2024, 2, 20));
        assert_eq!(next, d(2024, 3, 26));
    }

    #[test]
    fn test_next_date_not_anchored_to_today() {
        let cycler = FallbackCycler::new();
        // 相位保持: 不同的 today 只要落在同一周期区间,结果一致
        let a = cycler.next_date(d(2024, 1, 10), 38, d(2024, 2, 18));
        let b = cycler.next_date(d(2024, 1, 10), 38, d(2024, 3, 25));
        assert_eq!(a, d(2024, 3, 26));
        assert_eq!(b, d(2024, 3, 26));
    }

    #[test]
    fn test_planned_dates_year_variant() {
        let cycler = FallbackCycler::new();
        let dates = cycler.planned_dates(d(2024, 1, 10), 42, d(2024, 2, 20), 370);

        assert!(!dates.is_empty());
        // 首日保持相位: 2024-01-10 + 42 = 2024-02-21 > today
        assert_eq!(dates[0], d(2024, 2, 21));
        // 相邻日期间隔恒为整周期
        for w in dates.windows(2) {
            assert_eq!((w[1] - w[0]).num_days(), 42);
        }
        // 全部落在窗口内
        let end = d(2024, 2, 20) + Duration::days(370);
        assert!(dates.iter().all(|x| *x > d(2024, 2, 20) && *x <= end));
    }

    #[test]
    fn test_dates_from_steps_whole_cycles_to_end() {
        let cycler = FallbackCycler::new();
        let dates = cycler.dates_from(d(2025, 7, 1), 42, d(2025, 10, 1));

        // 首日与终点均含: 07-01, 08-12, 09-23
        assert_eq!(dates, vec![d(2025, 7, 1), d(2025, 8, 12), d(2025, 9, 23)]);

        // 首日已越过终点 → 空列表
        assert!(cycler.dates_from(d(2025, 10, 2), 42, d(2025, 10, 1)).is_empty());
    }

    #[test]
    fn test_degenerate_cycle_terminates() {
        let cycler = FallbackCycler::new();
        // 非正周期按 1 天处理,保证循环终止
        let next = cycler.next_date(d(2024, 1, 1), 0, d(2024, 1, 5));
        assert_eq!(next, d(2024, 1, 6));
    }
}
