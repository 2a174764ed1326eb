// ==========================================
// 定期配送计划系统 - 年度目标估算引擎
// ==========================================
// 职责: 从各年配送次数推导未来一年的平滑目标次数
// 规则 (顺序执行):
// 1) 无任何年度数据 → 0
// 2) 基准年次数为 0 → round(全部可用年度的均值)
// 3) 否则 → round(均值) 夹取到 [floor(last*0.85), ceil(last*1.3)];
//    夹取结果 ≤ 0 时回退为 last 本身
// 保证: 输出 ≥ 0; 基准年有配送时输出 > 0
// ==========================================

use crate::domain::YearlyCount;

// ==========================================
// YearlyTargetEstimator - 年度目标估算引擎
// ==========================================
pub struct YearlyTargetEstimator {
    clamp_low: f64,  // 下限系数 (默认 0.85)
    clamp_high: f64, // 上限系数 (默认 1.3)
}

impl YearlyTargetEstimator {
    /// 创建新的年度目标估算引擎
    pub fn new(clamp_low: f64, clamp_high: f64) -> Self {
        Self {
            clamp_low,
            clamp_high,
        }
    }

    /// 估算未来一年目标配送次数
    ///
    /// # 参数
    /// - `yearly_counts`: 各年配送次数 (仅含有记录的年份)
    /// - `base_year`: 基准年 B
    pub fn estimate(&self, yearly_counts: &[YearlyCount], base_year: i32) -> u32 {
        if yearly_counts.is_empty() {
            return 0;
        }

        let last_year_count = yearly_counts
            .iter()
            .find(|y| y.year == base_year)
            .map(|y| y.count)
            .unwrap_or(0);

        let sum: u32 = yearly_counts.iter().map(|y| y.count).sum();
        let avg = f64::from(sum) / yearly_counts.len() as f64;
        let rounded_avg = avg.round() as i64;

        if last_year_count == 0 {
            return rounded_avg.max(0) as u32;
        }

        // 夹取: 单个异常年份不得引发计划的失控收缩或膨胀
        let last = f64::from(last_year_count);
        let lower = (last * self.clamp_low).floor() as i64;
        let upper = (last * self.clamp_high).ceil() as i64;
        let clamped = rounded_avg.clamp(lower, upper);

        if clamped <= 0 {
            return last_year_count;
        }

        clamped as u32
    }
}

impl Default for YearlyTargetEstimator {
    fn default() -> Self {
        Self::new(0.85, 1.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(i32, u32)]) -> Vec<YearlyCount> {
        pairs
            .iter()
            .map(|&(year, count)| YearlyCount { year, count })
            .collect()
    }

    #[test]
    fn test_no_history_yields_zero() {
        let est = YearlyTargetEstimator::default();
        assert_eq!(est.estimate(&[], 2024), 0);
    }

    #[test]
    fn test_zero_base_year_uses_average() {
        let est = YearlyTargetEstimator::default();
        // 基准年无记录: 均值 (8+6)/2 = 7
        let target = est.estimate(&counts(&[(2022, 8), (2023, 6)]), 2024);
        assert_eq!(target, 7);
    }

    #[test]
    fn test_clamp_against_low_outlier_year() {
        let est = YearlyTargetEstimator::default();
        // last=10, avg=(10+2)/2=6, 下限 floor(10*0.85)=8 → 夹到 8
        let target = est.estimate(&counts(&[(2023, 2), (2024, 10)]), 2024);
        assert_eq!(target, 8);
    }

    #[test]
    fn test_clamp_against_high_outlier_year() {
        let est = YearlyTargetEstimator::default();
        // last=4, avg=(4+20)/2=12, 上限 ceil(4*1.3)=6 → 夹到 6
        let target = est.estimate(&counts(&[(2023, 20), (2024, 4)]), 2024);
        assert_eq!(target, 6);
    }

    #[test]
    fn test_target_within_clamp_bounds_property() {
        let est = YearlyTargetEstimator::default();
        for last in 1u32..=60 {
            for past in 0u32..=60 {
                let target = est.estimate(&counts(&[(2023, past), (2024, last)]), 2024);
                let lower = (f64::from(last) * 0.85).floor() as u32;
                let upper = (f64::from(last) * 1.3).ceil() as u32;
                let in_bounds = target >= lower && target <= upper;
                assert!(
                    in_bounds || target == last,
                    "last={} past={} target={}",
                    last,
                    past,
                    target
                );
                assert!(target > 0);
            }
        }
    }

    #[test]
    fn test_single_base_year_is_identity() {
        let est = YearlyTargetEstimator::default();
        assert_eq!(est.estimate(&counts(&[(2024, 3)]), 2024), 3);
    }
}
