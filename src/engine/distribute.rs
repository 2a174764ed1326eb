// ==========================================
// 定期配送计划系统 - 月度分配引擎
// ==========================================
// 职责: 按历史季节性把年度目标拆分为 12 个月的次数
// 规则:
// 1) weight[m] = w_last * count(基准年, m) + w_past * count(其余年份合计, m)
// 2) 归一化为份额; 总权重为 0 时退化为均匀 1/12
// 3) 份额 * 目标值逐月四舍五入
// 4) 舍入余数逐单位再分配: 从 1 月起循环递增/递减 (递减仅限次数 > 0 的月份),
//    至余数归零或轮转 36 圈为止
// 保证: 常规输入下 sum(monthly_counts) == target;
//       病态输入 (大负余数对几乎全零分配) 由圈数上限终止,不保证精确收敛
// ==========================================

use chrono::{Datelike, NaiveDate};

/// 余数再分配的轮转圈数上限
const REDISTRIBUTE_MAX_CYCLES: u32 = 36;

// ==========================================
// MonthlyDistributor - 月度分配引擎
// ==========================================
pub struct MonthlyDistributor {
    w_last: f64, // 基准年权重 (默认 0.7)
    w_past: f64, // 其余年份权重 (默认 0.3)
}

impl MonthlyDistributor {
    /// 创建新的月度分配引擎
    pub fn new(w_last: f64, w_past: f64) -> Self {
        Self { w_last, w_past }
    }

    /// 把年度目标分配到 12 个月
    ///
    /// # 参数
    /// - `dates`: 历史配送日期 (提取引擎输出)
    /// - `base_year`: 基准年 B
    /// - `target_year_count`: 年度目标次数
    ///
    /// # 返回
    /// - 月度次数数组 (下标 0 = 1月)
    pub fn distribute(
        &self,
        dates: &[NaiveDate],
        base_year: i32,
        target_year_count: u32,
    ) -> [u32; 12] {
        if target_year_count == 0 {
            return [0; 12];
        }

        // 1. 季节性权重
        let mut weights = [0.0f64; 12];
        for d in dates {
            let m = (d.month() - 1) as usize;
            if d.year() == base_year {
                weights[m] += self.w_last;
            } else {
                weights[m] += self.w_past;
            }
        }

        // 2. 归一化; 无季节信号时均匀分布
        let total: f64 = weights.iter().sum();
        let shares: [f64; 12] = if total > 0.0 {
            let mut s = [0.0f64; 12];
            for (i, w) in weights.iter().enumerate() {
                s[i] = w / total;
            }
            s
        } else {
            [1.0 / 12.0; 12]
        };

        // 3. 逐月四舍五入
        let target = f64::from(target_year_count);
        let mut counts = [0u32; 12];
        for m in 0..12 {
            counts[m] = (shares[m] * target).round() as u32;
        }

        // 4. 余数再分配
        let allocated: i64 = counts.iter().map(|&c| i64::from(c)).sum();
        let mut remainder = i64::from(target_year_count) - allocated;

        let mut cycles = 0;
        while remainder != 0 && cycles < REDISTRIBUTE_MAX_CYCLES {
            for m in 0..12 {
                if remainder == 0 {
                    break;
                }
                if remainder > 0 {
                    counts[m] += 1;
                    remainder -= 1;
                } else if counts[m] > 0 {
                    counts[m] -= 1;
                    remainder += 1;
                }
            }
            cycles += 1;
        }

        counts
    }
}

impl Default for MonthlyDistributor {
    fn default() -> Self {
        Self::new(0.7, 0.3)
    }
}
