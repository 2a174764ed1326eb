// ==========================================
// 定期配送计划系统 - 月内日期铺排引擎
// ==========================================
// 职责: 把单月的配送次数均匀铺排到该月的日子上
// 规则: step = 月天数 / c; day_i = round(i*step + step/2), 夹取到 [1, 月天数]
// 边界: c ≤ 0 → 空; 极端夹取下允许日碰撞 (本阶段不去重)
// ==========================================

use chrono::NaiveDate;

// ==========================================
// DateSpacer - 月内日期铺排引擎
// ==========================================
pub struct DateSpacer;

impl DateSpacer {
    /// 某年某月的天数
    pub fn days_in_month(year: i32, month: u32) -> u32 {
        let (next_y, next_m) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        // month 合法时两个首日都存在
        let first = NaiveDate::from_ymd_opt(year, month, 1).expect("非法月份");
        let next_first = NaiveDate::from_ymd_opt(next_y, next_m, 1).expect("非法月份");
        (next_first - first).num_days() as u32
    }

    /// 把 count 次配送均匀铺排到指定月份
    ///
    /// # 返回
    /// - 恰好 count 个日期,日值均落在 [1, 月天数] 内
    pub fn spread(year: i32, month: u32, count: u32) -> Vec<NaiveDate> {
        if count == 0 {
            return Vec::new();
        }

        let dim = Self::days_in_month(year, month);
        let step = f64::from(dim) / f64::from(count);

        (0..count)
            .map(|i| {
                let day = (f64::from(i) * step + step / 2.0).round() as i64;
                let day = day.clamp(1, i64::from(dim)) as u32;
                NaiveDate::from_ymd_opt(year, month, day).expect("夹取后的日值必然合法")
            })
            .collect()
    }
}
