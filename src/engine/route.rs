// ==========================================
// 定期配送计划系统 - 路线排序引擎
// ==========================================
// 职责: 单日配送站点的贪婪最近邻排序
// 规则: 从仓库出发,反复选取距当前位置大圆距离最小的未访问站点
// 说明: O(n²) 且有意非最优,不做 2-opt 等改进
// ==========================================

use crate::domain::{GeoPoint, PlanEntry, RouteResult, Stop};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::instrument;

/// 地球半径(km), haversine 公式用
const EARTH_RADIUS_KM: f64 = 6371.0;

/// 两点间大圆距离 (haversine, 单位 km)
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

// ==========================================
// RouteSequencer - 路线排序引擎
// ==========================================
pub struct RouteSequencer {
    return_to_depot: bool, // 是否把回程段计入总路程
}

impl RouteSequencer {
    /// 创建新的路线排序引擎
    pub fn new(return_to_depot: bool) -> Self {
        Self { return_to_depot }
    }

    /// 贪婪最近邻排序
    ///
    /// # 参数
    /// - `depot`: 仓库坐标 (出发点)
    /// - `stops`: 当日站点集合
    ///
    /// # 返回
    /// - 访问顺序 + 路径总长(km)
    #[instrument(skip(self, stops), fields(stop_count = stops.len()))]
    pub fn sequence(&self, depot: GeoPoint, stops: Vec<Stop>) -> RouteResult {
        let mut remaining = stops;
        let mut ordered = Vec::with_capacity(remaining.len());
        let mut current = depot;
        let mut total_km = 0.0;

        while !remaining.is_empty() {
            let (best_idx, best_dist) = remaining
                .iter()
                .enumerate()
                .map(|(i, s)| (i, haversine_km(current, s.point())))
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .expect("remaining 非空");

            let stop = remaining.swap_remove(best_idx);
            current = stop.point();
            total_km += best_dist;
            ordered.push(stop);
        }

        if self.return_to_depot && !ordered.is_empty() {
            total_km += haversine_km(current, depot);
        }

        RouteResult { ordered, total_km }
    }

    /// 对某一天的计划条目排序
    ///
    /// 站点坐标由外部地理编码结果提供; 无坐标的条目跳过 (不在本核心内解析地址)
    pub fn sequence_day(
        &self,
        depot: GeoPoint,
        entries: &[PlanEntry],
        coordinates: &HashMap<String, GeoPoint>,
        date: NaiveDate,
    ) -> RouteResult {
        let stops: Vec<Stop> = entries
            .iter()
            .filter(|e| e.date == date)
            .filter_map(|e| {
                coordinates.get(&e.customer_id).map(|p| Stop {
                    stop_id: e.customer_id.clone(),
                    lat: p.lat,
                    lng: p.lng,
                })
            })
            .collect();

        self.sequence(depot, stops)
    }
}

impl Default for RouteSequencer {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, lat: f64, lng: f64) -> Stop {
        Stop {
            stop_id: id.to_string(),
            lat,
            lng,
        }
    }

    #[test]
    fn test_haversine_zero_distance() {
        let p = GeoPoint { lat: 34.0, lng: 132.0 };
        assert!(haversine_km(p, p).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_known_magnitude() {
        // 纬度 1 度 ≈ 111 km
        let a = GeoPoint { lat: 34.0, lng: 132.0 };
        let b = GeoPoint { lat: 35.0, lng: 132.0 };
        let d = haversine_km(a, b);
        assert!((d - 111.2).abs() < 1.0, "d={}", d);
    }

    #[test]
    fn test_nearest_neighbor_order() {
        // 仓库 (34.0,132.0); A 偏北 0.01 度 (~1.1km), B 偏东 0.05 度 (~4.6km)
        let depot = GeoPoint { lat: 34.0, lng: 132.0 };
        let stops = vec![stop("B", 34.00, 132.05), stop("A", 34.01, 132.00)];

        let result = RouteSequencer::default().sequence(depot, stops);

        let ids: Vec<&str> = result.ordered.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert!(result.total_km > 0.0);
    }

    #[test]
    fn test_return_leg_increases_total() {
        let depot = GeoPoint { lat: 34.0, lng: 132.0 };
        let stops = vec![stop("A", 34.01, 132.00), stop("B", 34.00, 132.05)];

        let one_way = RouteSequencer::new(false).sequence(depot, stops.clone());
        let round_trip = RouteSequencer::new(true).sequence(depot, stops);

        assert_eq!(
            one_way.ordered.iter().map(|s| &s.stop_id).collect::<Vec<_>>(),
            round_trip.ordered.iter().map(|s| &s.stop_id).collect::<Vec<_>>()
        );
        assert!(round_trip.total_km > one_way.total_km);
    }

    #[test]
    fn test_sequence_day_filters_by_date_and_known_coordinates() {
        let depot = GeoPoint { lat: 34.0, lng: 132.0 };
        let day = chrono::NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let other_day = chrono::NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();

        let entries = vec![
            PlanEntry::new("C001", day),
            PlanEntry::new("C002", day),
            PlanEntry::new("C003", other_day), // 非当日
            PlanEntry::new("C004", day),       // 无坐标
        ];
        let mut coords = HashMap::new();
        coords.insert("C001".to_string(), GeoPoint { lat: 34.01, lng: 132.00 });
        coords.insert("C002".to_string(), GeoPoint { lat: 34.00, lng: 132.05 });
        coords.insert("C003".to_string(), GeoPoint { lat: 34.02, lng: 132.02 });

        let result = RouteSequencer::default().sequence_day(depot, &entries, &coords, day);
        let ids: Vec<&str> = result.ordered.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(ids, vec!["C001", "C002"]);
    }

    #[test]
    fn test_empty_stops() {
        let depot = GeoPoint { lat: 34.0, lng: 132.0 };
        let result = RouteSequencer::new(true).sequence(depot, vec![]);
        assert!(result.ordered.is_empty());
        assert_eq!(result.total_km, 0.0);
    }
}
