// ==========================================
// 定期配送计划系统 - 路线排序领域模型
// ==========================================
// 职责: 单日配送站点与路线结果的实体定义
// 说明: 坐标由外部地理编码服务提供,本核心不做解析
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// GeoPoint - 经纬度坐标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64, // 纬度
    pub lng: f64, // 经度
}

// ==========================================
// Stop - 配送站点
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub stop_id: String, // 站点ID (通常为 customer_id)
    pub lat: f64,        // 纬度
    pub lng: f64,        // 经度
}

impl Stop {
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

// ==========================================
// RouteResult - 路线排序结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub ordered: Vec<Stop>, // 访问顺序
    pub total_km: f64,      // 路径总长(km), 含可选回程段
}
