// ==========================================
// 定期配送计划系统 - 远端周期顾问客户端
// ==========================================
// 职责: 调用可选的同用途远端接口获取下次配送日建议
// 契约: POST {lastDate, cycleDays} → {ok, next}
// 红线: 任何失败 (非 2xx/响应畸形/超时/未配置) 一律静默回退本地计算,
//       远端调用对正确性永远不是必需的
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DATE_FMT: &str = "%Y-%m-%d";
const REQUEST_TIMEOUT_SECS: u64 = 3;

// ==========================================
// 请求/响应载荷
// ==========================================
#[derive(Debug, Serialize)]
struct CycleAdviceRequest {
    #[serde(rename = "lastDate")]
    last_date: String,
    #[serde(rename = "cycleDays")]
    cycle_days: i64,
}

#[derive(Debug, Deserialize)]
struct CycleAdviceResponse {
    ok: bool,
    next: Option<String>,
}

// ==========================================
// RemoteCycleAdvisor - 远端周期顾问
// ==========================================
pub struct RemoteCycleAdvisor {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteCycleAdvisor {
    /// 创建新的远端周期顾问客户端
    pub fn new(endpoint: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self { client, endpoint }
    }

    /// 咨询下次配送日建议
    ///
    /// # 返回
    /// - `Some(date)`: 远端给出的合法建议
    /// - `None`: 任何失败,调用方必须回退本地回退周期计算
    pub async fn next_date(&self, last_date: NaiveDate, cycle_days: i64) -> Option<NaiveDate> {
        let payload = CycleAdviceRequest {
            last_date: last_date.format(DATE_FMT).to_string(),
            cycle_days,
        };

        let response = match self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "远端周期顾问请求失败,回退本地计算");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(status = %response.status(), "远端周期顾问返回非 2xx,回退本地计算");
            return None;
        }

        let body: CycleAdviceResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                debug!(error = %e, "远端周期顾问响应畸形,回退本地计算");
                return None;
            }
        };

        if !body.ok {
            debug!("远端周期顾问返回 ok=false,回退本地计算");
            return None;
        }

        match body.next.as_deref().map(|s| NaiveDate::parse_from_str(s, DATE_FMT)) {
            Some(Ok(d)) => Some(d),
            _ => {
                debug!("远端周期顾问 next 字段缺失或无法解析,回退本地计算");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_none() {
        // 未监听的本地端口: 连接失败必须静默返回 None
        let advisor = RemoteCycleAdvisor::new("http://127.0.0.1:1/advice".to_string());
        let next = advisor
            .next_date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(), 42)
            .await;
        assert!(next.is_none());
    }

    #[test]
    fn test_request_payload_field_names() {
        let payload = CycleAdviceRequest {
            last_date: "2024-01-10".to_string(),
            cycle_days: 38,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["lastDate"], "2024-01-10");
        assert_eq!(json["cycleDays"], 38);
    }
}
