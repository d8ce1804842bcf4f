//! Body of `GET /health`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

/// One entry per dependency. The site has a single one: the hosted backend.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub backend: CheckStatus,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: CheckState,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl HealthResponse {
    /// Builds the report from the backend probe result.
    pub fn from_backend(reachable: bool) -> Self {
        let (status, backend) = if reachable {
            (
                ServiceStatus::Healthy,
                CheckStatus {
                    status: CheckState::Ok,
                    message: None,
                },
            )
        } else {
            (
                ServiceStatus::Degraded,
                CheckStatus {
                    status: CheckState::Error,
                    message: Some("Backend unreachable"),
                },
            )
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: HealthChecks { backend },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_degraded_report_shape() {
        let report = HealthResponse::from_backend(false);
        assert!(!report.is_healthy());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "degraded");
        assert_eq!(
            value["checks"]["backend"],
            json!({ "status": "error", "message": "Backend unreachable" })
        );
    }

    #[test]
    fn test_healthy_report_omits_message() {
        let value = serde_json::to_value(HealthResponse::from_backend(true)).unwrap();
        assert_eq!(value["checks"]["backend"], json!({ "status": "ok" }));
    }
}
