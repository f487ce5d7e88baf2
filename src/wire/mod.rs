use serde::{Deserialize, Serialize};

/// ========================================
/// Normalized gateway result
/// ========================================

/// Exactly one of `content` or `error` is meaningful: `content` is empty
/// whenever `error` is set. The dispatch gateway resolves every failure
/// path into this shape instead of letting an `Err` escape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResponse {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiResponse {
    pub fn ok(content: impl Into<String>) -> Self {
        Self { content: content.into(), error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { content: String::new(), error: Some(error.into()) }
    }
}

/// Error envelope both backends use on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

/// ========================================
/// Project analysis schema
/// ========================================

/// Shape the analysis kind asks the model to return as strict JSON.
/// Arrays default to empty so a sparse response still parses; anything
/// beyond serde's field matching is deliberately not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub licenses: Vec<LicenseInfo>,
    #[serde(default)]
    pub recommendations: Recommendations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerabilities: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseInfo {
    pub name: String,
    #[serde(default)]
    pub compatibility: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub gitignore: Vec<String>,
    #[serde(default)]
    pub readme: Vec<String>,
    #[serde(default)]
    pub license: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_response_has_empty_content() {
        let resp = AiResponse::failed("boom");
        assert_eq!(resp.error.as_deref(), Some("boom"));
        assert!(resp.content.is_empty());
    }

    #[test]
    fn sparse_analysis_still_parses() {
        let parsed: ProjectAnalysis =
            serde_json::from_str(r#"{"dependencies":[{"name":"flask"}]}"#).unwrap();
        assert_eq!(parsed.dependencies[0].name, "flask");
        assert!(parsed.licenses.is_empty());
        assert!(parsed.recommendations.gitignore.is_empty());
    }
}
