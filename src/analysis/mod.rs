use crate::errors::ForgeError;
use crate::provider::strip_code_fence;
use crate::wire::ProjectAnalysis;

/// Parse the model's analysis answer as strict JSON. Tries the whole
/// (fence-stripped) text first, then falls back to the first top-level
/// `{...}` object in case the model added prose around it.
pub fn parse_analysis(content: &str) -> Result<ProjectAnalysis, ForgeError> {
    let cleaned = strip_code_fence(content.trim());

    match serde_json::from_str::<ProjectAnalysis>(cleaned) {
        Ok(parsed) => Ok(parsed),
        Err(first_err) => {
            if let Some(obj) = extract_first_json_object(cleaned) {
                if let Ok(parsed) = serde_json::from_str::<ProjectAnalysis>(&obj) {
                    return Ok(parsed);
                }
            }
            Err(ForgeError::Response(format!(
                "failed to parse analysis response as JSON: {first_err}"
            )))
        }
    }
}

/// Extracts the first top-level JSON object substring from a string.
/// Handles nested braces; returns None if not found.
fn extract_first_json_object(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut start = None;
    let mut depth = 0usize;

    for (i, &b) in bytes.iter().enumerate() {
        if b == b'{' {
            if start.is_none() {
                start = Some(i);
            }
            depth += 1;
        } else if b == b'}' {
            if depth > 0 {
                depth -= 1;
                if depth == 0 {
                    if let Some(st) = start {
                        let slice = &s[st..=i];
                        return Some(slice.to_string());
                    }
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "dependencies": [{"name": "flask", "version": "3.0", "vulnerabilities": ["CVE-2024-1"]}],
        "licenses": [{"name": "MIT", "compatibility": ["Apache-2.0"]}],
        "recommendations": {"gitignore": ["*.pyc"], "readme": ["Usage"], "license": ["MIT"]}
    }"#;

    #[test]
    fn parses_bare_json() {
        let a = parse_analysis(SAMPLE).unwrap();
        assert_eq!(a.dependencies[0].name, "flask");
        assert_eq!(a.recommendations.gitignore, vec!["*.pyc"]);
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let wrapped = format!("Here is the analysis you asked for:\n{SAMPLE}\nHope that helps!");
        let a = parse_analysis(&wrapped).unwrap();
        assert_eq!(a.licenses[0].name, "MIT");
    }

    #[test]
    fn parses_fenced_json() {
        let fenced = format!("```\n{SAMPLE}\n```");
        assert!(parse_analysis(&fenced).is_ok());
    }

    #[test]
    fn non_json_is_a_response_error() {
        let err = parse_analysis("I cannot analyze this.").unwrap_err();
        assert!(matches!(err, ForgeError::Response(_)));
    }
}
