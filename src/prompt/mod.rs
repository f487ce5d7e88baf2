use regex::Regex;
use std::collections::BTreeMap;

use crate::catalog::{self, GenerationKind};
use crate::errors::ForgeError;

/// Placeholder-token name → replacement value.
pub type TokenMap = BTreeMap<String, String>;

/// The assembled prompt plus any `{token}` placeholders left untouched.
/// Leftover tokens are not an error; they travel to the backend as literal
/// braces and the caller decides whether to warn.
#[derive(Debug, Clone)]
pub struct BuiltPrompt {
    pub text: String,
    pub unresolved: Vec<String>,
}

/// Replace every `{key}` occurrence for each key in the map. Keys absent
/// from the map are left as-is.
pub fn substitute(template: &str, tokens: &TokenMap) -> String {
    let mut out = template.to_string();
    for (key, value) in tokens {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

/// Scan for `{name}` placeholders still present in an assembled prompt.
pub fn unresolved_tokens(prompt: &str) -> Vec<String> {
    let re = Regex::new(r"\{([A-Za-z][A-Za-z0-9_]*)\}").unwrap();
    re.captures_iter(prompt)
        .map(|c| c[1].to_string())
        .collect()
}

/// Assemble the one prompt string for a generation run.
///
/// Option-bearing kinds require a selected option; its template is filled
/// from `tokens` and any free text is appended on a new line. Optionless
/// kinds send the free text verbatim.
pub fn compose(
    kind: GenerationKind,
    option_id: Option<&str>,
    tokens: &TokenMap,
    free_text: Option<&str>,
) -> Result<BuiltPrompt, ForgeError> {
    let entry = catalog::entry(kind);
    let free_text = free_text.map(str::trim).filter(|t| !t.is_empty());

    let text = if entry.has_options() {
        let id = option_id
            .ok_or_else(|| ForgeError::Precondition("please select a template first".into()))?;
        let opt = entry.option(id).ok_or_else(|| {
            ForgeError::Precondition(format!("unknown template '{id}' for {kind}"))
        })?;
        let rendered = substitute(opt.prompt, tokens);
        match free_text {
            Some(extra) => format!("{rendered}\n{extra}"),
            None => rendered,
        }
    } else {
        free_text
            .ok_or_else(|| {
                ForgeError::Precondition(format!(
                    "{}: input is required ({})",
                    entry.title, entry.placeholder
                ))
            })?
            .to_string()
    };

    let unresolved = unresolved_tokens(&text);
    Ok(BuiltPrompt { text, unresolved })
}

pub fn license_tokens(project: &str, author: &str, year: &str) -> TokenMap {
    TokenMap::from([
        ("projectName".into(), project.to_string()),
        ("author".into(), author.to_string()),
        ("year".into(), year.to_string()),
    ])
}

/// Empty custom patterns become the literal fallback the catalog prompts
/// expect, not an empty line.
pub fn gitignore_tokens(custom_patterns: Option<&str>) -> TokenMap {
    let patterns = custom_patterns
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("No additional patterns");
    TokenMap::from([("customPatterns".into(), patterns.to_string())])
}

pub fn readme_context_prompt(context: &str) -> String {
    format!(
        "Generate a README.md for a project with the following context: {context}. \
         The README should include sections for Project Title, Description, Installation, \
         Usage, Contributing, and License. Make it concise and informative."
    )
}

pub fn requirements_from_script(script: &str) -> String {
    format!(
        "Given the following Python script, generate a requirements.txt file listing all \
         the necessary dependencies:\n\n{script}\n\nOnly include direct dependencies, not \
         built-in modules. Format the output as a valid requirements.txt file."
    )
}

pub fn requirements_from_code(code: &str) -> String {
    format!(
        "Analyze the following code and generate a comprehensive requirements.txt or \
         package.json file with all necessary dependencies and their versions. Include \
         both direct dependencies and dev dependencies. Here's the code:\n\n{code}"
    )
}

pub fn analysis_prompt(code: &str) -> String {
    format!(
        "Analyze this code and provide recommendations for:\n\
         1. Required dependencies and potential vulnerabilities\n\
         2. Suitable license based on dependencies\n\
         3. Recommended .gitignore patterns\n\
         4. Important README sections\n\n\
         Code:\n{code}\n\n\
         Return the analysis in a structured JSON format."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_token_map_leaves_no_placeholders() {
        for kind in GenerationKind::ALL {
            for opt in catalog::entry(kind).options {
                let tokens: TokenMap = unresolved_tokens(opt.prompt)
                    .into_iter()
                    .map(|name| (name, "value".to_string()))
                    .collect();
                let rendered = substitute(opt.prompt, &tokens);
                for key in tokens.keys() {
                    assert!(
                        !rendered.contains(&format!("{{{key}}}")),
                        "{kind}/{} leaked {key}",
                        opt.id
                    );
                }
            }
        }
    }

    #[test]
    fn missing_value_passes_through_and_is_reported() {
        let mut tokens = license_tokens("Acme", "J. Doe", "2024");
        tokens.remove("year");
        let built = compose(GenerationKind::License, Some("mit"), &tokens, None).unwrap();
        assert!(built.text.contains("{year}"));
        assert_eq!(built.unresolved, vec!["year"]);
    }

    #[test]
    fn gitignore_prompt_carries_template_and_patterns() {
        let built = compose(
            GenerationKind::Gitignore,
            Some("python"),
            &gitignore_tokens(Some("*.log, .env")),
            None,
        )
        .unwrap();
        assert!(built.text.contains("Python"));
        assert!(built.text.contains("*.log, .env"));
        assert!(built.unresolved.is_empty());
    }

    #[test]
    fn empty_patterns_use_fallback_text() {
        let built = compose(
            GenerationKind::Gitignore,
            Some("node"),
            &gitignore_tokens(Some("   ")),
            None,
        )
        .unwrap();
        assert!(built.text.contains("No additional patterns"));
    }

    #[test]
    fn license_prompt_interpolates_all_fields() {
        let built = compose(
            GenerationKind::License,
            Some("mit"),
            &license_tokens("Acme", "J. Doe", "2024"),
            None,
        )
        .unwrap();
        for literal in ["Acme", "J. Doe", "2024"] {
            assert!(built.text.contains(literal));
        }
        assert!(built.unresolved.is_empty());
    }

    #[test]
    fn option_prompt_appends_free_text_with_newline() {
        let built = compose(
            GenerationKind::CodeGen,
            Some("unit-test"),
            &TokenMap::new(),
            Some("fn add(a: i32, b: i32) -> i32 { a + b }"),
        )
        .unwrap();
        assert!(built.text.starts_with("Generate a unit test"));
        assert!(built.text.contains("\nfn add"));
    }

    #[test]
    fn option_required_when_entry_has_options() {
        let err = compose(GenerationKind::Readme, None, &TokenMap::new(), Some("ctx"));
        assert!(matches!(err, Err(ForgeError::Precondition(_))));
    }

    #[test]
    fn optionless_kind_requires_free_text() {
        let err = compose(GenerationKind::Requirements, None, &TokenMap::new(), None);
        assert!(matches!(err, Err(ForgeError::Precondition(_))));
        let ok = compose(GenerationKind::Requirements, None, &TokenMap::new(), Some("flask"));
        assert_eq!(ok.unwrap().text, "flask");
    }
}
