use anyhow::Result;
use fs_err as fs;
use std::path::{Path, PathBuf};

use crate::catalog::GenerationKind;

pub const TEMPLATE_EXPORT_FILENAME: &str = "devforge-templates.json";

/// Write generated text to the requested path, or to the kind's default
/// filename in the current directory.
pub fn write_artifact(
    kind: GenerationKind,
    content: &str,
    target: Option<&Path>,
) -> Result<PathBuf> {
    let path = match target {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(kind.output_filename()),
    };
    fs::write(&path, content)?;
    Ok(path)
}

/// Derive the one-liner that installs everything a generated
/// requirements.txt lists. Comment and blank lines are ignored; version
/// specifiers are kept as written.
pub fn derive_install_command(requirements: &str) -> Option<String> {
    let packages: Vec<&str> = requirements
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();

    if packages.is_empty() {
        return None;
    }
    Some(format!("pip install {}", packages.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_to_explicit_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out/.gitignore");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        let written = write_artifact(GenerationKind::Gitignore, "*.log\n", Some(&target)).unwrap();
        assert_eq!(written, target);
        assert_eq!(fs::read_to_string(&written).unwrap(), "*.log\n");
    }

    #[test]
    fn install_command_skips_comments_and_blanks() {
        let reqs = "# Dependencies\nflask==3.0\n\nrequests\n";
        assert_eq!(
            derive_install_command(reqs).unwrap(),
            "pip install flask==3.0 requests"
        );
    }

    #[test]
    fn empty_requirements_yield_no_command() {
        assert!(derive_install_command("# nothing here\n").is_none());
    }
}
