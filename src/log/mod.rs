use fs_err as fs;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::cli::ModelKind;
use crate::wire::AiResponse;

pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
}

#[derive(Serialize)]
struct RequestArtifact<'a> {
    model: ModelKind,
    prompt: &'a str,
}

fn tx_dir(data_dir: &Path, tx: Uuid) -> PathBuf {
    data_dir.join("tx").join(tx.to_string())
}

/// Persist the prompt and the normalized response of one generation
/// transaction for later inspection.
pub fn save_generation(
    stage: &str,
    model: ModelKind,
    prompt: &str,
    resp: &AiResponse,
    tx: Uuid,
    data_dir: &Path,
    save_request: bool,
    save_response: bool,
) -> anyhow::Result<SavedPaths> {
    let dir = tx_dir(data_dir, tx);
    fs::create_dir_all(&dir)?;

    let mut request_path = None;
    let mut response_path = None;

    if save_request {
        let p = dir.join(format!("{stage}.request.json"));
        fs::write(&p, to_string_pretty(&RequestArtifact { model, prompt })?)?;
        request_path = Some(p);
    }

    if save_response {
        let p = dir.join(format!("{stage}.response.json"));
        fs::write(&p, to_string_pretty(resp)?)?;
        response_path = Some(p);
    }

    Ok(SavedPaths { dir, request: request_path, response: response_path })
}

pub fn print_saved_paths(stage: &str, saved: &SavedPaths) {
    println!("debug[{stage}]: artifacts directory: {}", saved.dir.display());
    if let Some(p) = &saved.request {
        println!("debug[{stage}]: request saved at: {}", p.display());
    } else {
        println!("debug[{stage}]: request not saved (flag off)");
    }
    if let Some(p) = &saved.response {
        println!("debug[{stage}]: response saved at: {}", p.display());
    } else {
        println!("debug[{stage}]: response not saved (flag off)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saves_request_and_response_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let tx = Uuid::new_v4();
        let resp = AiResponse::ok("generated");

        let saved = save_generation(
            "readme",
            ModelKind::Gemini,
            "a prompt",
            &resp,
            tx,
            dir.path(),
            true,
            true,
        )
        .unwrap();

        let req = fs::read_to_string(saved.request.unwrap()).unwrap();
        assert!(req.contains("a prompt"));
        let rsp = fs::read_to_string(saved.response.unwrap()).unwrap();
        assert!(rsp.contains("generated"));
    }

    #[test]
    fn flags_off_save_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save_generation(
            "license",
            ModelKind::Xai,
            "p",
            &AiResponse::failed("nope"),
            Uuid::new_v4(),
            dir.path(),
            false,
            false,
        )
        .unwrap();
        assert!(saved.request.is_none());
        assert!(saved.response.is_none());
    }
}
