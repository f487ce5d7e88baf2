use anyhow::{Context, Result};
use chrono::Utc;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::errors::ForgeError;

/// A user-saved template. Mutated in place by updates, which also refresh
/// `last_modified`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTemplate {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub content: String,
    pub tags: Vec<String>,
    pub category: String,
    pub user_id: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    pub last_modified: i64,
}

/// Fields an update may touch; `None` leaves the current value.
#[derive(Debug, Default, Clone)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
}

pub struct TemplateStore {
    path: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join("templates.json") }
    }

    pub fn load(&self) -> Vec<CustomTemplate> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    pub fn add(
        &self,
        name: &str,
        description: &str,
        content: &str,
        tags: Vec<String>,
        category: &str,
    ) -> Result<CustomTemplate> {
        let now = Utc::now().timestamp_millis();
        let template = CustomTemplate {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.to_string(),
            content: content.to_string(),
            tags,
            category: category.to_string(),
            user_id: "local".into(),
            created_at: now,
            last_modified: now,
        };

        let mut templates = self.load();
        templates.push(template.clone());
        self.save(&templates)?;
        Ok(template)
    }

    pub fn update(&self, id: Uuid, changes: TemplateUpdate) -> Result<CustomTemplate> {
        let mut templates = self.load();
        let template = templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ForgeError::Store(format!("no template with id {id}")))?;

        if let Some(name) = changes.name {
            template.name = name;
        }
        if let Some(description) = changes.description {
            template.description = description;
        }
        if let Some(content) = changes.content {
            template.content = content;
        }
        if let Some(tags) = changes.tags {
            template.tags = tags;
        }
        if let Some(category) = changes.category {
            template.category = category;
        }
        template.last_modified = Utc::now().timestamp_millis();

        let updated = template.clone();
        self.save(&templates)?;
        Ok(updated)
    }

    pub fn delete(&self, id: Uuid) -> Result<()> {
        let mut templates = self.load();
        let before = templates.len();
        templates.retain(|t| t.id != id);
        if templates.len() == before {
            return Err(ForgeError::Store(format!("no template with id {id}")).into());
        }
        self.save(&templates)
    }

    /// Pretty-printed JSON export of the whole collection.
    pub fn export_to(&self, target: &Path) -> Result<usize> {
        let templates = self.load();
        fs::write(target, serde_json::to_string_pretty(&templates)?)?;
        Ok(templates.len())
    }

    /// Import templates from an export file. Entries whose id is already
    /// present are skipped, so re-importing an export is a no-op.
    pub fn import_from(&self, source: &Path) -> Result<usize> {
        let raw = fs::read_to_string(source)
            .with_context(|| format!("failed to read {}", source.display()))?;
        let incoming: Vec<CustomTemplate> = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a valid template export", source.display()))?;

        let mut templates = self.load();
        let known: HashSet<Uuid> = templates.iter().map(|t| t.id).collect();
        let fresh: Vec<CustomTemplate> = incoming
            .into_iter()
            .filter(|t| !known.contains(&t.id))
            .collect();
        let imported = fresh.len();
        templates.extend(fresh);
        self.save(&templates)?;
        Ok(imported)
    }

    fn save(&self, templates: &[CustomTemplate]) -> Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(templates)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> TemplateStore {
        TemplateStore::new(dir)
    }

    #[test]
    fn export_import_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store
            .add("api", "rest scaffold", "# api", vec!["rust".into()], "readme")
            .unwrap();
        store
            .add("lib", "library scaffold", "# lib", vec![], "readme")
            .unwrap();
        let original = store.load();

        let export = dir.path().join("export.json");
        assert_eq!(store.export_to(&export).unwrap(), 2);

        let other_dir = tempfile::tempdir().unwrap();
        let other = store_in(other_dir.path());
        assert_eq!(other.import_from(&export).unwrap(), 2);
        assert_eq!(other.load(), original);
    }

    #[test]
    fn reimport_skips_existing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.add("a", "", "x", vec![], "misc").unwrap();

        let export = dir.path().join("export.json");
        store.export_to(&export).unwrap();
        assert_eq!(store.import_from(&export).unwrap(), 0);
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn update_touches_only_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let saved = store.add("a", "desc", "body", vec![], "misc").unwrap();

        let updated = store
            .update(
                saved.id,
                TemplateUpdate { content: Some("new body".into()), ..Default::default() },
            )
            .unwrap();

        assert_eq!(updated.content, "new body");
        assert_eq!(updated.name, "a");
        assert!(updated.last_modified >= saved.last_modified);
    }

    #[test]
    fn delete_unknown_id_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.delete(Uuid::new_v4()).is_err());
    }
}
