//! File I/O and configuration for the terminal host.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use spanmark_core::{Document, DocumentStatus, ProjectSchema};

/// A loaded project: schema plus the documents to annotate.
pub struct Project {
    pub id: String,
    pub schema: ProjectSchema,
    pub documents: Vec<Document>,
}

#[derive(Deserialize)]
struct ProjectFile {
    #[serde(default)]
    id: Option<String>,
    labels: Vec<String>,
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    documents: Vec<DocumentEntry>,
}

#[derive(Deserialize)]
struct DocumentEntry {
    #[serde(default)]
    id: Option<String>,
    content: String,
    #[serde(default)]
    status: Option<DocumentStatus>,
}

fn default_kind() -> String {
    "span".to_string()
}

/// Load a project description from a JSON file
pub fn load_project(path: &str) -> Result<Project> {
    let path = Path::new(path);
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let file: ProjectFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse project file: {}", path.display()))?;

    let id = file
        .id
        .or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| "project".to_string());

    let documents = file
        .documents
        .into_iter()
        .map(|entry| {
            let mut doc = match entry.id {
                Some(doc_id) => Document::with_id(doc_id, entry.content),
                None => Document::new(entry.content),
            };
            if let Some(status) = entry.status {
                doc.status = status;
            }
            doc
        })
        .collect();

    Ok(Project {
        id,
        schema: ProjectSchema::new(file.labels, file.kind),
        documents,
    })
}

/// Load a plain text file as a one-document project. Labels come from
/// `SPANMARK_LABELS` (comma-separated) when set.
pub fn load_text(path: &str) -> Result<Project> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path))?;

    let id = Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());

    Ok(Project {
        id: id.clone(),
        schema: ProjectSchema::new(default_labels(), "span"),
        documents: vec![Document::with_id(id, content)],
    })
}

fn default_labels() -> Vec<String> {
    match std::env::var("SPANMARK_LABELS") {
        Ok(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => ["PERSON", "ORGANIZATION", "LOCATION", "DATE"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Get the ~/.spanmark directory path, creating it if needed
pub fn app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    let dir = home.join(".spanmark");

    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    Ok(dir)
}

/// Export a document's annotations to ~/.spanmark/<document-id>.json
pub fn export_document(doc: &Document) -> Result<PathBuf> {
    let export_path = app_dir()?.join(format!("{}.json", doc.id));

    let json = serde_json::to_string_pretty(doc).context("Failed to serialize document")?;
    fs::write(&export_path, json)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;

    Ok(export_path)
}

/// Send tracing output to ~/.spanmark/spanmark.log so the TUI screen
/// stays clean.
pub fn init_logging() -> Result<()> {
    use std::sync::Arc;
    use tracing_subscriber::EnvFilter;

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(app_dir()?.join("spanmark.log"))
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// A small built-in project for running without arguments
pub fn sample_project() -> Project {
    let labels = vec![
        "PERSON".to_string(),
        "ORGANIZATION".to_string(),
        "LOCATION".to_string(),
    ];

    let documents = vec![
        Document::with_id(
            "sample-1",
            "Ada Lovelace worked with Charles Babbage in London on the Analytical Engine.\n\nHer notes describe what many consider the first computer program.",
        ),
        Document::with_id(
            "sample-2",
            "The Turing Institute opened its Glasgow offices in 1983.\n\nDonald Michie served as its first director.",
        ),
    ];

    Project {
        id: "sample".to_string(),
        schema: ProjectSchema::new(labels, "span"),
        documents,
    }
}
