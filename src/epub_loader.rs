//! EPUB loading utilities.
//!
//! [`PackageSource`] is the narrow view of an e-book the converter needs:
//! a metadata lookup and the content items in reading order. [`EpubPackage`]
//! implements it on top of the `epub` crate by walking the spine.

use anyhow::{Context, Result};
use epub::doc::{EpubDoc, MetadataItem};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DOCUMENT_MIME_TYPES: [&str; 2] = ["application/xhtml+xml", "text/html"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Document,
    Other,
}

/// One entry of the package's reading order.
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: String,
    pub kind: ItemKind,
    pub data: Vec<u8>,
}

impl ContentItem {
    pub fn document(id: impl Into<String>, markup: &str) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::Document,
            data: markup.as_bytes().to_vec(),
        }
    }

    /// Decode the raw bytes as UTF-8, dropping anything that does not decode.
    pub fn decode(&self) -> String {
        decode_lossy(&self.data)
    }
}

pub trait PackageSource {
    /// First Dublin Core value for `key` (`title`, `creator`, ...).
    fn metadata(&self, key: &str) -> Option<String>;

    /// Content items in the order the package reports them.
    fn into_items(self) -> Result<Vec<ContentItem>>;
}

pub struct EpubPackage {
    doc: EpubDoc<BufReader<File>>,
    path: PathBuf,
    title: Option<String>,
    creator: Option<String>,
}

impl EpubPackage {
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "Loading EPUB package");
        let doc = EpubDoc::new(path)
            .with_context(|| format!("Failed to open EPUB at {}", path.display()))?;

        let title = first_metadata_value(&doc.metadata, "title");
        let creator = first_metadata_value(&doc.metadata, "creator");
        debug!(?title, ?creator, "Read package metadata");

        Ok(Self {
            doc,
            path: path.to_path_buf(),
            title,
            creator,
        })
    }
}

impl PackageSource for EpubPackage {
    fn metadata(&self, key: &str) -> Option<String> {
        match key {
            "title" => self.title.clone(),
            "creator" => self.creator.clone(),
            _ => None,
        }
    }

    fn into_items(mut self) -> Result<Vec<ContentItem>> {
        let mut items = Vec::new();

        loop {
            let id = self.doc.get_current_id().unwrap_or_default();
            match self.doc.get_current() {
                Some((data, mime)) => {
                    let kind = if DOCUMENT_MIME_TYPES
                        .iter()
                        .any(|m| mime.eq_ignore_ascii_case(m))
                    {
                        ItemKind::Document
                    } else {
                        ItemKind::Other
                    };
                    debug!(
                        item = items.len(),
                        %id,
                        %mime,
                        bytes = data.len(),
                        "Read spine item"
                    );
                    items.push(ContentItem { id, kind, data });
                }
                None => debug!(%id, "Spine item has no readable content"),
            }

            if !self.doc.go_next() {
                break;
            }
        }

        info!(
            path = %self.path.display(),
            items = items.len(),
            "Finished reading EPUB spine"
        );
        Ok(items)
    }
}

/// Best-effort UTF-8 decoding: invalid sequences and a leading BOM are dropped.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    match out.strip_prefix('\u{FEFF}') {
        Some(rest) => rest.to_string(),
        None => out,
    }
}

/// First non-empty value of a Dublin Core property, trimmed.
fn first_metadata_value(metadata: &[MetadataItem], property: &str) -> Option<String> {
    metadata
        .iter()
        .filter(|item| item.property == property)
        .map(|item| item.value.trim())
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
