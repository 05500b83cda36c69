use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    catalog::model::{CatalogEntry, SongFrontmatter},
    foundation::error::{CardError, CardResult},
};

/// Enumerates the entries cards are generated for.
pub trait Catalog: Send + Sync {
    /// All entries, ordered by identifier.
    fn list_entries(&self) -> CardResult<Vec<CatalogEntry>>;
}

impl Catalog for Vec<CatalogEntry> {
    fn list_entries(&self) -> CardResult<Vec<CatalogEntry>> {
        let mut out = self.clone();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(out)
    }
}

/// Catalog backed by a directory of Markdown files with YAML frontmatter.
///
/// `songs/echoes/nightfall.md` becomes the entry `echoes/nightfall`.
#[derive(Clone, Debug)]
pub struct MarkdownCatalog {
    root: PathBuf,
}

impl MarkdownCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> CardResult<()> {
        let rd = std::fs::read_dir(dir)
            .with_context(|| format!("read content directory '{}'", dir.display()))?;
        for entry in rd {
            let entry =
                entry.with_context(|| format!("read directory entry in '{}'", dir.display()))?;
            let path = entry.path();
            if path.is_dir() {
                Self::collect_files(&path, out)?;
            } else if path.extension().and_then(|e| e.to_str()) == Some("md") {
                out.push(path);
            }
        }
        Ok(())
    }

    fn entry_id(&self, path: &Path) -> CardResult<String> {
        let rel = path.strip_prefix(&self.root).map_err(|_| {
            CardError::catalog(format!(
                "'{}' is outside the content root",
                path.display()
            ))
        })?;
        let rel = rel.with_extension("");
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if parts.is_empty() {
            return Err(CardError::catalog(format!(
                "cannot derive an identifier for '{}'",
                path.display()
            )));
        }
        Ok(parts.join("/"))
    }

    fn load_entry(&self, path: &Path) -> CardResult<CatalogEntry> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog entry '{}'", path.display()))?;
        let song = parse_song(&source)
            .map_err(|e| CardError::catalog(format!("{}: {e}", path.display())))?;
        Ok(CatalogEntry::from_song(self.entry_id(path)?, song))
    }
}

impl Catalog for MarkdownCatalog {
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn list_entries(&self) -> CardResult<Vec<CatalogEntry>> {
        let mut files = Vec::new();
        Self::collect_files(&self.root, &mut files)?;

        let mut entries = files
            .iter()
            .map(|p| self.load_entry(p))
            .collect::<CardResult<Vec<_>>>()?;
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        tracing::debug!(count = entries.len(), "listed catalog entries");
        Ok(entries)
    }
}

/// Split a document into its `---`-fenced frontmatter and body.
pub fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let s = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = s
        .strip_prefix("---\r\n")
        .or_else(|| s.strip_prefix("---\n"))?;

    let mut offset = 0usize;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let fm = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((fm, body));
        }
        offset += line.len();
    }
    None
}

/// Parse and validate song frontmatter from a Markdown document.
pub fn parse_song(source: &str) -> CardResult<SongFrontmatter> {
    let (fm, _body) =
        split_frontmatter(source).ok_or_else(|| CardError::catalog("missing frontmatter"))?;
    let song: SongFrontmatter = serde_yaml_ng::from_str(fm)
        .map_err(|e| CardError::catalog(format!("invalid frontmatter: {e}")))?;
    song.validate()?;
    Ok(song)
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/store.rs"]
mod tests;
