use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    assets::resolve::AssetResolver,
    catalog::{
        model::{CatalogEntry, MetadataRecord},
        store::Catalog,
    },
    foundation::error::{CardError, CardResult},
    layout::engine::LayoutEngine,
    render::{orchestrator::Renderer, raster::Rasterizer},
    template::{node::Node, variant::Variant},
};

/// Content type hosting layers should serve rendered cards with.
pub const CONTENT_TYPE_PNG: &str = "image/png";

/// Resolve the record's cover art and compose the variant's node tree.
pub fn compose_card(resolver: &AssetResolver, record: &MetadataRecord, variant: Variant) -> Node {
    let cover = resolver.resolve(record.cover_art.as_deref());
    variant.compose(record, &cover)
}

/// Full pipeline for one card on the calling thread.
pub fn render_card_blocking<L, R>(
    renderer: &Renderer<L, R>,
    resolver: &AssetResolver,
    record: &MetadataRecord,
    variant: Variant,
) -> CardResult<Vec<u8>>
where
    L: LayoutEngine + 'static,
    R: Rasterizer + 'static,
{
    let tree = compose_card(resolver, record, variant);
    renderer.render_blocking(&tree, variant.canvas())
}

/// Full pipeline for one card. Cover reads and rendering run on the blocking pool.
pub async fn render_card<L, R>(
    renderer: &Renderer<L, R>,
    resolver: &AssetResolver,
    record: MetadataRecord,
    variant: Variant,
) -> CardResult<Vec<u8>>
where
    L: LayoutEngine + 'static,
    R: Rasterizer + 'static,
{
    let resolver = resolver.clone();
    let tree = tokio::task::spawn_blocking(move || compose_card(&resolver, &record, variant))
        .await
        .map_err(|e| CardError::Other(anyhow::anyhow!("compose task failed: {e}")))?;
    renderer.render(tree, variant.canvas()).await
}

/// Outcome of [`build_catalog`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BuildReport {
    /// Number of cards written.
    pub rendered: usize,
    /// Written files, ordered by entry id then variant.
    pub artifacts: Vec<PathBuf>,
}

/// Render every catalog entry in every variant to `<out_dir>/<route>/<id>.png`.
///
/// Work is spread over a rayon pool (`threads = None` uses rayon's default size). The first
/// failing card aborts the build.
#[tracing::instrument(skip(catalog, renderer, resolver, out_dir), fields(out_dir = %out_dir.display()))]
pub fn build_catalog<L, R>(
    catalog: &dyn Catalog,
    renderer: &Renderer<L, R>,
    resolver: &AssetResolver,
    out_dir: &Path,
    threads: Option<usize>,
) -> CardResult<BuildReport>
where
    L: LayoutEngine + 'static,
    R: Rasterizer + 'static,
{
    let entries = catalog.list_entries()?;
    let jobs: Vec<(&CatalogEntry, Variant)> = entries
        .iter()
        .flat_map(|entry| Variant::ALL.map(|v| (entry, v)))
        .collect();
    tracing::info!(entries = entries.len(), cards = jobs.len(), "building catalog");

    let pool = build_thread_pool(threads)?;
    let artifacts = pool.install(|| {
        jobs.par_iter()
            .map(|(entry, variant)| write_card(renderer, resolver, out_dir, entry, *variant))
            .collect::<CardResult<Vec<PathBuf>>>()
    })?;

    tracing::info!(rendered = artifacts.len(), "catalog build finished");
    Ok(BuildReport {
        rendered: artifacts.len(),
        artifacts,
    })
}

fn write_card<L, R>(
    renderer: &Renderer<L, R>,
    resolver: &AssetResolver,
    out_dir: &Path,
    entry: &CatalogEntry,
    variant: Variant,
) -> CardResult<PathBuf>
where
    L: LayoutEngine + 'static,
    R: Rasterizer + 'static,
{
    let png = render_card_blocking(renderer, resolver, &entry.record, variant).map_err(|e| {
        tracing::error!(id = %entry.id, %variant, error = %e, "card render failed");
        e
    })?;

    let path = out_dir.join(variant.artifact_path(&entry.id));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&path, &png).with_context(|| format!("write card '{}'", path.display()))?;
    tracing::debug!(id = %entry.id, %variant, path = %path.display(), "card written");
    Ok(path)
}

fn build_thread_pool(threads: Option<usize>) -> CardResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CardError::validation("'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CardError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
