use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use songcard::{CardConfig, FontCache, MetadataRecord, Renderer, Variant};

#[derive(Parser, Debug)]
#[command(name = "songcard", version, about = "Render social-share cards for a song catalog")]
struct Cli {
    /// Log debug-level pipeline events.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every catalog entry in every variant.
    Build(BuildArgs),
    /// Render one card as a PNG.
    Render(RenderArgs),
    /// Print the composed node tree of one card as JSON.
    Tree(TreeArgs),
    /// Write the intermediate SVG of one card.
    Svg(RenderArgs),
    /// Print diagnostics about the card fonts (family name + SHA-256 of font bytes).
    Fonts(SiteArgs),
}

/// Config file plus per-field overrides.
#[derive(Args, Debug)]
struct SiteArgs {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Asset root cover art references resolve against.
    #[arg(long)]
    public: Option<PathBuf>,

    /// Directory holding the regular and bold font files.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Raster width multiplier.
    #[arg(long)]
    scale: Option<f32>,
}

#[derive(Args, Debug)]
struct BuildArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Directory of Markdown song entries.
    #[arg(long)]
    content: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Worker threads (default: one per core).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct CardArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    album: Option<String>,

    /// Cover art reference, e.g. `/covers/nightfall.jpg`.
    #[arg(long)]
    cover: Option<String>,

    /// Featured lyric excerpt.
    #[arg(long)]
    excerpt: Option<String>,

    /// landscape-compact | landscape-detailed | portrait-share (or og | og-detailed | share).
    #[arg(long)]
    variant: Variant,
}

impl CardArgs {
    fn record(&self) -> MetadataRecord {
        MetadataRecord {
            title: self.title.clone(),
            album: self.album.clone(),
            cover_art: self.cover.clone(),
            featured_excerpt: self.excerpt.clone(),
        }
        .normalized()
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    site: SiteArgs,

    #[command(flatten)]
    card: CardArgs,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct TreeArgs {
    #[command(flatten)]
    site: SiteArgs,

    #[command(flatten)]
    card: CardArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    match cli.cmd {
        Command::Build(args) => cmd_build(args),
        Command::Render(args) => cmd_render(args),
        Command::Tree(args) => cmd_tree(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("install log subscriber")?;
    Ok(())
}

fn load_config(site: &SiteArgs) -> anyhow::Result<CardConfig> {
    let mut cfg = match &site.config {
        Some(path) => CardConfig::load(path)?,
        None => CardConfig::default(),
    };
    if let Some(p) = &site.public {
        cfg.asset_root = p.clone();
    }
    if let Some(p) = &site.fonts {
        cfg.font_dir = p.clone();
    }
    if let Some(s) = site.scale {
        cfg.scale = s;
    }
    Ok(cfg)
}

/// Fonts are a deployment precondition: refuse to do any work without them.
fn preload_fonts(cfg: &CardConfig) -> anyhow::Result<Arc<FontCache>> {
    let fonts = FontCache::global(cfg.font_loader());
    fonts
        .get_fonts()
        .with_context(|| format!("load card fonts from '{}'", cfg.font_dir.display()))?;
    Ok(fonts)
}

fn make_renderer(cfg: &CardConfig) -> anyhow::Result<Renderer> {
    let fonts = preload_fonts(cfg)?;
    Ok(Renderer::new(fonts).with_scale(cfg.scale)?)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.site)?;
    if let Some(p) = args.content {
        cfg.content_dir = p;
    }
    if let Some(p) = args.out {
        cfg.out_dir = p;
    }
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }
    cfg.validate()?;

    let renderer = make_renderer(&cfg)?;
    let report = songcard::build_catalog(
        &cfg.catalog(),
        &renderer,
        &cfg.asset_resolver(),
        &cfg.out_dir,
        cfg.threads,
    )?;

    eprintln!(
        "rendered {} cards into {}",
        report.rendered,
        cfg.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.site)?;
    cfg.validate()?;
    let renderer = make_renderer(&cfg)?;
    let resolver = cfg.asset_resolver();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let png = rt.block_on(songcard::render_card(
        &renderer,
        &resolver,
        args.card.record(),
        args.card.variant,
    ))?;

    write_output(&args.out, &png)
}

fn cmd_tree(args: TreeArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.site)?;
    let tree = songcard::compose_card(
        &cfg.asset_resolver(),
        &args.card.record(),
        args.card.variant,
    );
    let json = serde_json::to_string_pretty(&tree).context("serialize node tree")?;
    println!("{json}");
    Ok(())
}

fn cmd_svg(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.site)?;
    cfg.validate()?;
    let renderer = make_renderer(&cfg)?;

    let variant = args.card.variant;
    let tree = songcard::compose_card(&cfg.asset_resolver(), &args.card.record(), variant);
    let svg = renderer.vector_markup(&tree, variant.canvas())?;
    write_output(&args.out, svg.as_bytes())
}

fn cmd_fonts(args: SiteArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let fonts = preload_fonts(&cfg)?.get_fonts()?;

    println!("font diagnostics ({}):", cfg.font_dir.display());
    for (label, file, bytes) in [
        ("regular", &cfg.regular_font, &fonts.regular),
        ("bold", &cfg.bold_font, &fonts.bold),
    ] {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes.to_vec());
        let families: Vec<String> = db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();

        println!("  {label}:");
        println!("    file:     {file}");
        println!("    family:   {}", families.join(", "));
        println!("    faces:    {}", db.len());
        println!("    bytes:    {}", bytes.len());
        println!("    sha256:   {}", sha256_hex(bytes));
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
