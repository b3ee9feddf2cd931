use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use hitster::{AssetProcessor, GeneratorOpts, JsonSongSource, SongSource as _, Theme, ThemeRegistry};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hitster", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one code image per song.
    Qr(QrArgs),
    /// Theme every decoration artwork against every palette color.
    Decorations(CommonArgs),
    /// List known themes and their palettes.
    Themes,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Card theme.
    #[arg(long, env = "THEME", default_value = "black-white")]
    theme: Theme,

    /// Upper bound on parallel workers.
    #[arg(long, env = "QR_MAX_WORKERS", default_value_t = 8)]
    max_workers: usize,

    /// Theme artwork directory.
    #[arg(long, default_value = "generator/themes/images")]
    images_dir: PathBuf,

    /// Processed artwork cache.
    #[arg(long, default_value = "generated/images")]
    cache_dir: PathBuf,

    /// Log a progress line every this many completions.
    #[arg(long, default_value_t = 20)]
    progress_every: usize,
}

#[derive(Args, Debug)]
struct QrArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// JSON song list.
    #[arg(long, default_value = "generated/songs.json")]
    songs: PathBuf,

    /// Destination of the code images.
    #[arg(long, default_value = "generated/qr-codes")]
    out: PathBuf,

    /// Keep code images left over from a previous run.
    #[arg(long, default_value_t = false)]
    keep_existing: bool,
}

impl CommonArgs {
    fn opts(&self, output_dir: PathBuf) -> GeneratorOpts {
        GeneratorOpts {
            theme: self.theme,
            max_workers: self.max_workers,
            output_dir,
            cache_dir: self.cache_dir.clone(),
            images_dir: self.images_dir.clone(),
            progress_every: self.progress_every,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Qr(args) => cmd_qr(args),
        Command::Decorations(args) => cmd_decorations(args),
        Command::Themes => cmd_themes(),
    }
}

fn cmd_qr(args: QrArgs) -> anyhow::Result<()> {
    let opts = args.common.opts(args.out);
    let songs = JsonSongSource::new(&args.songs).songs()?;

    if !songs.is_empty() {
        hitster::prepare_output_dir(&opts.output_dir, !args.keep_existing)
            .with_context(|| format!("prepare '{}'", opts.output_dir.display()))?;
    }

    let registry = ThemeRegistry::new(&opts.images_dir);
    let processor = AssetProcessor::new(&opts.cache_dir);
    hitster::generate_qr_codes(&registry, &processor, &opts, &songs)?;
    Ok(())
}

fn cmd_decorations(args: CommonArgs) -> anyhow::Result<()> {
    let opts = args.opts(PathBuf::from("generated/qr-codes"));
    let registry = ThemeRegistry::new(&opts.images_dir);
    let processor = AssetProcessor::new(&opts.cache_dir);
    hitster::render_decorations(&registry, &processor, &opts)?;
    Ok(())
}

fn cmd_themes() -> anyhow::Result<()> {
    let registry = ThemeRegistry::new("generator/themes/images");
    for theme in Theme::ALL {
        let palette = registry
            .palette(theme)
            .iter()
            .map(|c| c.hex())
            .collect::<Vec<_>>()
            .join(" ");
        println!("{theme}\t{palette}");
    }
    Ok(())
}
