use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "imprint", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a design manifest onto its base mockup and write a PNG.
    Compose(ComposeArgs),
    /// List the preset graphics available in a store directory.
    Presets(PresetsArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input design manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Directory asset sources resolve against (defaults to the manifest's
    /// directory).
    #[arg(long)]
    assets_root: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PresetsArgs {
    /// Preset store directory.
    #[arg(long)]
    dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Presets(args) => cmd_presets(args),
    }
}

fn read_manifest_json(path: &Path) -> anyhow::Result<imprint::DesignManifest> {
    let f = File::open(path).with_context(|| format!("open manifest '{}'", path.display()))?;
    let r = BufReader::new(f);
    let manifest: imprint::DesignManifest =
        serde_json::from_reader(r).with_context(|| "parse manifest JSON")?;
    Ok(manifest)
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let manifest = read_manifest_json(&args.in_path)?;
    manifest.validate()?;

    let assets_root = match args.assets_root {
        Some(root) => root,
        None => args
            .in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };

    let image = manifest.render(&assets_root)?;
    imprint::write_png(&args.out, &image)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    let store = imprint::PresetStore::open(&args.dir)?;
    if store.list().is_empty() {
        eprintln!("no presets in {}", args.dir.display());
        return Ok(());
    }
    for preset in store.list() {
        println!("{}\t{}", preset.name, preset.rel_path);
    }
    Ok(())
}
