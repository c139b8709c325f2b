use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "swipe-scene", version)]
struct Cli {
    /// Log build decisions to stderr (`-v` debug, `-vv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the media URLs a descriptor references, one `url<TAB>hint` per line.
    Resources(ResourcesArgs),
    /// Build the element tree and print a JSON snapshot of it.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct ResourcesArgs {
    /// Input element descriptor JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Base URL relative sources resolve against (overrides the delegate's).
    #[arg(long)]
    base: Option<String>,

    /// Delegate table JSON (prototypes, paths, base URL).
    #[arg(long)]
    delegate: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input element descriptor JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Container width in local units.
    #[arg(long, default_value_t = 320.0)]
    width: f64,

    /// Container height in local units.
    #[arg(long, default_value_t = 480.0)]
    height: f64,

    /// Uniform device scale.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Timeline offset in `[0, 1]` applied after load.
    #[arg(long)]
    offset: Option<f64>,

    /// Delegate table JSON (prototypes, paths, base URL).
    #[arg(long)]
    delegate: Option<PathBuf>,

    /// Font file used to measure text.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Resources(args) => cmd_resources(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_descriptor(path: &Path) -> anyhow::Result<swipe_scene::Descriptor> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("open descriptor '{}'", path.display()))?;
    swipe_scene::Descriptor::from_json_str(&text)
        .with_context(|| format!("parse descriptor '{}'", path.display()))
}

fn read_delegate(path: Option<&Path>) -> anyhow::Result<swipe_scene::StaticDelegate> {
    let Some(path) = path else {
        return Ok(swipe_scene::StaticDelegate::new());
    };
    let f = File::open(path).with_context(|| format!("open delegate '{}'", path.display()))?;
    let delegate = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse delegate '{}'", path.display()))?;
    Ok(delegate)
}

fn cmd_resources(args: ResourcesArgs) -> anyhow::Result<()> {
    let desc = read_descriptor(&args.in_path)?;
    let mut delegate = read_delegate(args.delegate.as_deref())?;
    if let Some(base) = args.base {
        delegate.base_url = Some(swipe_scene::ResourceUrl::new(base));
    }

    for (url, tag) in swipe_scene::collect_resource_urls(&desc, &delegate) {
        println!("{url}\t{}", tag.extension_hint());
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let desc = read_descriptor(&args.in_path)?;
    let delegate = read_delegate(args.delegate.as_deref())?;

    let assets_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let mut media = swipe_scene::FsMediaBackend::new(assets_root);
    if let Some(font) = &args.font {
        let bytes =
            std::fs::read(font).with_context(|| format!("read font '{}'", font.display()))?;
        media = media.with_font(bytes);
    }

    if !(args.scale.is_finite() && args.scale > 0.0) {
        anyhow::bail!("scale must be finite and > 0");
    }
    let mut ctx = swipe_scene::BuildContext::new(&delegate, &mut media);
    let mut root = swipe_scene::Element::load(
        &desc,
        swipe_scene::Size::new(args.width, args.height),
        swipe_scene::ScaleFactor::uniform(args.scale),
        &mut ctx,
    );
    if let Some(t) = args.offset {
        root.set_time_offset(t, false);
    }

    let json = serde_json::to_string_pretty(&root.snapshot()).context("serialize snapshot")?;
    println!("{json}");
    Ok(())
}
