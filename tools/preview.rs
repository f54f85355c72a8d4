//! Preview: render templates from a master document and check the output.
//!
//! Usage: preview --document <path> [--mode comprehensive|random|single|outline]
//!                [--start <n>] [--count <n>] [--template <n>] [--repeat <n>]
//!                [--seed <n>] [--html] [--config <path>]
//!
//! Each render prints `Template N (seed=S): PASS` or `FAIL - reason`. A
//! render fails when it has no primary heading or still contains a brace.
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use decoy_pages::core::config::EngineConfig;
use decoy_pages::core::hierarchy::{Hierarchy, SectionContent};
use decoy_pages::core::page::DEFAULT_TITLE;
use decoy_pages::core::record::fresh_seed;
use decoy_pages::core::renderer::DocumentRenderer;
use rand::Rng;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Every template from --start to the last one.
    Comprehensive,
    /// --count randomly chosen templates.
    Random,
    /// --template, --repeat times.
    Single,
    /// Print the parsed section tree.
    Outline,
}

#[derive(Debug, Parser)]
#[command(name = "preview", about = "Render and check templates from a master document")]
struct Args {
    /// Markdown master document.
    #[arg(long, default_value = "FakeData.md")]
    document: PathBuf,

    /// Engine configuration in RON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Mode::Comprehensive)]
    mode: Mode,

    /// First template for comprehensive mode.
    #[arg(long, default_value_t = 1)]
    start: u32,

    /// Number of renders in random mode.
    #[arg(long, default_value_t = 5)]
    count: u32,

    /// Template for single mode.
    #[arg(long, default_value_t = 1)]
    template: u32,

    /// Repeats in single mode.
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Fixed seed; a fresh one per render when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the full HTML page after each result.
    #[arg(long)]
    html: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            process::exit(2);
        }
    }
}

/// Returns whether every check passed.
fn run(args: &Args) -> Result<bool> {
    let config = match args.config {
        Some(ref path) => EngineConfig::load_from_ron(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let hierarchy = Hierarchy::load(&args.document)
        .with_context(|| format!("failed to read {}", args.document.display()))?;

    if args.mode == Mode::Outline {
        print_outline(&hierarchy);
        return Ok(true);
    }

    let renderer = DocumentRenderer::builder()
        .hierarchy(hierarchy)
        .config(config)
        .build()
        .context("failed to build renderer")?;
    let total = renderer.config().total_templates();

    let templates: Vec<u32> = match args.mode {
        Mode::Comprehensive => (args.start.max(1)..=total).collect(),
        Mode::Random => {
            let mut rng = rand::thread_rng();
            (0..args.count).map(|_| rng.gen_range(1..=total)).collect()
        }
        Mode::Single => vec![args.template; args.repeat as usize],
        Mode::Outline => Vec::new(),
    };

    let mut failures = 0;
    for (i, &template) in templates.iter().enumerate() {
        let seed = args.seed.unwrap_or_else(fresh_seed);
        let (line, page) = check(&renderer, template, seed);
        if line.contains("FAIL") {
            failures += 1;
        }
        println!("[{}/{}] {}", i + 1, templates.len(), line);
        if args.html {
            if let Some(page) = page {
                println!("{}", "-".repeat(60));
                println!("{}", page);
            }
        }
    }

    println!();
    println!(
        "{} passed, {} failed",
        templates.len() - failures,
        failures
    );
    Ok(failures == 0)
}

fn check(renderer: &DocumentRenderer, template: u32, seed: u64) -> (String, Option<String>) {
    let doc = match renderer.render(template, seed) {
        Ok(doc) => doc,
        Err(e) => return (format!("Template {} (seed={}): FAIL - {}", template, seed, e), None),
    };
    let body = doc.body.as_str();
    let verdict = if !body.starts_with("# ") {
        format!("FAIL - template {} missing primary heading", template)
    } else if body.contains('{') {
        format!("FAIL - template {} has unreplaced placeholders", template)
    } else {
        "PASS".to_string()
    };
    (
        format!("Template {} (seed={}): {}", template, seed, verdict),
        Some(doc.to_page(DEFAULT_TITLE)),
    )
}

fn print_outline(hierarchy: &Hierarchy) {
    println!("{} primary sections", hierarchy.len());
    for (i, (title, content)) in hierarchy.iter().enumerate() {
        println!("{}. {}", i + 1, title);
        match content {
            SectionContent::Nested(inner) => {
                for (j, (inner_title, body)) in inner.iter().enumerate() {
                    println!("   {}.{} {} ({} bytes)", i + 1, j + 1, inner_title, body.as_str().len());
                }
            }
            SectionContent::Direct(body) => {
                println!("   (no subsections, {} bytes)", body.as_str().len());
            }
        }
    }
}
