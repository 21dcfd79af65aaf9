use ansi_assets::assets::{self, Target};
use ansi_assets::imaging::{ResizeEngine, SystemBackend};
use ansi_assets::{config, output, pipeline, telemetry};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "ansi-assets")]
#[command(about = "Regenerate logo, scheme swatch and screenshot assets")]
#[command(long_about = "\
Regenerate logo, scheme swatch and screenshot assets

Renders the ANSI-art sources under res/ with the project's own converters,
shrinks the results and screenshots the reference documents in headless
Chrome. Build the converters first (cargo build --release).

Repository layout (relative to --root):

  target/release/cp437-to-png     # converters, output on stdout
  target/release/cp437-to-svg
  res/
  ├── logo/logo.ans               → logo.png, logo.svg, full.png, small.png, tiny.png
  ├── schemes/CLASSIC.ans         → CLASSIC.png (one per scheme)
  ├── schemes/MODERN.ans          → MODERN.png
  ├── test/background.svg         → screenshots/svg.png (browser capture)
  └── test/background.png         → screenshots/png.png

Every pipeline removes its previous outputs first, so re-running is safe.

Run 'ansi-assets gen-config' to print a documented config file.")]
#[command(version = version_string())]
struct Cli {
    /// Repository root all asset paths are relative to
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file merged over the stock defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Resize engine, overriding the config file
    #[arg(long, value_enum, global = true)]
    engine: Option<ResizeEngine>,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the logo and its downscaled copies
    Logo,
    /// Render one swatch per colour scheme
    Schemes,
    /// Capture and normalise the reference screenshots
    Screenshots,
    /// Run logo, schemes and screenshots in order
    All,
    /// Print the steps a pipeline would run, without running them
    Plan {
        #[arg(value_enum)]
        target: Target,
    },
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    telemetry::init(telemetry::level_for_verbosity(cli.verbose))?;

    let target = match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        Command::Plan { target } => {
            let config = config::load_config(cli.config.as_deref())?;
            for pipeline in assets::pipelines_for(target, &config, &cli.root) {
                output::print_plan(&pipeline);
            }
            return Ok(());
        }
        Command::Logo => Target::Logo,
        Command::Schemes => Target::Schemes,
        Command::Screenshots => Target::Screenshots,
        Command::All => Target::All,
    };

    let config = config::load_config(cli.config.as_deref())?;
    let backend = SystemBackend::new(
        cli.root.join(&config.tools.converter_dir),
        cli.engine.unwrap_or(config.tools.resize_engine),
        PathBuf::from(&config.tools.magick),
    );
    tracing::info!(root = %cli.root.display(), engine = ?backend.engine, "backend ready");

    for pipeline in assets::pipelines_for(target, &config, &cli.root) {
        let report = pipeline::run_with_backend(&pipeline, &backend, output::print_step_event)?;
        output::print_report(&report);
    }

    Ok(())
}
