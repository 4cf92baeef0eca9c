use clap::{Parser, Subcommand};
use rdoc_scrape::cli::{check_cmd, hierarchy_cmd, matrices_cmd, output, scrape_cmd, ScrapeArgs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rdoc-scrape",
    version,
    about = "Scrape the RDoC construct taxonomy into CSV feature matrices"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Only print errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print a JSON summary on stdout.
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape the tree, crawl every construct and write all CSV files.
    Scrape(ScrapeArgs),
    /// Scrape the tree and write rdoc.csv only.
    Hierarchy(ScrapeArgs),
    /// Crawl constructs listed in an existing rdoc.csv and write the matrices.
    Matrices {
        #[command(flatten)]
        args: ScrapeArgs,
        /// Hierarchy file (defaults to rdoc.csv in the output directory).
        #[arg(long)]
        hierarchy: Option<PathBuf>,
    },
    /// HEAD every construct URL and report the dead ones.
    CheckLinks {
        #[command(flatten)]
        args: ScrapeArgs,
        #[arg(long)]
        hierarchy: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(&cli);
    output::init(output::OutputMode {
        quiet: cli.quiet,
        json: cli.json,
        no_color: cli.no_color,
    });

    let result = match cli.command {
        Command::Scrape(args) => scrape_cmd::run(&args).await,
        Command::Hierarchy(args) => hierarchy_cmd::run(&args).await,
        Command::Matrices { args, hierarchy } => matrices_cmd::run(&args, hierarchy).await,
        Command::CheckLinks { args, hierarchy } => check_cmd::run(&args, hierarchy).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet || cli.json {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}
