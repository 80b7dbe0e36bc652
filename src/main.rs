use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use yansi::Paint;

use wikilist::config;
use wikilist::host::Host;

#[derive(Parser)]
#[command(name = "wikilist")]
#[command(
    about = "Expand wiki markup that uses list-processing parser functions like {{#listmap:...}}."
)]
struct Cli {
    /// Markup to expand; read from stdin when absent
    text: Option<String>,

    /// Configuration file with templates and the depth limit
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Output as a JSON string
    #[arg(short = 'j', long = "json")]
    json: bool,

    /// Log each function call and merge pass
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print the available parser functions and exit
    #[arg(long = "list-functions")]
    list_functions: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        if !io::stderr().is_terminal() {
            yansi::disable();
        }
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "wikilist=debug" } else { "wikilist=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let host = Host::from_config(config);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if cli.list_functions {
        for name in host.registry().names() {
            writeln!(handle, "{}", name)?;
        }
        return Ok(());
    }

    let text = match cli.text {
        Some(text) => text,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            text
        }
    };

    let output = host.render(&text);
    if cli.json {
        serde_json::to_writer(&mut handle, &output).context("failed to write JSON")?;
    } else {
        write!(handle, "{}", output)?;
    }
    writeln!(handle)?;
    Ok(())
}
