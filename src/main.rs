use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use price_normalizer::constants::CONFIG_ENV_VAR;
use price_normalizer::logging;
use price_normalizer::{
    Config, CurrencyCode, NormalizationFacade, RawPriceInput, RefineInput, Refinement,
};

#[derive(Parser)]
#[command(name = "price_normalizer")]
#[command(about = "Normalize scraped e-commerce prices and promotions")]
#[command(version)]
struct Cli {
    /// TOML file overriding the summary/candidate heuristics
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    /// Also write daily-rotated JSON logs into this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw price string into currency and value (JSON on stdout)
    Price {
        /// Price text as it appears on the page, e.g. "R$ 1.234,56"
        #[arg(long)]
        raw: Option<String>,
        /// Currency code already known to the caller
        #[arg(long)]
        currency: Option<String>,
        /// Numeric value already known to the caller
        #[arg(long)]
        value: Option<Decimal>,
        /// Page the price was taken from
        #[arg(long)]
        url: String,
    },
    /// Summarize promotion phrases into one short line
    Promos {
        #[arg(long)]
        url: String,
        #[arg(long)]
        currency: Option<String>,
        /// Promotion phrases, one per argument
        phrases: Vec<String>,
    },
    /// Pick promotion-looking snippets from page text blocks, one per line
    Candidates {
        /// File of text blocks; stdin when omitted or "-"
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Refine a product payload (JSON) and optionally merge an external extraction
    Refine {
        /// RefineInput JSON; stdin when omitted or "-"
        #[arg(long)]
        input: Option<PathBuf>,
        /// Refinement JSON produced by an external extractor
        #[arg(long)]
        external: Option<PathBuf>,
    },
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            fs::read_to_string(p).with_context(|| format!("Failed to read {}", p.display()))
        }
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => {
            info!(path = %p.display(), "loading config");
            Ok(Config::load(p)?)
        }
        None => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let _guard = logging::init_logging(cli.json_logs, cli.log_dir.as_deref());

    let facade = NormalizationFacade::new(load_config(cli.config.as_deref())?);

    match cli.command {
        Commands::Price { raw, currency, value, url } => {
            let input = RawPriceInput {
                raw_text: raw,
                explicit_value: value,
                explicit_currency: currency,
                source_url: url,
            };
            let price = facade.normalize_price(&input);
            println!("{}", serde_json::to_string(&price)?);
        }
        Commands::Promos { url, currency, phrases } => {
            let currency = currency.as_deref().and_then(CurrencyCode::parse_lenient);
            match facade.summarize_promotions(&phrases, &url, currency) {
                Some(summary) => println!("{}", summary),
                None => debug!("no promotions to summarize"),
            }
        }
        Commands::Candidates { input } => {
            let text = read_input(input.as_deref())?;
            let lines: Vec<&str> = text.lines().collect();
            for candidate in facade.promotion_candidates(&lines) {
                println!("{}", candidate);
            }
        }
        Commands::Refine { input, external } => {
            let payload: RefineInput = serde_json::from_str(&read_input(input.as_deref())?)
                .context("Invalid refine payload")?;
            let mut refined = facade.refine(&payload);

            if let Some(path) = external {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let external: Refinement =
                    serde_json::from_str(&content).context("Invalid external refinement")?;
                refined = refined.merge_external(external);
            }

            println!("{}", serde_json::to_string_pretty(&refined)?);
        }
    }

    Ok(())
}
