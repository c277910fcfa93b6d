mod notify;
mod preview;

use std::io::Read;
use std::path::Path;

use clap::{Parser, Subcommand};
use descfill_core::config::{self, Config, TOKEN_ENV};
use descfill_core::corpus::{Corpus, GeneralProcessor};
use descfill_core::Replacer;
use descfill_paratranz::download::download_corpus;
use descfill_paratranz::{Filler, ParatranzClient};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "descfill",
    version,
    about = "Template auto-fill for untranslated item descriptions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill every untranslated item description on Paratranz.
    Run,
    /// Count fillable descriptions without writing anything.
    Check {
        /// Push the count to ntfy when it is non-zero.
        #[arg(long)]
        notify: bool,
    },
    /// Download the source text corpora into the text directory.
    Download,
    /// Apply the replacer to the local English corpus and print the results.
    Preview {
        /// Regex matched against the start of each lowercased text ID.
        #[arg(long, default_value = "^item_desc")]
        pattern: String,
        /// Stop after this many results.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Replace a single description (reads stdin when no text is given).
    Replace {
        /// Print the original text when nothing matched.
        #[arg(long)]
        keep: bool,
        /// The description text, lines separated by a literal `\n`.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.general.log_level)),
        )
        .init();

    match cli.command {
        Commands::Run => {
            let mut filler = build_filler(&cfg)?;
            let count = filler.run().await?;
            println!("Filled {count} descriptions");
        }
        Commands::Check { notify } => {
            let mut filler = build_filler(&cfg)?;
            println!("Fetching untranslated strings...");
            let count = filler.check().await?;
            println!("{count} descriptions can be filled");
            if count != 0 && (notify || cfg.notify.enabled) {
                let client = reqwest::Client::new();
                if let Err(e) = notify::send(
                    &client,
                    &cfg.notify,
                    "Paratranz update",
                    &format!("{count} descriptions can be filled"),
                )
                .await
                {
                    warn!("notification failed: {e}");
                }
            }
        }
        Commands::Download => {
            let dir = config::shellexpand(&cfg.text.dir);
            let client = reqwest::Client::new();
            let written = download_corpus(&client, &cfg.corpus, Path::new(&dir)).await?;
            for path in written {
                println!("  {}", path.display());
            }
        }
        Commands::Preview { pattern, limit } => {
            let replacer = Replacer::load(&cfg.text)?;
            let dir = config::shellexpand(&cfg.text.dir);
            let processor = GeneralProcessor;
            let corpus = Corpus::load(
                Path::new(&dir),
                &cfg.corpus.en_file,
                &cfg.corpus.cn_file,
                Some(&processor),
            )?;
            let pattern = regex_from(&pattern)?;
            let results = preview::preview(&replacer, &corpus, &pattern, limit);
            for (id, output) in &results {
                println!("{id}={output}");
            }
            info!("{} previewed descriptions", results.len());
        }
        Commands::Replace { keep, text } => {
            let input = if text.is_empty() {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf.trim_end_matches(['\r', '\n']).to_string()
            } else {
                text.join(" ")
            };
            if input.is_empty() {
                anyhow::bail!("no description provided. Usage: descfill replace <text>");
            }
            let replacer = Replacer::load(&cfg.text)?;
            println!("{}", replacer.assemble(&input, keep));
        }
    }

    Ok(())
}

/// Build the Paratranz filler from config.
fn build_filler(cfg: &Config) -> anyhow::Result<Filler<ParatranzClient>> {
    if cfg.paratranz.project_id == 0 {
        anyhow::bail!("paratranz.project_id is not set in the config file.");
    }
    if cfg.paratranz.token.is_empty() {
        anyhow::bail!(
            "Paratranz token is empty. Set paratranz.token in the config file or {TOKEN_ENV}."
        );
    }
    let replacer = Replacer::load(&cfg.text)?;
    let client = ParatranzClient::new(&cfg.paratranz);
    Ok(Filler::new(client, replacer, &cfg.paratranz.key_pattern)?)
}

fn regex_from(pattern: &str) -> anyhow::Result<regex::Regex> {
    regex::Regex::new(pattern).map_err(|e| anyhow::anyhow!("invalid pattern {pattern:?}: {e}"))
}
