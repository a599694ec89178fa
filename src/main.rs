use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

use pfr_profile::config::AppConfig;
use pfr_profile::export::{self, Format};
use pfr_profile::extract::build_profile;
use pfr_profile::fetcher::PfrClient;
use pfr_profile::models::{PlayerPage, PlayerProfile};
use pfr_profile::pipeline::Pipeline;
use pfr_profile::utils;

#[derive(Parser)]
#[command(name = "pfr-profile", about = "Pro-Football-Reference player profile extractor", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch one player page and print its profile as JSON
    Profile {
        /// Player id, /players/<L>/<id>.htm path, or full URL
        player: String,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Extract a profile from a saved HTML file
    Parse {
        file: PathBuf,

        /// Player the page belongs to (id, path or URL)
        #[arg(short, long)]
        player: String,

        #[arg(long)]
        compact: bool,
    },

    /// Fetch every player listed in a file (one per line)
    Batch {
        list: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "pfr_profile=info,warn",
        1 => "pfr_profile=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(io::stderr))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    match cli.command {
        Command::Profile { player, compact } => {
            let _t = utils::Timer::start("profile");
            let page = PlayerPage::parse(&player)?;
            let client = Arc::new(PfrClient::new(&config.fetcher)?);
            let site_root = client.site_root().clone();
            let pipeline = Pipeline::new(client, site_root, config.pipeline);

            let profile = pipeline.profile(&page).await?;
            println!("{}", export::to_json(&profile, !compact)?);
        }

        Command::Parse {
            file,
            player,
            compact,
        } => {
            let page = PlayerPage::parse(&player)?;
            let site_root = Url::parse(&config.fetcher.base_url)
                .with_context(|| format!("Invalid base_url {:?}", config.fetcher.base_url))?;
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;

            let profile = build_profile(&html, &page, &site_root);
            println!("{}", export::to_json(&profile, !compact)?);
        }

        Command::Batch { list, out, format } => {
            let _t = utils::Timer::start("batch");
            let text = std::fs::read_to_string(&list)
                .with_context(|| format!("Failed to read {:?}", list))?;
            let pages = utils::read_player_list(&text)
                .into_iter()
                .map(|p| PlayerPage::parse(p).with_context(|| format!("Bad player reference {:?}", p)))
                .collect::<Result<Vec<_>>>()?;

            let client = Arc::new(PfrClient::new(&config.fetcher)?);
            let site_root = client.site_root().clone();
            let (results, stats) = Pipeline::new(client, site_root, config.pipeline)
                .run(pages)
                .await;

            let profiles: Vec<PlayerProfile> =
                results.into_iter().filter_map(|r| r.profile.ok()).collect();

            match out {
                Some(path) => {
                    let f = File::create(&path)
                        .with_context(|| format!("Failed to create {:?}", path))?;
                    export::write_profiles(BufWriter::new(f), &profiles, format)?;
                    info!("Wrote {} profiles to {:?}", profiles.len(), path);
                }
                None => export::write_profiles(io::stdout().lock(), &profiles, format)?,
            }

            info!(
                "Done: {} pages, {} profiles, {} errors",
                stats.pages_requested, stats.profiles_built, stats.errors
            );
        }
    }

    Ok(())
}
