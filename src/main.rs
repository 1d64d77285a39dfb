//! OSRS Hiscores CLI - Look up Old School RuneScape player statistics
//!
//! Prints every skill for a player, or a single skill with --skill, as a text
//! table or JSON.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use osrs_hiscores::cli::{render_json, render_skill, render_table, Cli, OutputFormat, StartupConfig};
use osrs_hiscores::{Hiscores, HiscoresClient, SkillStat};

/// Installs the log subscriber; output goes to stderr so stdout stays parseable
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "osrs_hiscores=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(config: StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = HiscoresClient::with_config(config.client.clone())?;
    let mut hiscores = Hiscores::new(client).with_parse_mode(config.parse_mode);

    match (config.skill, config.format) {
        (Some(skill), OutputFormat::Table) => {
            // The first lookup fetches; the other two are served from the cache
            let stat = SkillStat {
                level: hiscores.get_player_skill_level(&config.player, skill).await?,
                experience: hiscores.get_player_skill_xp(&config.player, skill).await?,
                rank: hiscores.get_player_skill_rank(&config.player, skill).await?,
            };
            println!("{}", render_skill(&config.player, skill, &stat));
        }
        (skill, OutputFormat::Json) => {
            let record = hiscores.get_player(&config.player).await?;
            println!("{}", render_json(&record, skill)?);
        }
        (None, OutputFormat::Table) => {
            let record = hiscores.get_player(&config.player).await?;
            print!("{}", render_table(&record));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let result = match StartupConfig::from_cli(&cli) {
        Ok(config) => run(config).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
