use anyhow::{Context, Result};
use clap::Parser;

mod app;
mod cli;
mod dataset;
mod features;
mod shared;
mod ui;
mod widgets;

#[cfg(test)]
mod widgets_tests;

use cli::Cli;
use dataset::{DataSource, Dataset};
use features::dashboard::{DashboardState, ViewState};
use shared::{init_logging, Config, LogTarget};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json {
        init_logging(LogTarget::Stderr)?;
        return print_snapshot(&cli).await;
    }

    let config_dir = Config::config_dir()?;
    init_logging(LogTarget::File(&config_dir.join("tablero.log")))?;

    let config_path = config_dir.join("config.json");
    let config = Config::load_from(&config_path);

    let source = resolve_source(&cli, &config);
    let view = initial_view(&cli);
    let language = cli.lang.unwrap_or(config.language);

    let mut app = app::App::new(config, Some(config_path), source, view, language);

    // Run the TUI
    app.run().await?;

    Ok(())
}

/// `--source` wins over the config file, which wins over `data.csv`
fn resolve_source(cli: &Cli, config: &Config) -> DataSource {
    cli.source
        .as_deref()
        .or(config.data_source.as_deref())
        .map(DataSource::parse)
        .unwrap_or_default()
}

fn initial_view(cli: &Cli) -> ViewState {
    ViewState::new(
        cli.category.unwrap_or_default(),
        cli.quarter.unwrap_or_default(),
    )
}

/// Headless mode: load once, aggregate, print the snapshot as JSON
async fn print_snapshot(cli: &Cli) -> Result<()> {
    let config = Config::load().unwrap_or_default();
    let source = resolve_source(cli, &config);

    let dataset = Dataset::load(&source)
        .await
        .with_context(|| format!("could not load dataset from {source}"))?;

    let state = DashboardState::new(dataset.records, initial_view(cli));
    println!("{}", serde_json::to_string_pretty(state.snapshot())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Quarter;
    use crate::features::dashboard::{Bucket, Selection};
    use std::path::PathBuf;

    #[test]
    fn test_source_precedence() {
        let config = Config {
            data_source: Some("https://example.com/data.csv".to_string()),
            ..Default::default()
        };

        let cli = Cli::try_parse_from(["tablero", "--source", "local.csv"]).unwrap();
        assert_eq!(
            resolve_source(&cli, &config),
            DataSource::Path(PathBuf::from("local.csv"))
        );

        let cli = Cli::try_parse_from(["tablero"]).unwrap();
        assert_eq!(
            resolve_source(&cli, &config),
            DataSource::Url("https://example.com/data.csv".to_string())
        );
        assert_eq!(resolve_source(&cli, &Config::default()), DataSource::default());
    }

    #[test]
    fn test_initial_view_from_flags() {
        let cli = Cli::try_parse_from(["tablero", "--category", "food", "--quarter", "Q2"]).unwrap();
        assert_eq!(
            initial_view(&cli),
            ViewState::new(Selection::Team("Food"), Bucket::Quarter(Quarter::Q2))
        );

        let cli = Cli::try_parse_from(["tablero"]).unwrap();
        assert_eq!(initial_view(&cli), ViewState::default());
    }
}
