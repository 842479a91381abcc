use clap::Parser;

use crate::features::dashboard::{Bucket, Selection};
use crate::shared::Language;

/// Terminal dashboard for a delimited project/task export
#[derive(Parser, Debug)]
#[command(
    name = "tablero",
    version = env!("CARGO_PKG_VERSION"),
    about = "Terminal dashboard of KPIs and status breakdowns for a project export",
    long_about = None
)]
pub struct Cli {
    /// Dataset path or http(s) URL (default: config value, then data.csv)
    #[arg(long = "source", value_name = "PATH|URL")]
    pub source: Option<String>,

    /// Initial page: "Vista General", "Base de Datos" or a team name
    #[arg(long = "category", value_name = "NAME")]
    pub category: Option<Selection>,

    /// Initial period: All, Q1, Q2, Q3 or Q4
    #[arg(long = "quarter", value_name = "All|Q1..Q4")]
    pub quarter: Option<Bucket>,

    /// Interface language (es or en)
    #[arg(long = "lang", value_name = "es|en")]
    pub lang: Option<Language>,

    /// Print the dashboard snapshot as JSON instead of starting the UI
    #[arg(long = "json")]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Quarter;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "tablero",
            "--source",
            "https://example.com/data.csv",
            "--category",
            "payments",
            "--quarter",
            "q3",
            "--lang",
            "en",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.source.as_deref(), Some("https://example.com/data.csv"));
        assert_eq!(cli.category, Some(Selection::Team("Payments")));
        assert_eq!(cli.quarter, Some(Bucket::Quarter(Quarter::Q3)));
        assert_eq!(cli.lang, Some(Language::English));
        assert!(cli.json);
    }

    #[test]
    fn test_defaults_when_no_flags() {
        let cli = Cli::try_parse_from(["tablero"]).unwrap();
        assert!(cli.source.is_none());
        assert!(cli.category.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!(Cli::try_parse_from(["tablero", "--category", "Logistics"]).is_err());
        assert!(Cli::try_parse_from(["tablero", "--quarter", "Q5"]).is_err());
    }
}
