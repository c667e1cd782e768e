//! bookdash - Entry Point

use bookdash::auth::AppwriteAuth;
use bookdash::catalog::{CatalogEndpoints, HttpCatalogClient};
use bookdash::config::CliOverrides;
use bookdash::model::{AppError, PageSize};
use bookdash::view::{AppSettings, ColorConfig};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// bookdash - browse, sort and export an Open Library reading log
#[derive(Parser, Debug)]
#[command(name = "bookdash")]
#[command(version)]
#[command(about = "TUI dashboard for an Open Library reading log")]
pub struct Args {
    /// Reading-log owner to list
    #[arg(short, long)]
    pub user: Option<String>,

    /// Records per page (10, 50 or 100)
    #[arg(short, long, value_parser = parse_page_size)]
    pub page_size: Option<PageSize>,

    /// Directory where books.csv is written
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Catalog base URL
    #[arg(long)]
    pub catalog_url: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let value: usize = raw.parse().map_err(|_| format!("'{raw}' is not a number"))?;
    PageSize::try_from(value).map_err(|e| e.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Args::parse())?;
    Ok(())
}

/// Resolve configuration, start logging and run the dashboard until quit.
fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = bookdash::config::load_config_with_precedence(args.config.clone())?;
        let merged = bookdash::config::merge_config(config_file);
        let with_env = bookdash::config::apply_env_overrides(merged);

        bookdash::config::apply_cli_overrides(
            with_env,
            CliOverrides {
                reading_log_user: args.user.clone(),
                page_size: args.page_size,
                export_dir: args.export_dir.clone(),
                catalog_url: args.catalog_url.clone(),
            },
        )
    };

    bookdash::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let catalog = HttpCatalogClient::new(
        CatalogEndpoints::new(&config.catalog_url, &config.reading_log_user),
        config.request_timeout,
    );
    let auth = AppwriteAuth::new(
        &config.auth_endpoint,
        &config.auth_project,
        config.request_timeout,
    );
    let settings = AppSettings {
        page_size: config.page_size,
        export_dir: config.export_dir,
        colors: ColorConfig::from_env_and_args(args.no_color),
    };

    bookdash::view::run_dashboard(Box::new(auth), Arc::new(catalog), settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["bookdash", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["bookdash", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["bookdash"]);
        assert_eq!(args.user, None);
        assert_eq!(args.page_size, None);
        assert_eq!(args.export_dir, None);
        assert_eq!(args.catalog_url, None);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_user_short_flag() {
        let args = Args::parse_from(["bookdash", "-u", "alice"]);
        assert_eq!(args.user, Some("alice".to_string()));
    }

    #[test]
    fn test_page_size_accepts_selector_values() {
        let args = Args::parse_from(["bookdash", "--page-size", "50"]);
        assert_eq!(args.page_size, Some(PageSize::Fifty));
    }

    #[test]
    fn test_page_size_rejects_other_values() {
        let result = Args::try_parse_from(["bookdash", "-p", "25"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_page_size_rejects_non_numbers() {
        assert!(Args::try_parse_from(["bookdash", "-p", "ten"]).is_err());
    }

    #[test]
    fn test_export_dir_and_catalog_url() {
        let args = Args::parse_from([
            "bookdash",
            "--export-dir",
            "/tmp/out",
            "--catalog-url",
            "http://localhost:8080",
        ]);
        assert_eq!(args.export_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(args.catalog_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_no_color_flag() {
        let args = Args::parse_from(["bookdash", "--no-color"]);
        assert!(args.no_color);
    }

    #[test]
    fn test_broken_config_file_is_a_config_error() {
        let path = std::env::temp_dir().join(format!("bookdash_main_{}.toml", std::process::id()));
        std::fs::write(&path, "page_size = [").expect("Failed to write test config");

        let args = Args::parse_from(["bookdash", "--config", path.to_str().unwrap()]);
        let err = run(args).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_config_flag() {
        let args = Args::parse_from(["bookdash", "--config", "/etc/bookdash.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/etc/bookdash.toml")));
    }
}
