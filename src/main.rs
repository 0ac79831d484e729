//! drillchart - Entry Point

use clap::Parser;
use drillchart::integration::{OutputFormat, RenderRequest, DEFAULT_VIEWPORT_HEIGHT};
use drillchart::model::AppError;
use drillchart::navigation::ClickSpec;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// drillchart - render a drill-down org-chart as columns
#[derive(Parser, Debug)]
#[command(name = "drillchart")]
#[command(version)]
#[command(about = "Render a hierarchical org-chart as drill-down columns with connector lines")]
pub struct Args {
    /// Path to JSON tree file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Click the node ID shown in column COL; repeat to drill deeper
    #[arg(short, long = "click", value_name = "COL:ID")]
    pub clicks: Vec<ClickSpec>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Connector corner radius in pixels (0 draws right angles)
    #[arg(long)]
    pub radius: Option<f64>,

    /// Viewport height in pixels used for layout
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    pub height: f64,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn run(args: Args) -> Result<String, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = drillchart::config::load_config_with_precedence(args.config.clone())?;
        let merged = drillchart::config::merge_config(config_file)?;
        let with_env = drillchart::config::apply_env_overrides(merged)?;
        drillchart::config::apply_cli_overrides(with_env, args.radius)
    };

    drillchart::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let input_source = drillchart::source::detect_input_source(args.file.clone())?;
    let root = input_source.load()?;

    let request = RenderRequest {
        clicks: args.clicks,
        format: args.format,
        style: config.style,
        viewport_height: args.height,
    };
    drillchart::integration::render(root, &request)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let output = run(args)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes()).map_err(AppError::Output)?;
    stdout.flush().map_err(AppError::Output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        // Help returns Err with DisplayHelp, which is success
        let result = Args::try_parse_from(["drillchart", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["drillchart", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["drillchart"]);
        assert_eq!(args.file, None);
        assert!(args.clicks.is_empty());
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.radius, None);
        assert_eq!(args.height, DEFAULT_VIEWPORT_HEIGHT);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["drillchart", "org.json"]);
        assert_eq!(args.file, Some(PathBuf::from("org.json")));
    }

    #[test]
    fn test_clicks_keep_order() {
        let args = Args::parse_from(["drillchart", "-c", "1:cto", "--click", "2:dev"]);
        let clicks: Vec<(usize, &str)> = args
            .clicks
            .iter()
            .map(|c| (c.column, c.id.as_str()))
            .collect();
        assert_eq!(clicks, vec![(1, "cto"), (2, "dev")]);
    }

    #[test]
    fn test_malformed_click_rejects() {
        let result = Args::try_parse_from(["drillchart", "--click", "cto"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_format_svg() {
        let args = Args::parse_from(["drillchart", "--format", "svg"]);
        assert_eq!(args.format, OutputFormat::Svg);
    }

    #[test]
    fn test_format_invalid_rejects() {
        let result = Args::try_parse_from(["drillchart", "--format", "png"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_radius_flag() {
        let args = Args::parse_from(["drillchart", "--radius", "4.5"]);
        assert_eq!(args.radius, Some(4.5));
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["drillchart", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_radius_flows_through_config_precedence_chain() {
        use drillchart::config::{apply_cli_overrides, merge_config, ConfigFile, StyleSection};

        let config_file = ConfigFile {
            style: Some(StyleSection {
                corner_radius: Some(3.0),
                ..StyleSection::default()
            }),
            log_file_path: None,
        };

        let merged = merge_config(Some(config_file)).unwrap();
        assert_eq!(merged.style.corner_radius, 3.0);

        let args = Args::parse_from(["drillchart", "--radius", "7"]);
        let with_cli = apply_cli_overrides(merged, args.radius);
        assert_eq!(
            with_cli.style.corner_radius, 7.0,
            "CLI radius should override all other sources"
        );
    }
}
