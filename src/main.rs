//! combobox - Entry Point

use clap::Parser;
use combobox::config::KeyBindings;
use combobox::layout::WidthPolicy;
use combobox::model::{AppError, SelectOption};
use combobox::source::OptionSource;
use combobox::source::fetch::{delayed_fetcher, json_file_fetcher};
use combobox::source::films::top_films;
use combobox::state::{ComboboxController, ComboboxProps};
use combobox::view::{ColorConfig, ComboboxStyles, ViewSettings};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// combobox - pick one option from a searchable dropdown
#[derive(Parser, Debug)]
#[command(name = "combobox")]
#[command(version)]
#[command(about = "Searchable dropdown selector; prints the chosen value on exit")]
pub struct Args {
    /// JSON file shaped as {"result": [{"value": .., "label": ..}]} (loaded in the background)
    #[arg(short, long)]
    pub options: Option<PathBuf>,

    /// Simulated fetch latency in milliseconds (makes the built-in list load lazily)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Value to pre-select
    #[arg(long)]
    pub value: Option<String>,

    /// Field label
    #[arg(long)]
    pub label: Option<String>,

    /// Maximum option rows visible in the popup
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_rows: Option<u16>,

    /// Terminal row to place the control on
    #[arg(long, default_value = "0")]
    pub row: u16,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Choose the option source from the CLI flags.
fn option_source(args: &Args) -> OptionSource {
    let delay = Duration::from_millis(args.delay_ms.unwrap_or(0));
    match (&args.options, args.delay_ms) {
        (Some(path), _) => OptionSource::Lazy(json_file_fetcher(path.clone(), delay)),
        (None, Some(_)) => OptionSource::Lazy(delayed_fetcher(top_films(), delay)),
        (None, None) => OptionSource::Static(top_films()),
    }
}

fn run(args: Args) -> Result<Option<SelectOption>, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = combobox::config::load_config_with_precedence(args.config.clone())?;
        let merged = combobox::config::merge_config(config_file);
        let with_env = combobox::config::apply_env_overrides(merged);
        combobox::config::apply_cli_overrides(with_env, args.label.clone(), args.max_rows)
    };

    combobox::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let mut props = ComboboxProps::new(option_source(&args))
        .width_policy(WidthPolicy::with_min_width(config.min_width))
        .on_change(|event| {
            debug!(value = %event.value, previous = %event.previous, "Query changed");
        });
    if let Some(value) = args.value.clone() {
        props = props.value(value);
    }

    let mut controller = ComboboxController::mount(props);
    controller.focus();

    let settings = ViewSettings::from_config(&config, args.row);
    let styles = ComboboxStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));

    let selected =
        combobox::view::run_combobox(controller, KeyBindings::default(), settings, styles)?;

    match &selected {
        Some(option) => info!(value = option.value(), "Exiting with selection"),
        None => info!("Exiting without selection"),
    }
    Ok(selected)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(option) = run(args)? {
        println!("{}", option.value());
    }

    Ok(())
}
