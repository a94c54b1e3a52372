mod config;
mod output;
mod terminal_output;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use bridger_config::{config_dir, config_file_path, load_config, prepare, BridgerConfig, SettingsStore};
use bridger_core::BridgerError;
use bridger_markup::{segment, MarkerParser, RenderOptions, Renderer};
use bridger_planner::providers::OllamaProvider;
use bridger_planner::{OverlapGate, Simplifier};
use bridger_view::{spawn_settings_listener, ViewController};

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "bridger")]
#[command(about = "Simplify text into a readable, marked-up form")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $BRIDGER_CONFIG_DIR/config.yaml or ~/.bridger/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Text to process; read from --file or stdin when omitted
    text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct RenderArgs {
    #[arg(long, value_enum, default_value = "plain")]
    format: OutputFormat,

    /// Underline words of eight or more letters
    #[arg(long)]
    highlight_long_words: bool,

    /// Split long words into syllable-like chunks
    #[arg(long)]
    split_long_words: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simplify text with the configured model and render the result
    Simplify {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        render: RenderArgs,
        /// Show the original text even when the model output is accepted
        #[arg(long)]
        original: bool,
    },
    /// Render already marked-up text without calling a model
    Render {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Score a model output against its input with the overlap gate
    Score {
        #[arg(long)]
        input: String,
        #[arg(long)]
        output: String,
        #[arg(long)]
        json: bool,
    },
    /// Show how long words are split
    Segment {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print the effective configuration as YAML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let raw = config::apply_env_overrides(load_config(&path).await?);
    let (config, report) = prepare(raw);

    let logging = config.logging.clone().unwrap_or_default();
    let log_dir = logging.dir.as_deref().map(Path::new);
    bridger_logging::init_logger(&config.log_level(), logging.json.unwrap_or(false), log_dir);

    for warning in &report.warnings {
        terminal_output::note_warn(&warning.to_string());
    }
    if !report.is_valid() {
        for error in &report.errors {
            terminal_output::note_error(&error.to_string());
        }
        return Err(BridgerError::Config(format!("invalid configuration at {}", path.display())).into());
    }
    debug!(path = %path.display(), "Configuration ready");

    match cli.command {
        Commands::Simplify {
            input,
            render,
            original,
        } => {
            let text = read_input(&input).await?;
            let store = settings_store(&config, &render)?;
            run_simplify(&config, store, &text, render.format, original).await?;
        }
        Commands::Render { input, render } => {
            let text = read_input(&input).await?;
            let settings = settings_store(&config, &render)?.current();
            let document = MarkerParser::parse(&text);
            let nodes = Renderer::render(&document, &RenderOptions::from(&settings));
            println!("{}", output::format_nodes(&nodes, &settings, render.format)?);
        }
        Commands::Score { input, output, json } => {
            let gate = OverlapGate::new(config::gate_thresholds(&config.gate()));
            let report = gate.evaluate(&input, &output);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let verdict = match report.verdict {
                    bridger_planner::GateVerdict::Accept => "accept".to_string(),
                    bridger_planner::GateVerdict::Reject(reason) => format!("reject ({})", reason.as_str()),
                };
                let rows = vec![
                    vec!["input_tokens".to_string(), report.input_tokens.to_string()],
                    vec!["output_tokens".to_string(), report.output_tokens.to_string()],
                    vec!["overlap_count".to_string(), report.overlap_count.to_string()],
                    vec!["overlap_ratio".to_string(), format!("{:.2}", report.overlap_ratio)],
                    vec!["length_ratio".to_string(), format!("{:.2}", report.length_ratio)],
                    vec!["verdict".to_string(), verdict],
                ];
                let columns = [
                    terminal_output::Column::left("Metric"),
                    terminal_output::Column::right("Value"),
                ];
                print!(
                    "{}",
                    terminal_output::render_table(&columns, &rows, terminal_output::supports_color())
                );
            }
        }
        Commands::Segment { words } => {
            for word in &words {
                println!("{word}\t{}", segment(word).join("·"));
            }
        }
        Commands::Config => {
            print!("{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}

/// Settings from the config file, with the long-word flags patched on top.
fn settings_store(config: &BridgerConfig, render: &RenderArgs) -> Result<SettingsStore> {
    let store = SettingsStore::new(config.settings());
    let mut patch = serde_json::Map::new();
    if render.highlight_long_words {
        patch.insert("highlightLongWords".into(), true.into());
    }
    if render.split_long_words {
        patch.insert("splitLongWords".into(), true.into());
    }
    store.update(&serde_json::Value::Object(patch))?;
    Ok(store)
}

async fn read_input(input: &InputArgs) -> Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }
    if let Some(file) = &input.file {
        return tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read input file: {}", file.display()));
    }
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read stdin")?;
    Ok(text)
}

async fn run_simplify(
    config: &BridgerConfig,
    store: SettingsStore,
    text: &str,
    format: OutputFormat,
    original: bool,
) -> Result<()> {
    let model = config.model();
    info!(base_url = %model.base_url, model = %model.name, "Simplifying selection");

    let provider = OllamaProvider::new().with_base_url(&model.base_url);
    let simplifier = Simplifier::new(Arc::new(provider), config::simplifier_options(&model));
    let gate = OverlapGate::new(config::gate_thresholds(&config.gate()));
    let controller = ViewController::new(Arc::new(simplifier), gate, store.current());
    let listener = spawn_settings_listener(controller.clone(), store.subscribe());

    let id = controller.transform_selection(text).await;
    if id.is_some() && original {
        store.update(&serde_json::json!({ "viewMode": "original" }))?;
    }
    // Closing the store lets the listener apply any pending change and stop.
    drop(store);
    listener.await?;

    let Some(id) = id else {
        terminal_output::note_warn("Nothing to simplify");
        return Ok(());
    };
    for notice in controller.take_notices().await {
        terminal_output::note(&notice);
    }

    let Some(rendition) = controller.display(id).await else {
        bail!("Selection disappeared before it could be displayed");
    };
    let settings = controller.settings().await;
    println!("{}", output::format_rendition(&rendition, &settings, format)?);
    Ok(())
}
