//! Command-line front end.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use datasources::backend::factory::create_api;
use datasources::config::Config;
use datasources::console::Console;
use datasources::constants::{
    SUCCESS_DATASOURCE_CREATED, SUCCESS_DATASOURCE_DELETED, SUCCESS_DATASOURCE_DISABLED, SUCCESS_DATASOURCE_ENABLED,
    SUCCESS_DATASOURCE_UPDATED,
};
use datasources::datasource::{NameValue, OnMissing, Record, RequestMethod};
use datasources::logger;
use datasources::selection::Draft;
use datasources::sync::SaveOutcome;
use datasources::utils::time::TimeParts;

#[derive(Parser)]
#[command(name = "datasources")]
#[command(about = "Manage the data sources of a configuration-management server")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./datasources.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server root URL, overrides api.url
    #[arg(long, global = true, env = "DATASOURCES_URL")]
    url: Option<String>,

    /// Log to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured data sources
    List,

    /// Print one data source as JSON
    Show {
        /// Data source id
        id: String,
    },

    /// Create a data source
    Create(CreateArgs),

    /// Change fields of an existing data source
    Update(UpdateArgs),

    /// Enable a data source
    Enable {
        /// Data source id
        id: String,
    },

    /// Disable a data source
    Disable {
        /// Data source id
        id: String,
    },

    /// Delete a data source
    Delete {
        /// Data source id
        id: String,
    },
}

#[derive(Args)]
struct CreateArgs {
    /// Display name; the id is derived from it
    #[arg(long)]
    name: String,

    /// Endpoint URL, may contain node property placeholders
    #[arg(long)]
    source_url: String,

    /// Enable the data source right away
    #[arg(long)]
    enabled: bool,

    #[command(flatten)]
    fields: FieldArgs,
}

#[derive(Args)]
struct UpdateArgs {
    /// Data source id
    id: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    source_url: Option<String>,

    /// Header name to remove (repeatable)
    #[arg(long)]
    remove_header: Vec<String>,

    /// Query parameter name to remove (repeatable)
    #[arg(long)]
    remove_param: Vec<String>,

    #[command(flatten)]
    fields: FieldArgs,
}

/// Optional fields shared by create and update
#[derive(Args)]
struct FieldArgs {
    #[arg(long)]
    description: Option<String>,

    /// JSON path applied to the response
    #[arg(long)]
    path: Option<String>,

    /// GET or POST
    #[arg(long)]
    method: Option<RequestMethod>,

    /// Header as NAME=VALUE (repeatable)
    #[arg(long)]
    header: Vec<String>,

    /// Query parameter as NAME=VALUE (repeatable)
    #[arg(long)]
    param: Vec<String>,

    /// Refresh interval, as seconds or H:M:S
    #[arg(long)]
    schedule: Option<TimeParts>,

    /// Timeout of a full refresh, as seconds or H:M:S
    #[arg(long)]
    update_timeout: Option<TimeParts>,

    /// Timeout of a single request, as seconds or H:M:S
    #[arg(long)]
    request_timeout: Option<TimeParts>,

    /// Verify the endpoint's TLS certificate
    #[arg(long)]
    check_ssl: Option<bool>,

    /// Maximum number of requests in flight
    #[arg(long)]
    max_parallel: Option<u32>,

    /// What to do when a node has no value: "delete" or "noChange"
    #[arg(long, conflicts_with = "default_value")]
    on_missing: Option<String>,

    /// Value to set when a node has no value (any JSON text)
    #[arg(long)]
    default_value: Option<String>,

    /// Refresh on every policy generation
    #[arg(long)]
    on_generation: Option<bool>,

    /// Refresh when a node is accepted
    #[arg(long)]
    on_new_node: Option<bool>,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    if let Some(url) = &cli.url {
        config.api.url = url.clone();
        config.validate()?;
    }
    logger::init(&config.logging, cli.verbose)?;

    let mut console = Console::new(create_api(&config.api)?);
    console.init().await?;

    match cli.command {
        Commands::List => print_list(&console.sync().records().await),
        Commands::Show { id } => {
            let draft = console.select(&id).await?;
            println!("{}", serde_json::to_string_pretty(draft.source())?);
        }
        Commands::Create(args) => {
            let draft = console.new_source();
            draft.set_name(&args.name);
            draft.edit().source.http_mut().url = args.source_url;
            draft.set_enabled(args.enabled);
            apply_fields(draft, args.fields)?;
            report_save(console.save_selected().await?, &args.name);
        }
        Commands::Update(args) => {
            let draft = console.select(&args.id).await?;
            if let Some(name) = &args.name {
                draft.set_name(name);
            }
            if let Some(url) = args.source_url {
                draft.edit().source.http_mut().url = url;
            }
            for name in &args.remove_header {
                let index = find_entry(&draft.source().http().headers, name)
                    .ok_or_else(|| anyhow!("No header named '{}'", name))?;
                draft.remove_header(index);
            }
            for name in &args.remove_param {
                let index = find_entry(&draft.source().http().params, name)
                    .ok_or_else(|| anyhow!("No parameter named '{}'", name))?;
                draft.remove_param(index);
            }
            apply_fields(draft, args.fields)?;
            report_save(console.save_selected().await?, &args.id);
        }
        Commands::Enable { id } => set_enabled(&mut console, &id, true).await?,
        Commands::Disable { id } => set_enabled(&mut console, &id, false).await?,
        Commands::Delete { id } => {
            console.select(&id).await?;
            console.delete_selected().await?;
            println!("{}: {}", SUCCESS_DATASOURCE_DELETED, id);
        }
    }

    Ok(())
}

async fn set_enabled(console: &mut Console, id: &str, enabled: bool) -> Result<()> {
    let draft = console.select(id).await?;
    if draft.source().enabled == enabled {
        println!("{} is already {}", id, if enabled { "enabled" } else { "disabled" });
        return Ok(());
    }

    let now_enabled = console.toggle_selected().await?;
    let message = if now_enabled {
        SUCCESS_DATASOURCE_ENABLED
    } else {
        SUCCESS_DATASOURCE_DISABLED
    };
    println!("{}: {}", message, id);
    Ok(())
}

fn report_save(outcome: SaveOutcome, label: &str) {
    match outcome {
        SaveOutcome::Created => println!("{}: {}", SUCCESS_DATASOURCE_CREATED, label),
        SaveOutcome::Updated => println!("{}: {}", SUCCESS_DATASOURCE_UPDATED, label),
    }
}

fn find_entry(list: &[NameValue], name: &str) -> Option<usize> {
    list.iter().position(|entry| entry.same_name(name))
}

fn parse_name_value(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .with_context(|| format!("Expected NAME=VALUE, got '{}'", raw))?;
    if name.trim().is_empty() {
        bail!("Empty name in '{}'", raw);
    }
    Ok((name.trim().to_string(), value.to_string()))
}

fn apply_fields(draft: &mut Draft, fields: FieldArgs) -> Result<()> {
    if let Some(description) = &fields.description {
        draft.set_description(description);
    }

    for raw in &fields.header {
        let (name, value) = parse_name_value(raw)?;
        draft.edit().new_header = NameValue::new(name.as_str(), value);
        if !draft.add_header() {
            bail!("Header '{}' already exists", name);
        }
    }
    for raw in &fields.param {
        let (name, value) = parse_name_value(raw)?;
        draft.edit().new_param = NameValue::new(name.as_str(), value);
        if !draft.add_param() {
            bail!("Parameter '{}' already exists", name);
        }
    }

    let record = draft.edit();
    if let Some(schedule) = fields.schedule {
        record.modified_times.schedule = schedule;
    }
    if let Some(timeout) = fields.update_timeout {
        record.modified_times.update_timeout = timeout;
    }
    if let Some(timeout) = fields.request_timeout {
        record.modified_times.request_timeout = timeout;
    }
    if let Some(on_generation) = fields.on_generation {
        record.source.run_parameters.on_generation = on_generation;
    }
    if let Some(on_new_node) = fields.on_new_node {
        record.source.run_parameters.on_new_node = on_new_node;
    }

    let http = record.source.http_mut();
    if let Some(path) = fields.path {
        http.path = path;
    }
    if let Some(method) = fields.method {
        http.request_method = method;
    }
    if let Some(check_ssl) = fields.check_ssl {
        http.check_ssl = check_ssl;
    }
    if let Some(max_parallel) = fields.max_parallel {
        http.max_parallel_req = max_parallel;
    }
    if let Some(value) = fields.default_value {
        http.on_missing = OnMissing::DefaultValue { value };
    } else if let Some(policy) = fields.on_missing {
        http.on_missing = match policy.as_str() {
            "delete" => OnMissing::Delete,
            "noChange" => OnMissing::NoChange,
            other => bail!("Unknown on-missing policy '{}', expected delete or noChange", other),
        };
    }

    Ok(())
}

fn print_list(records: &[Record]) {
    if records.is_empty() {
        println!("No data sources configured");
        return;
    }

    println!("{:<24} {:<32} {:<8} {:<10} {}", "ID", "NAME", "ENABLED", "SCHEDULE", "URL");
    for record in records {
        let source = &record.source;
        let schedule = if source.run_parameters.schedule.is_scheduled() {
            record.modified_times.schedule.to_string()
        } else {
            "manual".to_string()
        };
        println!(
            "{:<24} {:<32} {:<8} {:<10} {}",
            source.id,
            source.name,
            if source.enabled { "yes" } else { "no" },
            schedule,
            source.http().url
        );
    }
}
