//! Command line front end for the patient-records portal.
//!
//! Every subcommand works from the same startup configuration: defaults,
//! then the optional `--config` TOML file, then `API_BASE_URL` /
//! `--api-base-url`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::Method;
use serde_json::Value;

use patient_portal::config::{resolve_config, ApiConfig};
use patient_portal::http::{ApiClient, ApiError, Payload, RequestOptions};
use patient_portal::observability::init_logging;
use patient_portal::routing::{app_routes, Navigator, Params};

#[derive(Parser)]
#[command(name = "patient-portal")]
#[command(about = "Routes and backend client for the patient-records portal", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend origin, e.g. https://localhost:7048.
    #[arg(long, env = "API_BASE_URL", global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the route table
    Routes,
    /// Show which route a location resolves to
    Resolve { location: String },
    /// Generate the link for a named route
    Href {
        name: String,
        /// Route parameter, repeatable: -p id=42
        #[arg(short = 'p', long = "param", value_parser = parse_key_eq_value)]
        params: Vec<(String, String)>,
    },
    /// Show how a request path is rewritten
    Normalize { path: String },
    /// Send a request to the backend and print the response
    Request {
        method: String,
        path: String,
        /// JSON request body
        #[arg(long)]
        json: Option<String>,
        /// Extra header, repeatable: -H "accept: application/json"
        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
        /// Query parameter, repeatable: -q page=2
        #[arg(short = 'q', long = "query", value_parser = parse_key_eq_value)]
        query: Vec<(String, String)>,
    },
    /// Navigate to a location and print the data its view fetches
    Open { location: String },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        if let Some(ApiError::Status { body, .. }) = e.downcast_ref::<ApiError>() {
            if !body.is_empty() {
                eprintln!("Response: {body}");
            }
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref(), cli.api_base_url.as_deref())
        .context("Failed to load configuration")?;
    init_logging(&config.observability);

    tracing::debug!(
        base_url = %config.api.base_url,
        timeout_ms = config.api.timeout_ms,
        "Configuration loaded"
    );

    let table = app_routes().context("Invalid route table")?;

    match cli.command {
        Commands::Routes => {
            for entry in table.iter() {
                let kind = if entry.view().is_lazy() { "lazy" } else { "eager" };
                println!("{:<36} {:<18} {}", entry.path(), entry.name(), kind);
            }
        }
        Commands::Resolve { location } => match table.resolve(&location) {
            Some(m) => {
                let params: serde_json::Map<String, Value> = m
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                    .collect();
                print_json(&serde_json::json!({
                    "route": m.entry.name(),
                    "path": m.entry.path(),
                    "params": params,
                }))?;
            }
            None => anyhow::bail!("No route matches '{location}'"),
        },
        Commands::Href { name, params } => {
            let params: Params = params.into_iter().collect();
            println!("{}", table.href(&name, &params)?);
        }
        Commands::Normalize { path } => println!("{}", normalized(&config.api, &path)?),
        Commands::Request {
            method,
            path,
            json,
            headers,
            query,
        } => {
            let client = ApiClient::new(&config.api)?;
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .with_context(|| format!("Invalid HTTP method '{method}'"))?;
            let payload = json
                .map(|raw| serde_json::from_str::<Value>(&raw).map(Payload::Json))
                .transpose()
                .context("--json is not valid JSON")?;
            let options = RequestOptions { headers, query };

            let response = client.request(method, &path, payload, options).await?;
            match response.json::<Value>() {
                Ok(value) => print_json(&value)?,
                Err(_) => println!("{}", response.text()),
            }
        }
        Commands::Open { location } => {
            let client = ApiClient::new(&config.api)?;
            let mut navigator = Navigator::new(table);
            let mounted = navigator.navigate(&location).await?;
            let data = mounted.fetch(&client).await?;
            print_json(&data)?;
        }
    }

    Ok(())
}

/// The request path as the client rewrites it, before the base URL is joined.
fn normalized(api: &ApiConfig, path: &str) -> Result<String> {
    Ok(ApiClient::new(api)?.normalize(path))
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_key_eq_value(s: &str) -> Result<(String, String), String> {
    split_pair(s, '=')
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    split_pair(s, ':')
}

fn split_pair(s: &str, sep: char) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once(sep)
        .ok_or_else(|| format!("expected KEY{sep}VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
