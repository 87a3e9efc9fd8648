// MIT License - Copyright (c) 2026 Peter Wright
// Command-line client

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

use satel_integra_bridge::constants::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RESPONSE_TIMEOUT_MS,
};
use satel_integra_bridge::decode::decode;
use satel_integra_bridge::protocol::{parse_hex, to_hex};
use satel_integra_bridge::{ClientConfig, Command, IntegraClient, PartitionTracker};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "satel-integra")]
#[command(about = "Query a Satel Integra alarm panel through its ETHM-1 module")]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Panel address (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Integration protocol port (overrides the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Print panel type, firmware version and language
    Info,
    /// Print the currently armed partitions
    Partitions,
    /// Poll armed partitions and report arm/disarm transitions
    Watch {
        #[arg(long, default_value_t = 5000)]
        interval_ms: u64,
    },
    /// Send `command + data` given as hex and print the answer
    Raw { payload: String },
    /// Print the frame for `command + data` given as hex without sending it
    Frame { payload: String },
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Config {
    #[serde(default)]
    panel: PanelToml,
}

#[derive(Debug, Deserialize)]
struct PanelToml {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_connect_timeout")]
    connect_timeout_ms: u64,
    #[serde(default = "default_response_timeout")]
    response_timeout_ms: u64,
    #[serde(default)]
    trace_frames: bool,
    #[serde(default)]
    max_retries: u32,
    #[serde(default = "default_retry_delay")]
    retry_delay_ms: u64,
}

impl Default for PanelToml {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            connect_timeout_ms: default_connect_timeout(),
            response_timeout_ms: default_response_timeout(),
            trace_frames: false,
            max_retries: 0,
            retry_delay_ms: default_retry_delay(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}
fn default_response_timeout() -> u64 {
    DEFAULT_RESPONSE_TIMEOUT_MS
}
fn default_retry_delay() -> u64 {
    500
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let panel = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str::<Config>(&text)
                .context("Failed to parse config file")?
                .panel
        }
        None => PanelToml::default(),
    };

    Ok(ClientConfig::builder()
        .host(cli.host.clone().unwrap_or(panel.host))
        .port(cli.port.unwrap_or(panel.port))
        .connect_timeout_ms(panel.connect_timeout_ms)
        .response_timeout_ms(panel.response_timeout_ms)
        .trace_frames(panel.trace_frames)
        .max_retries(panel.max_retries)
        .retry_delay_ms(panel.retry_delay_ms)
        .build())
}

fn payload_arg(hex: &str) -> Result<Command> {
    let payload = parse_hex(hex).context("Payload must be hex byte pairs, e.g. 7E or 0A")?;
    Command::from_payload(&payload).context("Payload must contain at least a command byte")
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

async fn run_info(client: &IntegraClient, json: bool) -> Result<()> {
    let info = client.device_info().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Alarm type: {}", info.alarm_type);
        println!("Version:    {}", info.version);
        println!("Language:   {}", info.language);
    }
    Ok(())
}

async fn run_partitions(client: &IntegraClient, json: bool) -> Result<()> {
    let armed = client.armed_partitions().await?;
    if json {
        println!("{}", serde_json::to_string(&armed.to_vec())?);
    } else if armed.is_empty() {
        println!("No armed partitions");
    } else {
        let list: Vec<String> = armed.iter().map(|p| p.to_string()).collect();
        println!("Armed partitions: {}", list.join(", "));
    }
    Ok(())
}

async fn run_watch(client: &IntegraClient, interval_ms: u64, json: bool) -> Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut ticker = interval(Duration::from_millis(interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut tracker = PartitionTracker::new();

    info!("Polling armed partitions every {}ms. Send SIGINT/SIGTERM to stop.", interval_ms);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Received SIGINT, shutting down...");
                break;
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                break;
            }
        }

        let armed = match client.armed_partitions().await {
            Ok(armed) => armed,
            Err(e) => {
                warn!("Poll failed: {e}");
                continue;
            }
        };
        for event in tracker.update(armed) {
            if json {
                println!("{}", serde_json::to_string(&event)?);
            } else {
                info!("{:?}", event);
            }
        }
    }
    Ok(())
}

async fn run_raw(client: &IntegraClient, command: &Command, json: bool) -> Result<()> {
    let frame = client.exchange(command).await?;
    let decoded = decode(&frame.payload());
    if json {
        let value = serde_json::json!({
            "frame": to_hex(&frame.to_bytes()),
            "decoded": decoded.as_ref().ok(),
            "error": decoded.as_ref().err().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Answer:  {}", to_hex(&frame.to_bytes()));
        println!("Payload: {}", to_hex(&frame.payload()));
        match decoded {
            Ok(decoded) => println!("Decoded: {:?}", decoded),
            Err(e) => println!("Decoded: {e}"),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity (e.g. RUST_LOG=debug or RUST_LOG=satel_integra_bridge=trace).
    // Default: info.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // systemd journal already adds timestamps, so omit them when running under systemd
    if std::env::var_os("JOURNAL_STREAM").is_some() {
        tracing_subscriber::fmt().without_time().with_env_filter(env_filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let cli = Cli::parse();

    if let CliCommand::Frame { payload } = &cli.command {
        let command = payload_arg(payload)?;
        println!("{}", to_hex(&command.to_frame()));
        return Ok(());
    }

    let config = load_config(&cli)?;
    info!("Using panel at {}:{}", config.host, config.port);
    let client = IntegraClient::new(config);

    match &cli.command {
        CliCommand::Info => run_info(&client, cli.json).await,
        CliCommand::Partitions => run_partitions(&client, cli.json).await,
        CliCommand::Watch { interval_ms } => run_watch(&client, *interval_ms, cli.json).await,
        CliCommand::Raw { payload } => run_raw(&client, &payload_arg(payload)?, cli.json).await,
        CliCommand::Frame { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.panel.host, "192.168.1.10");
        assert_eq!(config.panel.port, 7094);
        assert_eq!(config.panel.connect_timeout_ms, 750);
        assert_eq!(config.panel.response_timeout_ms, 750);
    }

    #[test]
    fn test_config_file_values() {
        let config: Config = toml::from_str(
            r#"
            [panel]
            host = "10.1.2.3"
            port = 7095
            trace_frames = true
            max_retries = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.panel.host, "10.1.2.3");
        assert_eq!(config.panel.port, 7095);
        assert!(config.panel.trace_frames);
        assert_eq!(config.panel.max_retries, 2);
        assert_eq!(config.panel.retry_delay_ms, 500);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["satel-integra", "--host", "10.9.9.9", "--port", "1234", "info"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.host, "10.9.9.9");
        assert_eq!(config.port, 1234);
    }

    #[test]
    fn test_payload_arg() {
        assert_eq!(payload_arg("7E").unwrap(), Command::DeviceInfo);
        assert!(payload_arg("").is_err());
        assert!(payload_arg("7").is_err());
    }
}
