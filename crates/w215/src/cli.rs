use std::time::Duration;

use clap::{Parser, Subcommand};
use w215_core::credentials::DEFAULT_USERNAME;

pub fn parse_duration(arg: &str) -> Result<Duration, std::num::ParseIntError> {
    let seconds = arg.parse()?;
    Ok(Duration::from_secs(seconds))
}

/// D-Link W215/W110 smart plug client
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Plug hostname or IP address.
    /// Can also be set via W215_HOST environment variable.
    #[arg(long, global = true, env = "W215_HOST")]
    pub host: Option<String>,

    /// Login name on the plug.
    /// Can also be set via W215_USERNAME environment variable.
    #[arg(short, long, global = true, env = "W215_USERNAME", default_value = DEFAULT_USERNAME)]
    pub username: String,

    /// Read password from stdin.
    /// Useful for scripting: echo "123456" | w215 --host 192.168.0.10 --password-stdin state
    #[arg(long, global = true)]
    pub password_stdin: bool,

    /// Talk to older firmware (cached session, status page telemetry).
    #[arg(long, global = true)]
    pub legacy: bool,

    /// Timeout in seconds for each HTTP request
    #[arg(long, global = true, value_parser = parse_duration, default_value = "10")]
    pub timeout: Duration,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    #[command(flatten)]
    Device(DeviceCommand),

    /// Show version information for CLI and core library
    Version,
}

/// Commands that talk to the plug
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
    /// Show model, hardware version and protocol
    Info,
    /// Get relay state
    State,
    /// Turn relay on
    On,
    /// Turn relay off
    Off,
    /// Get current power draw in watts
    Consumption,
    /// Get total energy consumed in kWh
    Total,
    /// Get device temperature in degrees Celsius
    Temperature,
    /// Get state and all telemetry at once
    Status,
}
