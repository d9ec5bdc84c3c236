use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};
use w215_core::{DeviceConfig, DeviceInfo, PlugState, Reading, SmartPlug};

use crate::cli::DeviceCommand;
use crate::utils::{fail, get_credentials, print_json};

/// Connection options shared by every device command.
pub struct DeviceOptions {
    pub host: Option<String>,
    pub username: String,
    pub password_stdin: bool,
    pub legacy: bool,
    pub timeout: Duration,
}

/// Everything the `status` command reports.
#[derive(Serialize)]
struct StatusReport {
    #[serde(flatten)]
    info: DeviceInfo,
    state: PlugState,
    current_consumption: Reading,
    total_consumption: Reading,
    temperature: Reading,
}

/// Handle the version command.
pub fn handle_version() {
    println!("w215 {}", env!("CARGO_PKG_VERSION"));
    println!("w215-core {}", w215_core::VERSION);
}

/// Handle a command addressed to one plug.
pub async fn handle_device(options: DeviceOptions, command: DeviceCommand) {
    let Some(host) = options.host else {
        fail("No host given. Use --host or set W215_HOST.");
    };

    let credentials = match get_credentials(options.username, options.password_stdin) {
        Ok(c) => c,
        Err(e) => fail(&e),
    };

    let config = DeviceConfig::new(host.clone(), "")
        .with_credentials(credentials)
        .with_legacy_protocol(options.legacy)
        .with_timeout(options.timeout);

    debug!(host = %host, legacy = options.legacy, "connecting");
    let mut plug = match SmartPlug::connect(config).await {
        Ok(plug) => plug,
        Err(e) => {
            error!(host = %host, error = %e, "could not create client");
            fail(&format!("Could not connect to {}: {}", host, e));
        }
    };

    match command {
        DeviceCommand::Info => print_json(&plug.info()),
        DeviceCommand::State => print_json(&json!({ "state": plug.state().await })),
        DeviceCommand::On => switch(&mut plug, true).await,
        DeviceCommand::Off => switch(&mut plug, false).await,
        DeviceCommand::Consumption => print_json(&json!({
            "current_consumption": plug.current_consumption().await,
        })),
        DeviceCommand::Total => print_json(&json!({
            "total_consumption": plug.total_consumption().await,
        })),
        DeviceCommand::Temperature => print_json(&json!({
            "temperature": plug.temperature().await,
        })),
        DeviceCommand::Status => {
            let report = StatusReport {
                info: plug.info(),
                state: plug.state().await,
                current_consumption: plug.current_consumption().await,
                total_consumption: plug.total_consumption().await,
                temperature: plug.temperature().await,
            };
            print_json(&report);
        }
    }
}

async fn switch(plug: &mut SmartPlug, on: bool) {
    let requested = if on { PlugState::On } else { PlugState::Off };
    match plug.set_power(on).await {
        Some(result) => print_json(&json!({ "state": requested, "result": result })),
        None => {
            error!(host = %plug.host(), state = %requested, "could not switch relay");
            fail(&format!("Could not switch {} {}", plug.host(), requested));
        }
    }
}
