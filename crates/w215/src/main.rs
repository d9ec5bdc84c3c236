mod cli;
mod handlers;
mod utils;

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::handlers::DeviceOptions;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    utils::init_tracing(cli.verbose);

    match cli.command {
        Command::Version => handlers::handle_version(),
        Command::Device(command) => {
            let options = DeviceOptions {
                host: cli.host,
                username: cli.username,
                password_stdin: cli.password_stdin,
                legacy: cli.legacy,
                timeout: cli.timeout,
            };
            handlers::handle_device(options, command).await;
        }
    }
}
