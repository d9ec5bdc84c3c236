use std::io::IsTerminal;

use serde::Serialize;
use tracing_subscriber::EnvFilter;
use w215_core::Credentials;

/// Install the stderr log subscriber.
///
/// `--verbose` selects DEBUG, otherwise only warnings and errors are shown.
/// `RUST_LOG` overrides both.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read password securely based on the provided options.
///
/// # Priority
///
/// 1. If `password_stdin` is true, read from stdin
/// 2. Otherwise, prompt interactively (if terminal is available)
pub fn read_password(password_stdin: bool, prompt: &str) -> Result<String, String> {
    if password_stdin {
        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .map_err(|e| format!("Failed to read password from stdin: {}", e))?;
        return Ok(input.trim().to_string());
    }

    if std::io::stdin().is_terminal() {
        eprint!("{}: ", prompt);
        rpassword::read_password().map_err(|e| format!("Failed to read password: {}", e))
    } else {
        Err("No password provided. Use --password-stdin or set W215_PASSWORD.".to_string())
    }
}

/// Get credentials from CLI options and environment.
///
/// Password is read from W215_PASSWORD env var, stdin (if --password-stdin),
/// or interactively prompted.
pub fn get_credentials(username: String, password_stdin: bool) -> Result<Credentials, String> {
    if let Ok(pass) = std::env::var("W215_PASSWORD") {
        return Ok(Credentials::new(username, pass));
    }

    let prompt = format!("Password for {}", username);
    let pass = read_password(password_stdin, &prompt)?;
    Ok(Credentials::new(username, pass))
}

/// Print a value as one line of JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(&format!("Could not encode output: {}", e)),
    }
}

/// Print `Error: <message>` on stderr and exit with status 1.
pub fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
