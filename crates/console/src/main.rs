//! Stockyard console - browse and edit the location hierarchy from a terminal.

use std::io::{self, BufRead, Write};

use stockyard_console::shell::{execute, Command};
use stockyard_console::{render, NavigationController};
use stockyard_engine::{App, AppConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Logs go to stderr so they don't interleave with command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockyard_engine=info,stockyard_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!("Starting Stockyard console");

    let config = AppConfig::from_env()?;
    if config.is_offline() {
        tracing::info!("STOCKYARD_API_URL not set; running offline, changes stay in memory");
    }
    let app = App::from_config(&config).await?;
    let mut controller = NavigationController::from_app(app);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", render::view(&controller, ""))?;
    writeln!(stdout, "Type 'help' for commands.")?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                writeln!(stdout, "{}", usage)?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        match execute(&mut controller, command).await {
            Ok(output) => writeln!(stdout, "{}", output)?,
            Err(e) => writeln!(stdout, "error: {}", e)?,
        }
    }

    tracing::info!("Stockyard console stopped");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}
