//! STORM - Interactive shell
//!
//! Reads commands from stdin and answers with one JSON line per command.
//! Logs go to stderr so stdout stays machine-readable.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storm::shell::{self, Outcome, Shell};
use storm::{Config, ShardedStore};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storm=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    config.validate()?;
    let store = Arc::new(ShardedStore::from_config(&config)?);
    info!(
        shard_capacity = config.shard_capacity,
        shard_count = config.shard_count,
        "shell store initialized"
    );

    let mut session = Shell::new(store, config.history_size);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{}", shell::banner())?;

    let mut line = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read command")?;
        if read == 0 {
            break; // EOF
        }

        match session.execute(&line) {
            Outcome::Reply(lines) => {
                for reply in lines {
                    writeln!(stdout, "{}", reply)?;
                }
            }
            Outcome::Silent => {}
            Outcome::Exit => break,
        }
    }

    Ok(())
}
