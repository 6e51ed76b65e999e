use anyhow::{anyhow, Context};
use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

type Result<T> = anyhow::Result<T>;

/// Installs the global subscriber. `RUST_LOG` overrides `level` when set.
/// With a `log_file` the output is appended there instead of stdout.
pub(crate) fn init(log_file: Option<&Path>, level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level {:?}", level))?,
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("could not open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.try_init(),
    }
    .map_err(|e| anyhow!(e))
}

/// Formats a datagram as `[xx] [xx] ...  - n bytes`.
pub(crate) struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "[{:02x}] ", b)?;
        }
        write!(f, " - {} bytes", self.0.len())
    }
}
