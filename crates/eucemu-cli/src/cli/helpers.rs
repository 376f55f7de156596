use anyhow::Context;
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr and default to `warn`, so the diagnostic block stays unchanged
/// unless `RUST_LOG` asks for more.
pub(super) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

pub(super) fn write_all_flushed<W: Write>(writer: &mut W, content: &str) -> anyhow::Result<()> {
    writer
        .write_all(content.as_bytes())
        .context("failed to write boost table")?;
    writer.flush().context("failed to flush boost table")?;
    Ok(())
}
