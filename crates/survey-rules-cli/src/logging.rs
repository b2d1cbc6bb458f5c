use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr subscriber. `RUST_LOG` wins over the configured filter.
pub fn init(configured: Option<&str>) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match configured {
            Some(directive) => EnvFilter::try_new(directive)
                .with_context(|| format!("invalid [log] filter '{directive}'"))?,
            None => EnvFilter::new(DEFAULT_FILTER),
        },
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
    if let Err(err) = installed {
        debug!(%err, "tracing subscriber already installed; keeping it");
    }
    Ok(())
}
