// SPDX-License-Identifier: Apache-2.0

use overpower_core::{env_flag, ENV_OVERPOWER_LOG, ENV_OVERPOWER_LOG_JSON};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::LogFlags;

const DEFAULT_LOG_FILTER: &str = "warn";

fn filter_for(flags: LogFlags) -> EnvFilter {
    if flags.quiet {
        return EnvFilter::new("error");
    }
    match flags.verbose {
        0 => {}
        1 => return EnvFilter::new("debug"),
        _ => return EnvFilter::new("trace"),
    }
    EnvFilter::try_from_env(ENV_OVERPOWER_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the stderr subscriber. Safe to call once per process; later
/// calls are ignored.
pub(crate) fn init_tracing(flags: LogFlags) {
    let filter = filter_for(flags);
    let result = if env_flag(ENV_OVERPOWER_LOG_JSON, false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    if let Err(err) = result {
        tracing::debug!("tracing subscriber already installed: {err}");
    }
}
