//! Logger setup.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Level used when `RUST_LOG` is not set.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LevelFilter::Warn }
}

/// Initialize `env_logger`, letting `RUST_LOG` override the default level.
pub fn init(verbose: bool) {
    let default = default_level(verbose).as_str().to_ascii_lowercase();
    Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
