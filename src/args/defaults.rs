pub(crate) const DEFAULT_HOST: &str = "localhost";
pub(crate) const DEFAULT_PORT: u16 = 44440;
pub(crate) const DEFAULT_RATE_MS: u64 = 50;
pub(crate) const DEFAULT_COUNTDOWN_SECS: u64 = 3;
pub(crate) const DEFAULT_REQUEST_TIMEOUT: &str = "10s";
pub(crate) const DEFAULT_CONNECT_TIMEOUT: &str = "5s";

/// Config filenames checked when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["workgen.toml", "workgen.json"];
