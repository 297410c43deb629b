//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

pub use cli::WorkgenArgs;

pub(crate) use defaults::DEFAULT_CONFIG_FILES;
pub(crate) use parsers::parse_duration;
