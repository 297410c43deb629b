use clap::Parser;

use crate::error::{AppError, AppResult};

use super::WorkgenArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<WorkgenArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    WorkgenArgs::try_parse_from(args).map_err(AppError::from)
}
