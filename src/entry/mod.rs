use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{DEFAULT_CONFIG_FILES, WorkgenArgs};
use crate::config::{RunConfig, apply_config, load_config};
use crate::dispatch::Dispatcher;
use crate::error::AppResult;
use crate::script::ScriptReader;
use crate::transport::build_transport;

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    let args = merge_config(args, &matches)?;
    crate::system::logger::init_logging(args.verbose, args.no_color);

    let config = RunConfig::from_args(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(config))
}

fn parse_args() -> AppResult<Option<(WorkgenArgs, ArgMatches)>> {
    let mut cmd = WorkgenArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = WorkgenArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn merge_config(mut args: WorkgenArgs, matches: &ArgMatches) -> AppResult<WorkgenArgs> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, config)?;
    }
    Ok(args)
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(config: RunConfig) -> AppResult<()> {
    let script = ScriptReader::open(&config.source).await?;
    let transport = build_transport(&config)?;
    tracing::info!(
        "Replaying against {} over {} ({})",
        config.addr(),
        transport.protocol(),
        if config.parallel { "parallel" } else { "sequential" }
    );

    let dispatcher = Dispatcher::new(config, transport);
    let summary = dispatcher.run(script).await;
    summary.log();
    Ok(())
}
