mod args;
mod command;
mod config;
mod dispatch;
mod entry;
mod error;
mod script;
mod system;
mod transport;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
