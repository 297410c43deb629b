//! Workload script commands: the schema registry and the line parser.
mod parser;
mod schema;


pub use parser::{Command, PLACEHOLDER_TRANSACTION, TransactionPolicy, parse_line};
pub use schema::{CommandKind, FieldSchema};
