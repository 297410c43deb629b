use crate::error::CommandError;

use super::schema::{CommandKind, FieldSchema};

/// Transaction id forwarded when the script's own numbering is disabled.
pub const PLACEHOLDER_TRANSACTION: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionPolicy {
    /// Forward the bracketed id from the script line.
    FromScript,
    /// Replace every id with [`PLACEHOLDER_TRANSACTION`].
    Placeholder,
}

/// One parsed script line.
///
/// `fields` holds the command token as written, the positional fields in
/// schema order, and the transaction id last. It is never mutated after
/// parsing; encoders read it through [`Command::positional`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    fields: Vec<String>,
    raw_text: String,
}

impl Command {
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        self.kind
    }

    #[must_use]
    pub const fn schema(&self) -> FieldSchema {
        self.kind.schema()
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The comma-joined, trimmed body of the line without the bracket prefix.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// The command token exactly as written in the script.
    #[must_use]
    pub fn token(&self) -> &str {
        self.fields.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn transaction(&self) -> &str {
        self.fields.last().map_or("", String::as_str)
    }

    /// The fields between the command token and the transaction id.
    #[must_use]
    pub fn positional(&self) -> &[String] {
        let end = self.fields.len().saturating_sub(1);
        self.fields.get(1..end).unwrap_or(&[])
    }

    /// Partition key for per-user fan-out.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        if !self.schema().user {
            return None;
        }
        self.positional().first().map(String::as_str)
    }
}

/// Parses one script line of the form `[<txn>] CMD, f1, f2, ...`.
///
/// # Errors
///
/// Returns [`CommandError::MissingTransaction`] when the bracket prefix is
/// absent, [`CommandError::InvalidCommand`] for an unknown command token, and
/// [`CommandError::FieldCount`] when the number of fields does not match the
/// command's schema.
pub fn parse_line(line: &str, policy: TransactionPolicy) -> Result<Command, CommandError> {
    let Some((transaction, body)) = split_transaction(line) else {
        return Err(CommandError::MissingTransaction {
            line: line.to_owned(),
        });
    };

    let mut tokens: Vec<String> = body
        .trim()
        .split(',')
        .map(|token| token.trim().to_owned())
        .collect();

    let token = tokens.first().map_or("", String::as_str);
    let Some(kind) = CommandKind::from_token(token) else {
        return Err(CommandError::InvalidCommand {
            token: token.to_owned(),
            line: line.to_owned(),
        });
    };

    let expected = kind.schema().positional_len().saturating_add(1);
    if tokens.len() != expected {
        return Err(CommandError::FieldCount {
            command: kind.as_str(),
            expected,
            actual: tokens.len(),
            line: line.to_owned(),
        });
    }

    let raw_text = tokens.join(",");
    let transaction = match policy {
        TransactionPolicy::FromScript => transaction.to_owned(),
        TransactionPolicy::Placeholder => PLACEHOLDER_TRANSACTION.to_owned(),
    };
    tokens.push(transaction);

    Ok(Command {
        kind,
        fields: tokens,
        raw_text,
    })
}

/// Splits a line into its transaction id and command body.
///
/// The id runs from the first `[` to the last `]` after it, so ids containing
/// `]` or line breaks are taken verbatim. The body starts after the first `]`
/// anywhere in the line.
fn split_transaction(line: &str) -> Option<(&str, &str)> {
    let open = line.find('[')?;
    let after_open = line.get(open.checked_add(1)?..)?;
    let last_close = after_open.rfind(']')?;
    let transaction = after_open.get(..last_close)?;
    let body_start = line.find(']')?.checked_add(1)?;
    let body = line.get(body_start..)?;
    Some((transaction, body))
}
