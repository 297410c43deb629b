use std::fmt;

/// Which positional fields follow the command name, in the fixed order
/// username, stock, amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub user: bool,
    pub stock: bool,
    pub amount: bool,
}

impl FieldSchema {
    const fn new(user: bool, stock: bool, amount: bool) -> Self {
        Self {
            user,
            stock,
            amount,
        }
    }

    /// Number of positional fields between the command name and the
    /// transaction id.
    #[must_use]
    pub const fn positional_len(self) -> usize {
        let mut len = 0;
        if self.user {
            len += 1;
        }
        if self.stock {
            len += 1;
        }
        if self.amount {
            len += 1;
        }
        len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Add,
    Buy,
    Sell,
    Quote,
    CommitBuy,
    CommitSell,
    CancelBuy,
    CancelSell,
    SetBuyAmount,
    SetBuyTrigger,
    CancelSetBuy,
    SetSellAmount,
    SetSellTrigger,
    CancelSetSell,
    Dumplog,
    DisplaySummary,
}

impl CommandKind {
    pub const ALL: [CommandKind; 16] = [
        CommandKind::Add,
        CommandKind::Buy,
        CommandKind::Sell,
        CommandKind::Quote,
        CommandKind::CommitBuy,
        CommandKind::CommitSell,
        CommandKind::CancelBuy,
        CommandKind::CancelSell,
        CommandKind::SetBuyAmount,
        CommandKind::SetBuyTrigger,
        CommandKind::CancelSetBuy,
        CommandKind::SetSellAmount,
        CommandKind::SetSellTrigger,
        CommandKind::CancelSetSell,
        CommandKind::Dumplog,
        CommandKind::DisplaySummary,
    ];

    /// Resolves a script token, ignoring ASCII case.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(token))
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandKind::Add => "ADD",
            CommandKind::Buy => "BUY",
            CommandKind::Sell => "SELL",
            CommandKind::Quote => "QUOTE",
            CommandKind::CommitBuy => "COMMIT_BUY",
            CommandKind::CommitSell => "COMMIT_SELL",
            CommandKind::CancelBuy => "CANCEL_BUY",
            CommandKind::CancelSell => "CANCEL_SELL",
            CommandKind::SetBuyAmount => "SET_BUY_AMOUNT",
            CommandKind::SetBuyTrigger => "SET_BUY_TRIGGER",
            CommandKind::CancelSetBuy => "CANCEL_SET_BUY",
            CommandKind::SetSellAmount => "SET_SELL_AMOUNT",
            CommandKind::SetSellTrigger => "SET_SELL_TRIGGER",
            CommandKind::CancelSetSell => "CANCEL_SET_SELL",
            CommandKind::Dumplog => "DUMPLOG",
            CommandKind::DisplaySummary => "DISPLAY_SUMMARY",
        }
    }

    #[must_use]
    pub const fn schema(self) -> FieldSchema {
        match self {
            CommandKind::Add => FieldSchema::new(true, false, true),
            CommandKind::Buy
            | CommandKind::Sell
            | CommandKind::SetBuyAmount
            | CommandKind::SetBuyTrigger
            | CommandKind::SetSellAmount
            | CommandKind::SetSellTrigger => FieldSchema::new(true, true, true),
            CommandKind::Quote | CommandKind::CancelSetBuy | CommandKind::CancelSetSell => {
                FieldSchema::new(true, true, false)
            }
            CommandKind::CommitBuy
            | CommandKind::CommitSell
            | CommandKind::CancelBuy
            | CommandKind::CancelSell
            | CommandKind::Dumplog
            | CommandKind::DisplaySummary => FieldSchema::new(true, false, false),
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
