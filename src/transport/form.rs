use crate::command::Command;

pub type FormField = (&'static str, String);

/// Builds the form body `command, [username], [stock], [amount], transaction`.
///
/// Optional keys are emitted only when the command's schema requires them,
/// consuming the positional fields in schema order.
#[must_use]
pub fn encode_form(command: &Command) -> Vec<FormField> {
    let schema = command.schema();
    let mut values = command.positional().iter();
    let mut form = Vec::with_capacity(schema.positional_len().saturating_add(2));

    form.push(("command", command.token().to_owned()));
    let optional = [
        ("username", schema.user),
        ("stock", schema.stock),
        ("amount", schema.amount),
    ];
    for (key, required) in optional {
        if !required {
            continue;
        }
        if let Some(value) = values.next() {
            form.push((key, value.clone()));
        }
    }
    form.push(("transaction", command.transaction().to_owned()));
    form
}
