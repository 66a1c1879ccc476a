use crate::core::{Outcome, strings};
use crate::types::database::Database;

/// Parse a VAL_ line that defines value descriptions for a specific signal:
/// `VAL_ <MessageID> <SignalName> <value> "<desc>" ... ;`
///
/// Pairs are kept in source order. The first pair that cannot be read ends the table.
pub(crate) fn decode(db: &mut Database, line: &str) -> Outcome {
    let Some(("VAL_", rest)) = strings::take_token(line) else {
        return Outcome::Ignored;
    };
    let Some((id_tok, rest)) = strings::take_token(rest) else {
        return Outcome::Malformed;
    };
    let Ok(message_id) = id_tok.parse::<u32>() else {
        return Outcome::Malformed;
    };
    let Some((signal_name, mut rest)) = strings::take_token(rest) else {
        return Outcome::Malformed;
    };

    // Collect pairs: numeric value followed by quoted description
    let mut table: Vec<(i64, String)> = Vec::new();
    while let Some((val_tok, after_val)) = strings::take_token(rest) {
        let Ok(val) = val_tok.parse::<i64>() else {
            break;
        };
        let Some((desc, after_desc)) = strings::take_quoted(after_val) else {
            break;
        };
        table.push((val, desc.to_string()));
        rest = after_desc;
    }

    match db.get_signal_by_name_mut(message_id, signal_name) {
        Some(sig) => {
            sig.value_table = table;
            Outcome::Applied
        }
        None => Outcome::Dangling,
    }
}
