use crate::core::{Outcome, strings};
use crate::types::database::Database;

/// Parse a signal-level comment:
/// `CM_ SG_ <MessageID> <SignalName> "Comment...";`
pub(crate) fn decode(db: &mut Database, text: &str) -> Outcome {
    let Some(("CM_", rest)) = strings::take_token(text) else {
        return Outcome::Ignored;
    };
    let Some(("SG_", rest)) = strings::take_token(rest) else {
        return Outcome::Ignored;
    };
    let Some((id_tok, rest)) = strings::take_token(rest) else {
        return Outcome::Malformed;
    };
    let Ok(message_id) = id_tok.parse::<u32>() else {
        return Outcome::Malformed;
    };
    let Some((signal_name, rest)) = strings::take_token(rest) else {
        return Outcome::Malformed;
    };
    let Some(comment) = strings::outer_quoted(rest) else {
        return Outcome::Malformed;
    };

    match db.get_signal_by_name_mut(message_id, signal_name) {
        Some(sig) => {
            sig.comment = comment.to_string();
            Outcome::Applied
        }
        None => Outcome::Dangling,
    }
}
