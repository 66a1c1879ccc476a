//! `BA_` attribute assignments.
//!
//! All three shapes share the header `BA_ "<AttributeName>"`; what follows decides
//! the target object: `BO_ <id>`, `SG_ <id> <signal>`, or the value itself (global).

pub(crate) mod ba_;
pub(crate) mod ba_bo_;
pub(crate) mod ba_sg_;

use crate::core::strings;

/// Object reference following the attribute name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Target {
    Database,
    Message,
    Signal,
    /// `BU_`, `EV_` and relation records: never overlaid.
    Other,
}

/// Splits `BA_ "<name>" <rest>` into `(name, target, rest)`.
///
/// Returns `None` when the line is not a `BA_` record or its name is not quoted.
pub(crate) fn header(line: &str) -> Option<(&str, Target, &str)> {
    let ("BA_", rest) = strings::take_token(line)? else {
        return None;
    };
    let (name, rest) = strings::take_quoted(rest)?;
    let target: Target = match strings::take_token(rest) {
        Some(("BO_", tail)) => return Some((name, Target::Message, tail)),
        Some(("SG_", tail)) => return Some((name, Target::Signal, tail)),
        Some(("BU_" | "EV_", _)) => Target::Other,
        _ => Target::Database,
    };
    Some((name, target, rest))
}
