use crate::types::database::Database;

/// Decode the BU_ line listing node names.
/// Example: `BU_: ECU1 ECU2 ECU3`
pub(crate) fn decode(db: &mut Database, line: &str) -> bool {
    // Some DBCs use "BU_:" while others use "BU_ :". Accept both.
    let Some(rest) = line.trim_start().strip_prefix("BU_") else {
        return false;
    };
    let Some(names) = rest.trim_start().strip_prefix(':') else {
        return false;
    };
    db.nodes = names
        .split_ascii_whitespace()
        .map(|name| name.trim_end_matches(';'))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    true
}
