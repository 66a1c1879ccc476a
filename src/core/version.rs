use crate::core::strings;
use crate::types::database::Database;

pub(crate) fn decode(db: &mut Database, line: &str) {
    // Example: VERSION "1.0"
    let Some(rest) = line.trim_start().strip_prefix("VERSION") else {
        return;
    };
    if let Some((version, _)) = strings::take_quoted(rest) {
        db.version = version.to_string();
    }
}
