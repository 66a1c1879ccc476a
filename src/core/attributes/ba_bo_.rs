use crate::core::{
    Outcome,
    attributes::{Target, header},
    strings,
};
use crate::types::{attributes::MessageAttr, database::Database};

/// `BA_ "Attribute" BO_ <ID> <value>;`
pub(crate) fn decode(db: &mut Database, line: &str) -> Outcome {
    let Some((attr_name, Target::Message, rest)) = header(line) else {
        return Outcome::Ignored;
    };
    let Some(attr) = MessageAttr::from_dbc_name(attr_name) else {
        return Outcome::Ignored;
    };

    // Retrieve message ID (numeric)
    let Some((msg_id_tok, rest)) = strings::take_token(rest) else {
        return Outcome::Malformed;
    };
    let Ok(msg_id) = msg_id_tok.parse::<u32>() else {
        return Outcome::Malformed;
    };

    // Extract and type the value
    let Some(value) = strings::read_attr_value(rest).and_then(|raw| attr.kind().read(&raw)) else {
        return Outcome::Malformed;
    };

    // assign the value (lookup by ID)
    match db.get_message_by_id_mut(msg_id) {
        Some(msg) => {
            if attr.set(msg, value) {
                Outcome::Applied
            } else {
                Outcome::Malformed
            }
        }
        None => Outcome::Dangling,
    }
}
