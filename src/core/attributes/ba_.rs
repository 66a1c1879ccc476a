use crate::core::{
    Outcome,
    attributes::{Target, header},
    strings,
};
use crate::types::{
    attributes::{AttributeValue, DatabaseAttr},
    database::Database,
};

/// Global attributes:
/// `BA_ "DBName" "TestCAN";`, `BA_ "BusType" "CAN FD";`,
/// `BA_ "Baudrate" 500000;`, `BA_ "BaudrateCANFD" 2000000;`
pub(crate) fn decode(db: &mut Database, line: &str) -> Outcome {
    let Some((attr_name, Target::Database, rest)) = header(line) else {
        return Outcome::Ignored;
    };
    let Some(attr) = DatabaseAttr::from_dbc_name(attr_name) else {
        return Outcome::Ignored;
    };

    let Some(raw) = strings::read_attr_value(rest) else {
        return Outcome::Malformed;
    };
    let Some(value) = attr.kind().read(&raw) else {
        return Outcome::Malformed;
    };
    apply(db, attr, value)
}

fn apply(db: &mut Database, attr: DatabaseAttr, value: AttributeValue) -> Outcome {
    if db.set_attribute(attr, value) {
        Outcome::Applied
    } else {
        Outcome::Malformed
    }
}
