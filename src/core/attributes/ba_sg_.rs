use crate::core::{
    Outcome,
    attributes::{Target, header},
    strings,
};
use crate::types::{attributes::SignalAttr, database::Database};

/// `BA_ "Attribute" SG_ <ID msg> <sig_name> <value>;`
pub(crate) fn decode(db: &mut Database, line: &str) -> Outcome {
    let Some((attr_name, Target::Signal, rest)) = header(line) else {
        return Outcome::Ignored;
    };
    let Some(attr) = SignalAttr::from_dbc_name(attr_name) else {
        return Outcome::Ignored;
    };

    // message id (numeric)
    let Some((msg_id_tok, rest)) = strings::take_token(rest) else {
        return Outcome::Malformed;
    };
    let Ok(msg_id) = msg_id_tok.parse::<u32>() else {
        return Outcome::Malformed;
    };

    // sig name
    let Some((sig_name, rest)) = strings::take_token(rest) else {
        return Outcome::Malformed;
    };

    let Some(value) = strings::read_attr_value(rest).and_then(|raw| attr.kind().read(&raw)) else {
        return Outcome::Malformed;
    };

    // resolve the signal within the specific message ID
    match db.get_signal_by_name_mut(msg_id, sig_name) {
        Some(sig) => {
            if attr.set(sig, value) {
                Outcome::Applied
            } else {
                Outcome::Malformed
            }
        }
        None => Outcome::Dangling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{message::Message, signal::Signal};

    fn build_db() -> Database {
        let mut db: Database = Database::default();
        let key = db.add_message(Message::new(100, "Motor_01", 8, "Motor"));
        db.add_signal(
            key,
            Signal {
                name: "Speed".into(),
                ..Default::default()
            },
        );
        db
    }

    #[test]
    fn test_decode() {
        let mut db = build_db();
        for line in [
            r#"BA_ "GenSigStartValue" SG_ 100 Speed 255;"#,
            r#"BA_ "GenSigInactiveValue" SG_ 100 Speed -1;"#,
            r#"BA_ "GenSigSendType" SG_ 100 Speed 3;"#,
            r#"BA_ "GenSigTimeoutTime_ALL" SG_ 100 Speed 500;"#,
            r#"BA_ "InvalidValue" SG_ 100 Speed "0xFFFF";"#,
            r#"BA_ "SystemSignalLongSymbol" SG_ 100 Speed "Vehicle_Speed";"#,
        ] {
            assert_eq!(decode(&mut db, line), Outcome::Applied, "{line}");
        }
        let sig = db.get_signal_by_name(100, "Speed").unwrap();
        assert_eq!(sig.start_value, 255);
        assert_eq!(sig.inactive_value, -1);
        assert_eq!(sig.send_type, 3);
        assert_eq!(sig.timeout_time, 500);
        assert_eq!(sig.invalid_value.as_deref(), Some("0xFFFF"));
        assert_eq!(sig.display_name(), "Vehicle_Speed");
    }

    #[test]
    fn test_value_lands_on_named_signal_only() {
        let mut db = build_db();
        let key = db.get_msg_key_by_id(100).unwrap();
        db.add_signal(
            key,
            Signal {
                name: "Torque".into(),
                ..Default::default()
            },
        );
        assert_eq!(
            decode(&mut db, r#"BA_ "GenSigSendType" SG_ 100 Torque 2;"#),
            Outcome::Applied
        );
        assert_eq!(db.get_signal_by_name(100, "Torque").unwrap().send_type, 2);
        assert_eq!(db.get_signal_by_name(100, "Speed").unwrap().send_type, 0);
    }

    #[test]
    fn test_undeclared_signal_is_dropped() {
        let mut db = build_db();
        assert_eq!(
            decode(&mut db, r#"BA_ "GenSigStartValue" SG_ 100 Ghost 1;"#),
            Outcome::Dangling
        );
        assert_eq!(
            decode(&mut db, r#"BA_ "GenSigStartValue" SG_ 101 Speed 1;"#),
            Outcome::Dangling
        );
        assert_eq!(db.get_signal_by_name(100, "Speed").unwrap().start_value, 0);
    }

    #[test]
    fn test_malformed_values() {
        let mut db = build_db();
        assert_eq!(
            decode(&mut db, r#"BA_ "GenSigStartValue" SG_ 100 Speed 1.5;"#),
            Outcome::Malformed
        );
        assert_eq!(
            decode(&mut db, r#"BA_ "InvalidValue" SG_ 100 Speed 255;"#),
            Outcome::Malformed
        );
        assert_eq!(decode(&mut db, r#"BA_ "InvalidValue" SG_ 100"#), Outcome::Malformed);
        assert!(db.get_signal_by_name(100, "Speed").unwrap().invalid_value.is_none());
    }
}
