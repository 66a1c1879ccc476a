use crate::core::{Outcome, strings};
use crate::types::database::Database;

/// `CM_ BO_ <ID> "Comment...";`
pub(crate) fn decode(db: &mut Database, text: &str) -> Outcome {
    let Some(("CM_", rest)) = strings::take_token(text) else {
        return Outcome::Ignored;
    };
    let Some(("BO_", rest)) = strings::take_token(rest) else {
        return Outcome::Ignored;
    };
    let Some(id) = strings::take_token(rest).and_then(|(tok, _)| tok.parse::<u32>().ok()) else {
        return Outcome::Malformed;
    };
    let Some(comment) = strings::outer_quoted(rest) else {
        return Outcome::Malformed;
    };

    match db.get_message_by_id_mut(id) {
        Some(msg) => {
            msg.comment = comment.to_string();
            Outcome::Applied
        }
        None => Outcome::Dangling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::message::Message;

    #[test]
    fn test_decode() {
        let mut db: Database = Database::default();
        db.add_message(Message::new(2527679645, "Motor_01", 8, "Motor"));

        let out = decode(&mut db, r#"CM_ BO_ 2527679645 "Funny comment about Motor_01";"#);
        assert_eq!(out, Outcome::Applied);
        assert_eq!(
            db.get_message_by_id(2527679645).unwrap().comment,
            "Funny comment about Motor_01"
        );

        // multi-line comments arrive joined with '\n'
        decode(&mut db, "CM_ BO_ 2527679645 \"first\nsecond\";");
        assert_eq!(db.get_message_by_id(2527679645).unwrap().comment, "first\nsecond");
    }

    #[test]
    fn test_skipped_records() {
        let mut db: Database = Database::default();
        db.add_message(Message::new(1, "M", 8, ""));
        assert_eq!(decode(&mut db, r#"CM_ BO_ 2 "nobody";"#), Outcome::Dangling);
        assert_eq!(decode(&mut db, r#"CM_ BO_ x "bad id";"#), Outcome::Malformed);
        assert_eq!(decode(&mut db, r#"CM_ BO_ 1 no quotes;"#), Outcome::Malformed);
        assert_eq!(decode(&mut db, r#"CM_ SG_ 1 S "signal";"#), Outcome::Ignored);
        assert_eq!(decode(&mut db, r#"CM_ "network";"#), Outcome::Ignored);
        assert_eq!(db.get_message_by_id(1).unwrap().comment, "");
    }
}
