use crate::types::{
    database::{Database, MessageKey},
    message::Message,
};

/// Decode a `BO_` line robustly using `:` as separator between name and length.
/// Accepts both: `BO_ 123 NAME: 8 Node` and `BO_ 123 NAME : 8 Node`.
///
/// Returns the key of the message whose signal block this line opens, or `None`
/// when the line is malformed (bad ID, missing name, bad length).
pub(crate) fn decode(db: &mut Database, line: &str) -> Option<MessageKey> {
    let msg: Message = read(line)?;
    Some(db.add_message(msg))
}

fn read(line: &str) -> Option<Message> {
    let line: &str = line.trim();

    // Strip leading "BO_"
    let after: &str = line.strip_prefix("BO_")?;
    if !after.starts_with(char::is_whitespace) {
        return None;
    }

    // 1) ID (first token)
    let mut split_once = after.trim_start().splitn(2, char::is_whitespace);
    let id: u32 = split_once.next()?.parse::<u32>().ok()?;
    let rest: &str = split_once.next().unwrap_or("").trim();

    // 2) NAME (everything up to the first ':')
    let colon_pos: usize = rest.find(':')?;
    let name: &str = rest[..colon_pos].trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }

    // 3) After ':' → <len> <sender?>
    let mut it = rest[colon_pos + 1..].split_ascii_whitespace();
    let byte_length: u16 = it.next()?.parse::<u16>().ok()?;
    let sender_name: &str = it.next().unwrap_or("").trim_end_matches(';');

    Some(Message::new(id, name, byte_length, sender_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let mut db: Database = Database::default();
        let key = decode(&mut db, "BO_ 2527679645 Motor_01: 8 Motor");
        assert!(key.is_some());

        let msg = db.get_message_by_id(2527679645).unwrap();
        assert_eq!(msg.name, "Motor_01");
        assert_eq!(msg.byte_length, 8);
        assert_eq!(msg.sender_node, "Motor");
        assert_eq!(msg.il_support, 1);
    }

    #[test]
    fn test_decode_spaced_colon_and_missing_sender() {
        let mut db: Database = Database::default();
        assert!(decode(&mut db, "BO_ 708 ZV_04 : 64").is_some());
        let msg = db.get_message_by_id(708).unwrap();
        assert_eq!(msg.name, "ZV_04");
        assert_eq!(msg.byte_length, 64);
        assert_eq!(msg.sender_node, "");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let mut db: Database = Database::default();
        assert!(decode(&mut db, "BO_ abc Name: 8 Node").is_none());
        assert!(decode(&mut db, "BO_ 12 Name 8 Node").is_none());
        assert!(decode(&mut db, "BO_ 12 Name: eight Node").is_none());
        assert!(decode(&mut db, "BO_ 12 : 8 Node").is_none());
        assert!(decode(&mut db, "BO_TX_BU_ 12 : A,B;").is_none());
        assert!(decode(&mut db, "BO_ -1 Name: 8 Node").is_none());
        assert!(db.is_empty());
    }
}
