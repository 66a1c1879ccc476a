use serde::Serialize;

use crate::types::{
    attributes::MessageAttr,
    database::{Database, SignalKey},
    signal::Signal,
};

/// CAN message defined in the database (DBC).
///
/// Maintains the numeric ID (`id`), the `name`, payload length (`byte_length`),
/// the transmitting node, the ordered list of composing signals (`signals`)
/// and the vendor attributes overlaid from `BA_ "..." BO_` records.
///
/// Every attribute that never appears in the source keeps the default listed in
/// [`MessageAttr::default_value`], so "absent" and "explicit default" are the same value.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Message {
    /// Numeric CAN ID (base 10).
    pub id: u32,
    /// Message name.
    pub name: String,
    /// Payload length in bytes.
    pub byte_length: u16,
    /// Transmitting node (ECU); empty when the `BO_` line names none.
    pub sender_node: String,
    /// Signals that belong to this message, in first-seen order.
    pub signals: Vec<SignalKey>,
    /// Associated comment (DBC `CM_ BO_` section).
    pub comment: String,

    // --- Message Attribute Entry ---
    /// `GenMsgCycleTime`
    pub cycle_time: i64,
    /// `GenMsgCycleTimeFast`
    pub cycle_time_fast: i64,
    /// `GenMsgCycleTimeActive`
    pub cycle_time_active: i64,
    /// `GenMsgSendType` (raw enum index)
    pub send_type: i64,
    /// `GenMsgNrOfRepetition`
    pub nr_of_repetition: i64,
    /// `GenMsgDelayTime`
    pub delay_time: i64,
    /// `GenMsgStartDelayTime`
    pub start_delay_time: i64,
    /// `GenMsgILSupport`
    pub il_support: i64,
    /// `NmMessage`
    pub nm_message: i64,
    /// `NmAsrMessage`
    pub nm_asr_message: i64,
    /// `VFrameFormat` (raw enum index)
    pub vframe_format: i64,
    /// `CANFD_BRS`
    pub canfd_brs: i64,
    /// `DiagRequest`
    pub diag_request: i64,
    /// `DiagResponse`
    pub diag_response: i64,
    /// `DiagState`
    pub diag_state: i64,
    /// `SystemMessageLongSymbol`
    pub long_symbol: Option<String>,
}

impl Default for Message {
    fn default() -> Self {
        let mut msg = Message {
            id: 0,
            name: String::new(),
            byte_length: 0,
            sender_node: String::new(),
            signals: Vec::new(),
            comment: String::new(),
            cycle_time: 0,
            cycle_time_fast: 0,
            cycle_time_active: 0,
            send_type: 0,
            nr_of_repetition: 0,
            delay_time: 0,
            start_delay_time: 0,
            il_support: 0,
            nm_message: 0,
            nm_asr_message: 0,
            vframe_format: 0,
            canfd_brs: 0,
            diag_request: 0,
            diag_response: 0,
            diag_state: 0,
            long_symbol: None,
        };
        for attr in MessageAttr::ALL {
            attr.set(&mut msg, attr.default_value());
        }
        msg
    }
}

impl Message {
    /// Builds a message with every attribute at its default.
    pub fn new(id: u32, name: &str, byte_length: u16, sender_node: &str) -> Self {
        Message {
            id,
            name: name.to_string(),
            byte_length,
            sender_node: sender_node.to_string(),
            ..Default::default()
        }
    }

    /// Hexadecimal ID as shown to users: `0x` prefix, uppercase digits.
    pub fn id_hex(&self) -> String {
        format!("0x{:X}", self.id)
    }

    /// Long symbol when it is set and differs from `name`, otherwise `name`.
    pub fn display_name(&self) -> &str {
        match self.long_symbol.as_deref() {
            Some(long) if !long.is_empty() && long != self.name => long,
            _ => &self.name,
        }
    }

    /// Convenience iterator over the `Signal`s belonging to this message.
    pub fn signals<'a>(&'a self, db: &'a Database) -> impl Iterator<Item = &'a Signal> + 'a {
        self.signals
            .iter()
            .filter_map(move |&key| db.get_sig_by_key(key))
    }
}
