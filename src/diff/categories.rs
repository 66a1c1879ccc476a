//! Summary fields used to classify common messages and signals as modified.
//! Changed-field indices index into [`MESSAGE_FIELDS`] / [`SIGNAL_FIELDS`].

use std::collections::BTreeSet;

use crate::diff::{cell::Cell, labels};
use crate::types::{database::Database, message::Message, signal::Signal};

/// Receiver placeholder for "no receiver".
const NO_RECEIVER: &str = "Vector__XXX";

pub const MESSAGE_FIELDS: [&str; 8] = [
    "Message ID",
    "Message Name",
    "Message Length",
    "Signals",
    "Send Type",
    "Cycle Time",
    "Tx ECU",
    "Rx ECUs",
];

pub const SIGNAL_FIELDS: [&str; 9] = [
    "Start Bit",
    "Length",
    "Initial",
    "Minimum",
    "Maximum",
    "Unit",
    "Factor",
    "Value Table",
    "Rx ECUs",
];

/// Sorted, de-duplicated union of the receivers of every signal in `msg`,
/// without the `Vector__XXX` placeholder, joined with `", "`.
pub fn message_receivers(db: &Database, msg: &Message) -> String {
    let rx: BTreeSet<&str> = msg
        .signals(db)
        .flat_map(|sig| sig.receiver_nodes.iter())
        .map(String::as_str)
        .filter(|r| !r.is_empty() && *r != NO_RECEIVER)
        .collect();
    rx.into_iter().collect::<Vec<_>>().join(", ")
}

pub(crate) fn message_summary(db: &Database, msg: &Message) -> Vec<Cell> {
    let signal_names: Vec<&str> = msg.signals(db).map(Signal::display_name).collect();
    vec![
        Cell::Text(msg.id_hex()),
        Cell::from(msg.display_name()),
        Cell::Int(i64::from(msg.byte_length)),
        Cell::Text(signal_names.join("\n")),
        Cell::from(labels::MSG_SEND_TYPE.label(msg.send_type)),
        Cell::Int(msg.cycle_time),
        Cell::from(msg.sender_node.as_str()),
        Cell::Text(message_receivers(db, msg)),
    ]
}

pub(crate) fn signal_summary(sig: &Signal) -> Vec<Cell> {
    vec![
        Cell::Int(i64::from(sig.bit_start)),
        Cell::Int(i64::from(sig.bit_length)),
        Cell::Int(sig.start_value),
        Cell::number(sig.min),
        Cell::number(sig.max),
        Cell::from(sig.unit_of_measurement.as_str()),
        Cell::number(sig.factor),
        Cell::Text(sig.value_description()),
        Cell::Text(sig.receivers_joined()),
    ]
}
