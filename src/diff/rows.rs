//! Row-level view: one message + one signal flattened into display cells.

use std::collections::BTreeSet;

use crate::diff::{cell::Cell, labels};
use crate::types::{message::Message, signal::Signal};

/// Message part of a row.
pub const MESSAGE_COLUMNS: [&str; 19] = [
    "Id",
    "Name",
    "SendType",
    "CycleTime",
    "CycleTimeFast",
    "CycleTimeActive",
    "NrOfRepetition",
    "DelayTime",
    "StartDelayTime",
    "Dlc",
    "VFrameFormat",
    "CANFD_BRS",
    "Transmitter",
    "ILSupport",
    "NmMessage",
    "DiagRequest",
    "DiagResponse",
    "DiagState",
    "MsgComment",
];

/// Signal part of a row, following the message part.
pub const SIGNAL_COLUMNS: [&str; 18] = [
    "Name",
    "Start",
    "Length",
    "Endian",
    "Signed",
    "Scale",
    "Offset",
    "Min",
    "Max",
    "Unit",
    "InvalidValue",
    "StartValue",
    "InactiveValue",
    "SendType",
    "TimeoutTime",
    "ValueDesc",
    "Comment",
    "Receivers",
];

/// Cells per row and per side.
pub const ROW_WIDTH: usize = MESSAGE_COLUMNS.len() + SIGNAL_COLUMNS.len();

fn message_cells(msg: &Message) -> Vec<Cell> {
    vec![
        Cell::Text(msg.id_hex()),
        Cell::from(msg.display_name()),
        Cell::from(labels::MSG_SEND_TYPE.label(msg.send_type)),
        Cell::Int(msg.cycle_time),
        Cell::Int(msg.cycle_time_fast),
        Cell::Int(msg.cycle_time_active),
        Cell::Int(msg.nr_of_repetition),
        Cell::Int(msg.delay_time),
        Cell::Int(msg.start_delay_time),
        Cell::Int(i64::from(msg.byte_length)),
        Cell::from(labels::VFRAME_FORMAT.label(msg.vframe_format)),
        Cell::from(labels::CANFD_BRS.label(msg.canfd_brs)),
        Cell::from(msg.sender_node.as_str()),
        Cell::from(labels::IL_SUPPORT.label(msg.il_support)),
        Cell::from(labels::NM_MESSAGE.label(msg.nm_message)),
        Cell::from(labels::DIAG_FLAG.label(msg.diag_request)),
        Cell::from(labels::DIAG_FLAG.label(msg.diag_response)),
        Cell::from(labels::DIAG_FLAG.label(msg.diag_state)),
        Cell::text_or_empty(&msg.comment),
    ]
}

fn signal_cells(sig: &Signal) -> Vec<Cell> {
    vec![
        Cell::from(sig.display_name()),
        Cell::Int(i64::from(sig.bit_start)),
        Cell::Int(i64::from(sig.bit_length)),
        Cell::from(sig.endian.to_str()),
        Cell::from(sig.sign.to_str()),
        Cell::number(sig.factor),
        Cell::number(sig.offset),
        Cell::number(sig.min),
        Cell::number(sig.max),
        Cell::text_or_empty(&sig.unit_of_measurement),
        Cell::text_or_empty(sig.invalid_value.as_deref().unwrap_or("")),
        Cell::Int(sig.start_value),
        Cell::Int(sig.inactive_value),
        Cell::from(labels::SIG_SEND_TYPE.label(sig.send_type)),
        Cell::Int(sig.timeout_time),
        Cell::text_or_empty(&sig.value_description()),
        Cell::text_or_empty(&sig.comment),
        Cell::Text(sig.receivers_joined()),
    ]
}

/// Full row: message columns then signal columns.
pub fn signal_row(msg: &Message, sig: &Signal) -> Vec<Cell> {
    let mut row: Vec<Cell> = message_cells(msg);
    row.extend(signal_cells(sig));
    row
}

/// Message columns filled, signal columns `Empty`.
pub fn message_row(msg: &Message) -> Vec<Cell> {
    let mut row: Vec<Cell> = message_cells(msg);
    row.resize(ROW_WIDTH, Cell::Empty);
    row
}

/// All columns `Empty`.
pub fn empty_row() -> Vec<Cell> {
    vec![Cell::Empty; ROW_WIDTH]
}

/// Indices where the two cell lists differ (normalized comparison).
pub(crate) fn changed_indices(old: &[Cell], new: &[Cell]) -> BTreeSet<usize> {
    let width: usize = old.len().max(new.len());
    (0..width)
        .filter(|&idx| old.get(idx) != new.get(idx))
        .collect()
}
