use serde::Serialize;

use crate::types::{attributes::SignalAttr, database::MessageKey};

/// Definition of a signal within a CAN message (DBC).
///
/// Describes position/bit-length, endianness, sign, scaling (factor/offset),
/// valid range, unit of measure, value descriptions, receiver nodes and the
/// vendor attributes overlaid from `BA_ "..." SG_` records.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Signal {
    /// Parent message key.
    #[serde(skip)]
    pub message: MessageKey,
    /// Signal name (unique within its message).
    pub name: String,
    /// Start bit exactly as written in the DBC.
    /// Motorola: position of the MSB. Intel: position of the LSB.
    pub bit_start: u16,
    /// Bit length.
    pub bit_length: u16,
    /// Endianness.
    pub endian: Endianness,
    /// Sign.
    pub sign: Signess,
    /// Scaling factor.
    pub factor: f64,
    /// Scaling offset.
    pub offset: f64,
    /// Minimum physical value.
    pub min: f64,
    /// Maximum physical value.
    pub max: f64,
    /// Unit of measure, verbatim.
    pub unit_of_measurement: String,
    /// Receiver node names, in declaration order.
    pub receiver_nodes: Vec<String>,
    /// Associated comment (DBC `CM_ SG_` section).
    pub comment: String,
    /// Raw value → label pairs (DBC `VAL_` section), in source order.
    pub value_table: Vec<(i64, String)>,

    // --- Signal Attribute Entry ---
    /// `InvalidValue`
    pub invalid_value: Option<String>,
    /// `GenSigStartValue`
    pub start_value: i64,
    /// `GenSigInactiveValue`
    pub inactive_value: i64,
    /// `GenSigSendType` (raw enum index)
    pub send_type: i64,
    /// `GenSigTimeoutTime_ALL`
    pub timeout_time: i64,
    /// `SystemSignalLongSymbol`
    pub long_symbol: Option<String>,
}

impl Default for Signal {
    fn default() -> Self {
        let mut sig = Signal {
            message: MessageKey::default(),
            name: String::new(),
            bit_start: 0,
            bit_length: 0,
            endian: Endianness::default(),
            sign: Signess::default(),
            factor: 1.0,
            offset: 0.0,
            min: 0.0,
            max: 0.0,
            unit_of_measurement: String::new(),
            receiver_nodes: Vec::new(),
            comment: String::new(),
            value_table: Vec::new(),
            invalid_value: None,
            start_value: 0,
            inactive_value: 0,
            send_type: 0,
            timeout_time: 0,
            long_symbol: None,
        };
        for attr in SignalAttr::ALL {
            attr.set(&mut sig, attr.default_value());
        }
        sig
    }
}

impl Signal {
    /// Long symbol when it is set and differs from `name`, otherwise `name`.
    pub fn display_name(&self) -> &str {
        match self.long_symbol.as_deref() {
            Some(long) if !long.is_empty() && long != self.name => long,
            _ => &self.name,
        }
    }

    /// Value table collapsed into one string: `"1: On, 0: Off"`.
    pub fn value_description(&self) -> String {
        self.value_table
            .iter()
            .map(|(raw, label)| format!("{raw}: {label}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Receivers joined with `", "`.
    pub fn receivers_joined(&self) -> String {
        self.receiver_nodes.join(", ")
    }
}

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum Endianness {
    #[default]
    Motorola, // 0
    Intel, // 1
}

impl Endianness {
    /// Maps the digit after `@` in a `SG_` line.
    pub(crate) fn from_dbc_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Endianness::Motorola),
            '1' => Some(Endianness::Intel),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Endianness::Motorola => "big",
            Endianness::Intel => "little",
        }
    }
}

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum Signess {
    #[default]
    Unsigned, // +
    Signed, // -
}

impl Signess {
    pub(crate) fn from_dbc_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Signess::Unsigned),
            '-' => Some(Signess::Signed),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Signess::Unsigned => "unsigned",
            Signess::Signed => "signed",
        }
    }
}
