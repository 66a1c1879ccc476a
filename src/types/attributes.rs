//! Vendor attributes understood by the parser.
//!
//! Each `BA_` record names an attribute; only the names enumerated here are mapped
//! onto typed fields, everything else is ignored. Every table entry knows its
//! target entity, its value kind and the default the field holds when the
//! attribute never appears in the document.

use std::fmt;

use crate::types::{database::Database, message::Message, signal::Signal};

/// Attribute value kinds handled by the typed tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttrType {
    #[default]
    Int,
    String,
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttrType::Int => "Int",
            AttrType::String => "String",
        })
    }
}

/// Concrete attribute value read from a `BA_` record.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    Int(i64),
    Str(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Int(i) => write!(f, "{}", i),
            AttributeValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl AttrType {
    /// Converts the raw value token of a `BA_` record into a typed value.
    ///
    /// `Int` accepts only a bare, optionally signed integer; `String` accepts only
    /// a quoted value. Anything else yields `None` and the record is skipped.
    pub(crate) fn read(self, raw: &RawValue<'_>) -> Option<AttributeValue> {
        match (self, raw) {
            (AttrType::Int, RawValue::Bare(tok)) => tok.parse::<i64>().ok().map(AttributeValue::Int),
            (AttrType::String, RawValue::Quoted(s)) => Some(AttributeValue::Str(s.to_string())),
            _ => None,
        }
    }
}

/// Value part of a `BA_` record before typing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RawValue<'a> {
    Quoted(&'a str),
    Bare(&'a str),
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

// ---------------------------------------------------------------- Database ---

/// Document-level attributes (`BA_ "<name>" <value>;`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatabaseAttr {
    DbName,
    BusType,
    Baudrate,
    BaudrateCanFd,
}

impl DatabaseAttr {
    pub const ALL: [DatabaseAttr; 4] = [
        DatabaseAttr::DbName,
        DatabaseAttr::BusType,
        DatabaseAttr::Baudrate,
        DatabaseAttr::BaudrateCanFd,
    ];

    pub fn dbc_name(self) -> &'static str {
        match self {
            DatabaseAttr::DbName => "DBName",
            DatabaseAttr::BusType => "BusType",
            DatabaseAttr::Baudrate => "Baudrate",
            DatabaseAttr::BaudrateCanFd => "BaudrateCANFD",
        }
    }

    pub fn from_dbc_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.dbc_name() == name)
    }

    pub fn kind(self) -> AttrType {
        match self {
            DatabaseAttr::DbName | DatabaseAttr::BusType => AttrType::String,
            DatabaseAttr::Baudrate | DatabaseAttr::BaudrateCanFd => AttrType::Int,
        }
    }

    pub fn default_value(self) -> AttributeValue {
        match self {
            DatabaseAttr::DbName | DatabaseAttr::BusType => AttributeValue::Str(String::new()),
            DatabaseAttr::Baudrate => AttributeValue::Int(500_000),
            DatabaseAttr::BaudrateCanFd => AttributeValue::Int(2_000_000),
        }
    }

    /// Stores `value` on `db`. Returns `false` when the value kind does not fit.
    pub fn set(self, db: &mut Database, value: AttributeValue) -> bool {
        match (self, value) {
            (DatabaseAttr::DbName, AttributeValue::Str(s)) => db.name = s,
            (DatabaseAttr::BusType, AttributeValue::Str(s)) => db.bus_type = s,
            (DatabaseAttr::Baudrate, AttributeValue::Int(v)) => match u32::try_from(v) {
                Ok(v) => db.baudrate = v,
                Err(_) => return false,
            },
            (DatabaseAttr::BaudrateCanFd, AttributeValue::Int(v)) => match u32::try_from(v) {
                Ok(v) => db.baudrate_canfd = v,
                Err(_) => return false,
            },
            _ => return false,
        }
        true
    }
}

// ----------------------------------------------------------------- Message ---

/// Message-level attributes (`BA_ "<name>" BO_ <id> <value>;`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageAttr {
    CycleTime,
    CycleTimeFast,
    CycleTimeActive,
    SendType,
    NrOfRepetition,
    DelayTime,
    StartDelayTime,
    IlSupport,
    NmMessage,
    NmAsrMessage,
    VFrameFormat,
    CanFdBrs,
    DiagRequest,
    DiagResponse,
    DiagState,
    LongSymbol,
}

impl MessageAttr {
    pub const ALL: [MessageAttr; 16] = [
        MessageAttr::CycleTime,
        MessageAttr::CycleTimeFast,
        MessageAttr::CycleTimeActive,
        MessageAttr::SendType,
        MessageAttr::NrOfRepetition,
        MessageAttr::DelayTime,
        MessageAttr::StartDelayTime,
        MessageAttr::IlSupport,
        MessageAttr::NmMessage,
        MessageAttr::NmAsrMessage,
        MessageAttr::VFrameFormat,
        MessageAttr::CanFdBrs,
        MessageAttr::DiagRequest,
        MessageAttr::DiagResponse,
        MessageAttr::DiagState,
        MessageAttr::LongSymbol,
    ];

    pub fn dbc_name(self) -> &'static str {
        match self {
            MessageAttr::CycleTime => "GenMsgCycleTime",
            MessageAttr::CycleTimeFast => "GenMsgCycleTimeFast",
            MessageAttr::CycleTimeActive => "GenMsgCycleTimeActive",
            MessageAttr::SendType => "GenMsgSendType",
            MessageAttr::NrOfRepetition => "GenMsgNrOfRepetition",
            MessageAttr::DelayTime => "GenMsgDelayTime",
            MessageAttr::StartDelayTime => "GenMsgStartDelayTime",
            MessageAttr::IlSupport => "GenMsgILSupport",
            MessageAttr::NmMessage => "NmMessage",
            MessageAttr::NmAsrMessage => "NmAsrMessage",
            MessageAttr::VFrameFormat => "VFrameFormat",
            MessageAttr::CanFdBrs => "CANFD_BRS",
            MessageAttr::DiagRequest => "DiagRequest",
            MessageAttr::DiagResponse => "DiagResponse",
            MessageAttr::DiagState => "DiagState",
            MessageAttr::LongSymbol => "SystemMessageLongSymbol",
        }
    }

    pub fn from_dbc_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.dbc_name() == name)
    }

    pub fn kind(self) -> AttrType {
        match self {
            MessageAttr::LongSymbol => AttrType::String,
            _ => AttrType::Int,
        }
    }

    pub fn default_value(self) -> AttributeValue {
        match self {
            MessageAttr::IlSupport | MessageAttr::CanFdBrs => AttributeValue::Int(1),
            // StandardCAN_FD
            MessageAttr::VFrameFormat => AttributeValue::Int(14),
            MessageAttr::LongSymbol => AttributeValue::Str(String::new()),
            _ => AttributeValue::Int(0),
        }
    }

    /// Stores `value` on `msg`. Returns `false` when the value kind does not fit.
    pub fn set(self, msg: &mut Message, value: AttributeValue) -> bool {
        let value: i64 = match (self, value) {
            (MessageAttr::LongSymbol, AttributeValue::Str(s)) => {
                msg.long_symbol = non_empty(s);
                return true;
            }
            (MessageAttr::LongSymbol, AttributeValue::Int(_)) => return false,
            (_, AttributeValue::Int(v)) => v,
            (_, AttributeValue::Str(_)) => return false,
        };
        let slot: &mut i64 = match self {
            MessageAttr::CycleTime => &mut msg.cycle_time,
            MessageAttr::CycleTimeFast => &mut msg.cycle_time_fast,
            MessageAttr::CycleTimeActive => &mut msg.cycle_time_active,
            MessageAttr::SendType => &mut msg.send_type,
            MessageAttr::NrOfRepetition => &mut msg.nr_of_repetition,
            MessageAttr::DelayTime => &mut msg.delay_time,
            MessageAttr::StartDelayTime => &mut msg.start_delay_time,
            MessageAttr::IlSupport => &mut msg.il_support,
            MessageAttr::NmMessage => &mut msg.nm_message,
            MessageAttr::NmAsrMessage => &mut msg.nm_asr_message,
            MessageAttr::VFrameFormat => &mut msg.vframe_format,
            MessageAttr::CanFdBrs => &mut msg.canfd_brs,
            MessageAttr::DiagRequest => &mut msg.diag_request,
            MessageAttr::DiagResponse => &mut msg.diag_response,
            MessageAttr::DiagState => &mut msg.diag_state,
            MessageAttr::LongSymbol => return false,
        };
        *slot = value;
        true
    }
}

// ------------------------------------------------------------------ Signal ---

/// Signal-level attributes (`BA_ "<name>" SG_ <id> <signal> <value>;`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalAttr {
    StartValue,
    InactiveValue,
    SendType,
    TimeoutTime,
    InvalidValue,
    LongSymbol,
}

impl SignalAttr {
    pub const ALL: [SignalAttr; 6] = [
        SignalAttr::StartValue,
        SignalAttr::InactiveValue,
        SignalAttr::SendType,
        SignalAttr::TimeoutTime,
        SignalAttr::InvalidValue,
        SignalAttr::LongSymbol,
    ];

    pub fn dbc_name(self) -> &'static str {
        match self {
            SignalAttr::StartValue => "GenSigStartValue",
            SignalAttr::InactiveValue => "GenSigInactiveValue",
            SignalAttr::SendType => "GenSigSendType",
            SignalAttr::TimeoutTime => "GenSigTimeoutTime_ALL",
            SignalAttr::InvalidValue => "InvalidValue",
            SignalAttr::LongSymbol => "SystemSignalLongSymbol",
        }
    }

    pub fn from_dbc_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.dbc_name() == name)
    }

    pub fn kind(self) -> AttrType {
        match self {
            SignalAttr::InvalidValue | SignalAttr::LongSymbol => AttrType::String,
            _ => AttrType::Int,
        }
    }

    pub fn default_value(self) -> AttributeValue {
        match self.kind() {
            AttrType::Int => AttributeValue::Int(0),
            AttrType::String => AttributeValue::Str(String::new()),
        }
    }

    /// Stores `value` on `sig`. Returns `false` when the value kind does not fit.
    pub fn set(self, sig: &mut Signal, value: AttributeValue) -> bool {
        match (self, value) {
            (SignalAttr::StartValue, AttributeValue::Int(v)) => sig.start_value = v,
            (SignalAttr::InactiveValue, AttributeValue::Int(v)) => sig.inactive_value = v,
            (SignalAttr::SendType, AttributeValue::Int(v)) => sig.send_type = v,
            (SignalAttr::TimeoutTime, AttributeValue::Int(v)) => sig.timeout_time = v,
            (SignalAttr::InvalidValue, AttributeValue::Str(s)) => sig.invalid_value = non_empty(s),
            (SignalAttr::LongSymbol, AttributeValue::Str(s)) => sig.long_symbol = non_empty(s),
            _ => return false,
        }
        true
    }
}
