//! Database model (SlotMap-backed).
//!
//! This module defines the in-memory **CAN database** produced by the DBC parser.
//! Storage uses **SlotMap** arenas with **stable keys**: [`MessageKey`], [`SignalKey`].
//! Public iteration follows the **insertion order** of `BO_` declarations via
//! `iter_messages()`; each message keeps its signals in first-seen order.
//!
//! **Lookups** are O(1) by numeric CAN ID (`get_message_by_id`) and linear by signal
//! name within one message (`get_signal_by_name`).
//!
//! Once [`crate::parse`] returns, nothing in the crate mutates a `Database` again:
//! the builders below are crate-private.

use serde::Serialize;
use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;

use crate::types::{
    attributes::{AttributeValue, DatabaseAttr},
    message::Message,
    signal::Signal,
};

// --- Stable keys (SlotMap) ---
new_key_type! { pub struct MessageKey; }
new_key_type! { pub struct SignalKey; }

/// In-memory representation of one parsed DBC document.
///
/// Holds document metadata (name, bus type, baud rates, version), the node list,
/// the arenas of messages/signals (SlotMaps with stable keys), the insertion-order
/// vector of messages and an id → key lookup.
#[derive(Clone, Debug, Serialize)]
pub struct Database {
    // --- General information ---
    /// Database name (`BA_ "DBName"`).
    pub name: String,
    /// Database version string (`VERSION`).
    pub version: String,
    /// Raw bus type (`BA_ "BusType"`), e.g. `"CAN FD"`.
    pub bus_type: String,
    /// Nominal baud rate in bit/s (`BA_ "Baudrate"`).
    pub baudrate: u32,
    /// Data-phase baud rate in bit/s (`BA_ "BaudrateCANFD"`).
    pub baudrate_canfd: u32,
    /// Bus participants from the `BU_` line, in declaration order.
    pub nodes: Vec<String>,

    // --- Main storage (stable-key maps) ---
    pub(crate) messages: SlotMap<MessageKey, Message>,
    pub(crate) signals: SlotMap<SignalKey, Signal>,

    // --- Order "views" ---
    pub(crate) messages_order: Vec<MessageKey>,

    // --- Lookups ---
    #[serde(skip)]
    pub(crate) msg_key_by_id: HashMap<u32, MessageKey>,
}

impl Default for Database {
    fn default() -> Self {
        let mut db = Database {
            name: String::new(),
            version: String::new(),
            bus_type: String::new(),
            baudrate: 0,
            baudrate_canfd: 0,
            nodes: Vec::new(),
            messages: SlotMap::with_key(),
            signals: SlotMap::with_key(),
            messages_order: Vec::new(),
            msg_key_by_id: HashMap::new(),
        };
        for attr in DatabaseAttr::ALL {
            attr.set(&mut db, attr.default_value());
        }
        db
    }
}

impl PartialEq for Database {
    /// Structural equality: same metadata and the same messages/signals in the
    /// same order. Arena keys are not compared.
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name
            || self.version != other.version
            || self.bus_type != other.bus_type
            || self.baudrate != other.baudrate
            || self.baudrate_canfd != other.baudrate_canfd
            || self.nodes != other.nodes
            || self.messages_order.len() != other.messages_order.len()
        {
            return false;
        }
        self.iter_messages()
            .zip(other.iter_messages())
            .all(|(a, b)| {
                detached_message(a) == detached_message(b)
                    && a.signals.len() == b.signals.len()
                    && a.signals(self)
                        .zip(b.signals(other))
                        .all(|(sa, sb)| detached_signal(sa) == detached_signal(sb))
            })
    }
}

// Copies without arena keys, for key-independent comparison.
fn detached_message(msg: &Message) -> Message {
    Message {
        signals: Vec::new(),
        ..msg.clone()
    }
}

fn detached_signal(sig: &Signal) -> Signal {
    Signal {
        message: MessageKey::default(),
        ..sig.clone()
    }
}

impl Database {
    // ------------- Messages ------------
    /// Registers a message declared by a `BO_` line.
    ///
    /// A repeated ID replaces the earlier message (its signals are dropped) but keeps
    /// the earlier position in the insertion order.
    pub(crate) fn add_message(&mut self, msg: Message) -> MessageKey {
        if let Some(key) = self.get_msg_key_by_id(msg.id) {
            if let Some(old) = self.messages.get_mut(key) {
                let stale: Vec<SignalKey> = std::mem::take(&mut old.signals);
                *old = msg;
                for sk in stale {
                    self.signals.remove(sk);
                }
            }
            return key;
        }

        let id: u32 = msg.id;
        let key: MessageKey = self.messages.insert(msg);
        self.messages_order.push(key);
        self.msg_key_by_id.insert(id, key);
        key
    }

    pub fn get_msg_key_by_id(&self, id: u32) -> Option<MessageKey> {
        self.msg_key_by_id.get(&id).copied()
    }

    pub fn get_message_by_key(&self, key: MessageKey) -> Option<&Message> {
        self.messages.get(key)
    }

    pub(crate) fn get_message_by_key_mut(&mut self, key: MessageKey) -> Option<&mut Message> {
        self.messages.get_mut(key)
    }

    /// Returns a `&Message` given the numeric CAN ID.
    pub fn get_message_by_id(&self, id: u32) -> Option<&Message> {
        let key: MessageKey = self.get_msg_key_by_id(id)?;
        self.get_message_by_key(key)
    }

    /// Returns a `&mut Message` given the numeric CAN ID.
    pub(crate) fn get_message_by_id_mut(&mut self, id: u32) -> Option<&mut Message> {
        let key: MessageKey = self.get_msg_key_by_id(id)?;
        self.get_message_by_key_mut(key)
    }

    /// Returns a `&Message` given a hexadecimal ID.
    ///
    /// The argument may come in various forms, e.g. `"12dd54e3"`, `"0x12dd54e3"`, `"0X12DD54E3"`.
    pub fn get_message_by_id_hex(&self, id_hex: &str) -> Option<&Message> {
        let digits: &str = id_hex.trim();
        let digits: &str = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        let id: u32 = u32::from_str_radix(digits, 16).ok()?;
        self.get_message_by_id(id)
    }

    /// Messages in `BO_` declaration order.
    pub fn iter_messages(&self) -> impl Iterator<Item = &Message> + '_ {
        self.messages_order
            .iter()
            .filter_map(|&key| self.messages.get(key))
    }

    /// Message IDs in `BO_` declaration order.
    pub fn message_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter_messages().map(|m| m.id)
    }

    pub fn message_count(&self) -> usize {
        self.messages_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages_order.is_empty()
    }

    // ------------- Signals ------------
    /// Attaches a signal to `msg_key`.
    ///
    /// A repeated name within the same message overwrites the earlier signal in place.
    pub(crate) fn add_signal(&mut self, msg_key: MessageKey, mut sig: Signal) -> Option<SignalKey> {
        sig.message = msg_key;
        if let Some(existing) = self.find_signal_key(msg_key, &sig.name) {
            if let Some(slot) = self.signals.get_mut(existing) {
                *slot = sig;
            }
            return Some(existing);
        }

        self.messages.get(msg_key)?;
        let sig_key: SignalKey = self.signals.insert(sig);
        if let Some(msg) = self.messages.get_mut(msg_key) {
            msg.signals.push(sig_key);
        }
        Some(sig_key)
    }

    fn find_signal_key(&self, msg_key: MessageKey, name: &str) -> Option<SignalKey> {
        let msg: &Message = self.messages.get(msg_key)?;
        msg.signals.iter().copied().find(|&sk| {
            self.signals
                .get(sk)
                .is_some_and(|s| s.name == name)
        })
    }

    pub fn get_sig_by_key(&self, key: SignalKey) -> Option<&Signal> {
        self.signals.get(key)
    }

    pub(crate) fn get_sig_by_key_mut(&mut self, key: SignalKey) -> Option<&mut Signal> {
        self.signals.get_mut(key)
    }

    /// Returns the signal `name` of the message with CAN ID `id` (exact name match).
    pub fn get_signal_by_name(&self, id: u32, name: &str) -> Option<&Signal> {
        let msg_key: MessageKey = self.get_msg_key_by_id(id)?;
        let sig_key: SignalKey = self.find_signal_key(msg_key, name)?;
        self.get_sig_by_key(sig_key)
    }

    /// Mutable access used by the overlay passes of the parser.
    pub(crate) fn get_signal_by_name_mut(&mut self, id: u32, name: &str) -> Option<&mut Signal> {
        let msg_key: MessageKey = self.get_msg_key_by_id(id)?;
        let sig_key: SignalKey = self.find_signal_key(msg_key, name)?;
        self.get_sig_by_key_mut(sig_key)
    }

    /// Signals of `msg` in first-seen order.
    pub fn signals_of<'a>(&'a self, msg: &'a Message) -> impl Iterator<Item = &'a Signal> + 'a {
        msg.signals(self)
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    // ------------- Document attributes ------------
    /// Applies a document-level attribute. Returns `false` if the value kind does not fit.
    pub(crate) fn set_attribute(&mut self, attr: DatabaseAttr, value: AttributeValue) -> bool {
        attr.set(self, value)
    }
}
