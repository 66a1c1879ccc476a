//! Structural diff between two parsed databases.
//!
//! Messages are aligned by numeric ID (ascending), signals by name within an
//! aligned message pair (old order first, then new-only names in new order).
//! The result carries two independent views:
//! - six category lists (new/removed/modified messages and signals), compared on
//!   the summary fields in [`categories`];
//! - the aligned row view, one [`DiffRow`] per (message, signal) pair, compared
//!   on every column in [`rows`].

pub mod categories;
pub mod cell;
pub mod labels;
pub mod rows;

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::diff::{
    cell::Cell,
    rows::{ROW_WIDTH, changed_indices, empty_row, message_row, signal_row},
};
use crate::types::{database::Database, message::Message, signal::Signal};

/// Common message whose summary fields differ.
#[derive(Clone, Debug, Serialize)]
pub struct ModifiedMessage<'a> {
    pub old: &'a Message,
    pub new: &'a Message,
    /// Indices into [`categories::MESSAGE_FIELDS`].
    pub changed_fields: BTreeSet<usize>,
}

/// Signal together with the message that owns it.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SignalEntry<'a> {
    pub message: &'a Message,
    pub signal: &'a Signal,
}

/// Common signal whose summary fields differ.
#[derive(Clone, Debug, Serialize)]
pub struct ModifiedSignal<'a> {
    pub old_message: &'a Message,
    pub new_message: &'a Message,
    pub old_signal: &'a Signal,
    pub new_signal: &'a Signal,
    /// Indices into [`categories::SIGNAL_FIELDS`].
    pub changed_fields: BTreeSet<usize>,
}

/// Aligned old/new rows for one (message, signal) pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiffRow {
    /// [`rows::ROW_WIDTH`] cells; all `Empty` when the message only exists in `new`.
    pub old: Vec<Cell>,
    /// [`rows::ROW_WIDTH`] cells; all `Empty` when the message only exists in `old`.
    pub new: Vec<Cell>,
    pub has_difference: bool,
    pub changed_columns: BTreeSet<usize>,
}

impl DiffRow {
    fn compared(old: Vec<Cell>, new: Vec<Cell>) -> Self {
        let changed_columns: BTreeSet<usize> = changed_indices(&old, &new);
        DiffRow {
            has_difference: !changed_columns.is_empty(),
            old,
            new,
            changed_columns,
        }
    }

    // one side missing: every column counts as changed
    fn one_sided(old: Vec<Cell>, new: Vec<Cell>) -> Self {
        DiffRow {
            old,
            new,
            has_difference: true,
            changed_columns: (0..ROW_WIDTH).collect(),
        }
    }
}

/// Outcome of [`diff`]. Borrows both databases.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DiffResult<'a> {
    pub new_messages: Vec<&'a Message>,
    pub removed_messages: Vec<&'a Message>,
    pub modified_messages: Vec<ModifiedMessage<'a>>,
    pub new_signals: Vec<SignalEntry<'a>>,
    pub removed_signals: Vec<SignalEntry<'a>>,
    pub modified_signals: Vec<ModifiedSignal<'a>>,
    pub rows: Vec<DiffRow>,
}

/// Counts over a [`DiffResult`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub total_rows: usize,
    pub differing_rows: usize,
    pub new_messages: usize,
    pub removed_messages: usize,
    pub modified_messages: usize,
    pub new_signals: usize,
    pub removed_signals: usize,
    pub modified_signals: usize,
}

impl<'a> DiffResult<'a> {
    /// No category entries and no row with a difference.
    pub fn is_identical(&self) -> bool {
        self.new_messages.is_empty()
            && self.removed_messages.is_empty()
            && self.modified_messages.is_empty()
            && self.new_signals.is_empty()
            && self.removed_signals.is_empty()
            && self.modified_signals.is_empty()
            && !self.rows.iter().any(|row| row.has_difference)
    }

    pub fn rows_with_differences(&self) -> impl Iterator<Item = &DiffRow> + '_ {
        self.rows.iter().filter(|row| row.has_difference)
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            total_rows: self.rows.len(),
            differing_rows: self.rows_with_differences().count(),
            new_messages: self.new_messages.len(),
            removed_messages: self.removed_messages.len(),
            modified_messages: self.modified_messages.len(),
            new_signals: self.new_signals.len(),
            removed_signals: self.removed_signals.len(),
            modified_signals: self.modified_signals.len(),
        }
    }
}

/// Compares `old` against `new`. Pure and total: two empty databases give an
/// empty result.
///
/// # Example
/// ```
/// let old = can_diff::parse("BO_ 256 A: 8 N\n SG_ S : 0|8@1+ (1,0) [0|255] \"\" N\n");
/// let new = can_diff::parse("BO_ 256 A: 8 N\n SG_ S : 0|8@1+ (1,0) [0|254] \"\" N\n");
/// let result = can_diff::diff(&old, &new);
/// assert_eq!(result.modified_signals.len(), 1);
/// assert_eq!(result.rows_with_differences().count(), 1);
/// ```
pub fn diff<'a>(old: &'a Database, new: &'a Database) -> DiffResult<'a> {
    let mut result: DiffResult<'a> = DiffResult::default();

    let ids: BTreeSet<u32> = old.message_ids().chain(new.message_ids()).collect();
    for id in ids {
        match (old.get_message_by_id(id), new.get_message_by_id(id)) {
            (Some(old_msg), Some(new_msg)) => {
                diff_common_message(&mut result, old, new, old_msg, new_msg)
            }
            (Some(old_msg), None) => {
                result.removed_messages.push(old_msg);
                for row in one_sided_rows(old, old_msg) {
                    result.rows.push(DiffRow::one_sided(row, empty_row()));
                }
                result.removed_signals.extend(entries(old, old_msg));
            }
            (None, Some(new_msg)) => {
                result.new_messages.push(new_msg);
                for row in one_sided_rows(new, new_msg) {
                    result.rows.push(DiffRow::one_sided(empty_row(), row));
                }
                result.new_signals.extend(entries(new, new_msg));
            }
            (None, None) => {}
        }
    }

    debug!(summary = ?result.summary(), "diff computed");
    result
}

fn entries<'a>(db: &'a Database, msg: &'a Message) -> impl Iterator<Item = SignalEntry<'a>> + 'a {
    msg.signals(db)
        .map(move |signal| SignalEntry { message: msg, signal })
}

// Rows of a message present on one side only; a message without signals still gives one row.
fn one_sided_rows(db: &Database, msg: &Message) -> Vec<Vec<Cell>> {
    let rows: Vec<Vec<Cell>> = msg.signals(db).map(|sig| signal_row(msg, sig)).collect();
    if rows.is_empty() {
        vec![message_row(msg)]
    } else {
        rows
    }
}

fn diff_common_message<'a>(
    result: &mut DiffResult<'a>,
    old_db: &'a Database,
    new_db: &'a Database,
    old_msg: &'a Message,
    new_msg: &'a Message,
) {
    let changed_fields: BTreeSet<usize> = changed_indices(
        &categories::message_summary(old_db, old_msg),
        &categories::message_summary(new_db, new_msg),
    );
    if !changed_fields.is_empty() {
        result.modified_messages.push(ModifiedMessage {
            old: old_msg,
            new: new_msg,
            changed_fields,
        });
    }

    let old_sigs: HashMap<&str, &'a Signal> = by_name(old_db, old_msg);
    let new_sigs: HashMap<&str, &'a Signal> = by_name(new_db, new_msg);

    // old order first, then names only present in new
    let names: Vec<&str> = old_msg
        .signals(old_db)
        .map(|sig| sig.name.as_str())
        .chain(
            new_msg
                .signals(new_db)
                .map(|sig| sig.name.as_str())
                .filter(|name| !old_sigs.contains_key(name)),
        )
        .collect();

    if names.is_empty() {
        result
            .rows
            .push(DiffRow::compared(message_row(old_msg), message_row(new_msg)));
        return;
    }

    for name in names {
        match (old_sigs.get(name).copied(), new_sigs.get(name).copied()) {
            (Some(old_sig), Some(new_sig)) => {
                let changed_fields: BTreeSet<usize> = changed_indices(
                    &categories::signal_summary(old_sig),
                    &categories::signal_summary(new_sig),
                );
                if !changed_fields.is_empty() {
                    result.modified_signals.push(ModifiedSignal {
                        old_message: old_msg,
                        new_message: new_msg,
                        old_signal: old_sig,
                        new_signal: new_sig,
                        changed_fields,
                    });
                }
                result.rows.push(DiffRow::compared(
                    signal_row(old_msg, old_sig),
                    signal_row(new_msg, new_sig),
                ));
            }
            (Some(old_sig), None) => {
                result.removed_signals.push(SignalEntry {
                    message: old_msg,
                    signal: old_sig,
                });
                result.rows.push(DiffRow::compared(
                    signal_row(old_msg, old_sig),
                    message_row(new_msg),
                ));
            }
            (None, Some(new_sig)) => {
                result.new_signals.push(SignalEntry {
                    message: new_msg,
                    signal: new_sig,
                });
                result.rows.push(DiffRow::compared(
                    message_row(old_msg),
                    signal_row(new_msg, new_sig),
                ));
            }
            (None, None) => {}
        }
    }
}

fn by_name<'a>(db: &'a Database, msg: &'a Message) -> HashMap<&'a str, &'a Signal> {
    msg.signals(db).map(|sig| (sig.name.as_str(), sig)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(name: &str, start: u16) -> Signal {
        Signal {
            name: name.into(),
            bit_start: start,
            bit_length: 8,
            factor: 1.0,
            max: 255.0,
            receiver_nodes: vec!["Gateway".into()],
            ..Default::default()
        }
    }

    fn db(messages: Vec<(u32, Vec<Signal>)>) -> Database {
        let mut db = Database::default();
        for (id, signals) in messages {
            let key = db.add_message(Message::new(id, &format!("M_{id}"), 8, "Ecu"));
            for s in signals {
                db.add_signal(key, s);
            }
        }
        db
    }

    #[test]
    fn test_empty_databases() {
        let a = Database::default();
        let result = diff(&a, &a);
        assert!(result.rows.is_empty());
        assert!(result.is_identical());
        assert_eq!(result.summary(), DiffSummary::default());
    }

    #[test]
    fn test_self_diff_is_identical() {
        let a = db(vec![(0x200, vec![sig("X", 0), sig("Y", 8)]), (0x10, vec![])]);
        let result = diff(&a, &a);
        assert!(result.is_identical());
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.rows_with_differences().count(), 0);
    }

    #[test]
    fn test_removed_message_cascades() {
        let old = db(vec![(0x100, vec![sig("A", 0), sig("B", 8)])]);
        let new = db(vec![]);
        let result = diff(&old, &new);

        assert_eq!(result.removed_messages.len(), 1);
        assert_eq!(result.removed_messages[0].id, 0x100);
        let removed: Vec<&str> = result
            .removed_signals
            .iter()
            .map(|e| e.signal.name.as_str())
            .collect();
        assert_eq!(removed, vec!["A", "B"]);

        assert_eq!(result.rows.len(), 2);
        for row in &result.rows {
            assert!(row.has_difference);
            assert_eq!(row.changed_columns, (0..ROW_WIDTH).collect::<BTreeSet<usize>>());
            assert!(row.new.iter().all(Cell::is_empty));
        }
    }

    #[test]
    fn test_signal_alignment_order() {
        let old = db(vec![(1, vec![sig("C", 0), sig("A", 8)])]);
        let new = db(vec![(1, vec![sig("B", 16), sig("A", 8), sig("D", 24)])]);
        let result = diff(&old, &new);

        let row_names: Vec<String> = result
            .rows
            .iter()
            .map(|row| {
                let idx = rows::MESSAGE_COLUMNS.len();
                if row.old[idx].is_empty() {
                    row.new[idx].to_string()
                } else {
                    row.old[idx].to_string()
                }
            })
            .collect();
        assert_eq!(row_names, vec!["C", "A", "B", "D"]);

        assert_eq!(result.removed_signals.len(), 1);
        assert_eq!(result.new_signals.len(), 2);
        assert!(result.modified_signals.is_empty());

        // one-sided signal rows keep the message columns on the other side
        let removed_row = &result.rows[0];
        assert!(removed_row.has_difference);
        assert!(!removed_row.new[0].is_empty());
        assert!(!removed_row.changed_columns.contains(&0));
    }

    #[test]
    fn test_modified_message_and_signal() {
        let old = db(vec![(5, vec![sig("S", 0)])]);
        let mut changed = sig("S", 0);
        changed.unit_of_measurement = "rpm".into();
        let mut new = db(vec![(5, vec![changed])]);
        new.get_message_by_id_mut(5).unwrap().cycle_time = 100;

        let result = diff(&old, &new);
        assert_eq!(result.modified_messages.len(), 1);
        assert_eq!(result.modified_messages[0].changed_fields, BTreeSet::from([5]));
        assert_eq!(result.modified_signals.len(), 1);
        assert_eq!(result.modified_signals[0].changed_fields, BTreeSet::from([5]));

        let row = &result.rows[0];
        assert_eq!(
            row.changed_columns,
            BTreeSet::from([3, rows::MESSAGE_COLUMNS.len() + 9])
        );
    }

    #[test]
    fn test_row_only_change_is_not_categorized() {
        let old = db(vec![(5, vec![sig("S", 0)])]);
        let mut new = db(vec![(5, vec![sig("S", 0)])]);
        new.get_message_by_id_mut(5).unwrap().comment = "note".into();

        let result = diff(&old, &new);
        assert!(result.modified_messages.is_empty());
        assert_eq!(result.rows_with_differences().count(), 1);
        assert!(!result.is_identical());
    }
}
