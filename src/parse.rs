use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};

use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::{debug, trace};

use crate::core::{self as records, Outcome};
use crate::types::{
    database::{Database, MessageKey},
    errors::DbcParseError,
    options::{ParseOptions, TextEncoding},
};

/// One logical DBC record: a trimmed line, or a `CM_` record joined over several lines.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Statement {
    /// 1-based line number where the record starts.
    line: usize,
    text: String,
}

/// Overlay sweep: looks up its target entity and patches it.
type Overlay = fn(&mut Database, &str) -> Outcome;

/// Overlay sweeps run after the construction pass, each over the whole document.
/// They write disjoint fields, so their relative order does not matter.
const OVERLAYS: [(&str, Overlay); 6] = [
    ("BA_ (global)", records::attributes::ba_::decode),
    ("BA_ BO_", records::attributes::ba_bo_::decode),
    ("BA_ SG_", records::attributes::ba_sg_::decode),
    ("VAL_", records::val_::decode),
    ("CM_ BO_", records::comments::cm_bo_::decode),
    ("CM_ SG_", records::comments::cm_sg_::decode),
];

/// Parses DBC text into a [`Database`].
///
/// Never fails: unreadable records are skipped one by one, attributes/comments/value
/// tables naming an undeclared message or signal are dropped.
///
/// Records handled:
/// - **Nodes** (from `BU_` line)
/// - **Version** (from `VERSION` line)
/// - **Messages** (from `BO_` lines) and their **Signals** (from the `SG_` lines that follow)
/// - **Name**, **BusType**, **Baudrate**, **BaudrateCANFD** (from global `BA_` lines)
/// - **Message attributes** (from `BA_ "..." BO_` lines)
/// - **Signal attributes** (from `BA_ "..." SG_` lines)
/// - **Value tables** (from `VAL_` lines)
/// - **Comments** for messages and signals (from `CM_` lines)
///
/// # Example
/// ```
/// let db = can_diff::parse(
///     "BO_ 256 Motor_01: 8 Motor\n SG_ Speed : 0|16@1+ (0.01,0) [0|655.35] \"km/h\" Gateway\n",
/// );
/// let msg = db.get_message_by_id(0x100).unwrap();
/// assert_eq!(msg.signals(&db).count(), 1);
/// ```
pub fn parse(text: &str) -> Database {
    let statements: Vec<Statement> = statements(text);
    let mut db: Database = Database::default();

    build_entities(&mut db, &statements);
    for (label, overlay) in OVERLAYS {
        apply_overlay(&mut db, &statements, label, overlay);
    }

    debug!(
        messages = db.message_count(),
        signals = db.signal_count(),
        nodes = db.nodes.len(),
        "DBC parsed"
    );
    db
}

/// Decodes raw bytes according to `opts` and parses them. Never fails.
pub fn parse_bytes(bytes: &[u8], opts: &ParseOptions) -> Database {
    let text: Cow<'_, str> = decode_text(bytes, opts);
    parse(&text)
}

/// Parses a DBC file and returns a populated [`Database`] instance.
///
/// The file is decoded as UTF-8, invalid byte sequences become `U+FFFD`.
/// Use [`from_dbc_file_with`] to pick another decoding.
///
/// # Errors
/// Returns an `Err(DbcParseError)` if the file cannot be opened or read.
/// Malformed content is never an error.
///
/// # Example
/// ```no_run
/// let db = can_diff::from_dbc_file("old/01_Body_CAN.dbc").expect("Failed to parse DBC file");
/// println!("Parsed {} messages", db.message_count());
/// ```
pub fn from_dbc_file(path: &str) -> Result<Database, DbcParseError> {
    from_dbc_file_with(path, &ParseOptions::default())
}

/// Same as [`from_dbc_file`], with explicit [`ParseOptions`].
pub fn from_dbc_file_with(path: &str, opts: &ParseOptions) -> Result<Database, DbcParseError> {
    let file: File = File::open(path).map_err(|source| DbcParseError::OpenFile {
        path: path.to_string(),
        source,
    })?;
    let mut reader: BufReader<File> = BufReader::new(file);

    // read raw bytes
    let mut bytes: Vec<u8> = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| DbcParseError::Read {
            path: path.to_string(),
            source,
        })?;

    debug!(path, bytes = bytes.len(), "reading DBC file");
    Ok(parse_bytes(&bytes, opts))
}

/// Turns bytes into text. Never fails: undecodable input is replaced, not rejected.
fn decode_text<'a>(bytes: &'a [u8], opts: &ParseOptions) -> Cow<'a, str> {
    let text: Cow<'a, str> = match opts.encoding {
        TextEncoding::Utf8Lossy => UTF_8.decode_with_bom_removal(bytes).0,
        TextEncoding::Windows1252 => WINDOWS_1252.decode_with_bom_removal(bytes).0,
        TextEncoding::Auto => {
            let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
            if had_errors {
                debug!("input is not valid UTF-8, decoding as Windows-1252");
                WINDOWS_1252.decode_with_bom_removal(bytes).0
            } else {
                text
            }
        }
    };

    if opts.transliterate {
        Cow::Owned(transliterate(&text))
    } else {
        text
    }
}

/// Swap german chars with ASCII fallbacks.
fn transliterate(text: &str) -> String {
    let mut out: String = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            'ü' => out.push('u'),
            'ö' => out.push('o'),
            'ä' => out.push('a'),
            'ß' => out.push_str("ss"),
            'Ü' => out.push('U'),
            'Ö' => out.push('O'),
            'Ä' => out.push('A'),
            '¿' => out.push('?'),
            _ => out.push(ch),
        }
    }
    out
}

/// Splits the document into records.
///
/// Lines are trimmed at the start; empty lines and `//` comments are dropped.
/// A `CM_` record whose quoted text is still open continues on the following lines
/// until the closing quote (joined with `'\n'`). A line opening another record ends
/// the continuation; the comment then stays unterminated and is skipped later.
fn statements(text: &str) -> Vec<Statement> {
    let mut out: Vec<Statement> = Vec::new();
    let mut lines = text.lines().enumerate().peekable();

    while let Some((idx, raw)) = lines.next() {
        let line: &str = raw.trim_start();

        // skip comments and empty lines
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        let mut full: String = line.trim_end().to_string();
        if line.starts_with("CM_") && records::strings::count_unescaped_quotes(&full) == 1 {
            // Read subsequent lines until we close the quoted segment
            while let Some((_, next)) = lines.next_if(|(_, next)| !opens_record(next)) {
                full.push('\n');
                full.push_str(next.trim_start().trim_end());
                if records::strings::has_complete_quoted_segment(&full) {
                    break;
                }
            }
        }

        out.push(Statement {
            line: idx + 1,
            text: full,
        });
    }
    out
}

/// Keywords that start a record of their own.
const RECORD_KEYWORDS: [&str; 26] = [
    "VERSION", "NS_", "BS_", "BU_", "BO_", "SG_", "CM_", "BA_DEF_", "BA_DEF_DEF_", "BA_",
    "VAL_", "VAL_TABLE_", "BO_TX_BU_", "EV_", "ENVVAR_DATA_", "SGTYPE_", "SIG_GROUP_",
    "SIG_VALTYPE_", "SIG_TYPE_REF_", "SG_MUL_VAL_", "BA_DEF_REL_", "BA_DEF_DEF_REL_",
    "BA_REL_", "BU_SG_REL_", "BU_EV_REL_", "BU_BO_REL_",
];

fn opens_record(line: &str) -> bool {
    let first: &str = line.split_ascii_whitespace().next().unwrap_or("");
    RECORD_KEYWORDS.contains(&first.trim_end_matches(':'))
}

/// Construction pass: node list, version, messages and the signal block of each message.
///
/// Only the first `BU_` record sets the node list.
///
/// A signal block runs from its `BO_` line to the next `BO_` line (or the end of the
/// document); `SG_` lines outside any block are dropped.
fn build_entities(db: &mut Database, statements: &[Statement]) {
    let mut current: Option<MessageKey> = None;
    let mut nodes_seen: bool = false;

    for st in statements {
        let first: &str = st.text.split_ascii_whitespace().next().unwrap_or("");
        match first {
            "VERSION" => records::version::decode(db, &st.text),
            // only the first node list counts, even an empty one
            "BU_" | "BU_:" if !nodes_seen => {
                nodes_seen = records::bu_::decode(db, &st.text);
            }
            "BU_" | "BU_:" => trace!(line = st.line, "skipping repeated BU_ record"),
            "BO_" => {
                current = records::bo_::decode(db, &st.text);
                if current.is_none() {
                    trace!(line = st.line, "skipping malformed BO_ record");
                }
            }
            "SG_" => match current {
                Some(msg_key) => {
                    if records::sg_::decode(db, msg_key, &st.text).is_none() {
                        trace!(line = st.line, "skipping malformed SG_ record");
                    }
                }
                None => trace!(line = st.line, "SG_ record outside of a message block"),
            },
            _ => {}
        }
    }
}

fn apply_overlay(db: &mut Database, statements: &[Statement], label: &str, overlay: Overlay) {
    let mut applied: usize = 0;
    for st in statements {
        match overlay(db, &st.text) {
            Outcome::Applied => applied += 1,
            Outcome::Ignored => {}
            Outcome::Malformed => trace!(line = st.line, record = label, "skipping malformed record"),
            Outcome::Dangling => {
                trace!(line = st.line, record = label, "dropping record for undeclared entity")
            }
        }
    }
    debug!(record = label, applied, "overlay applied");
}
