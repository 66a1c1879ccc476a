use crate::core::strings;
use crate::types::{
    database::{Database, MessageKey, SignalKey},
    signal::{Endianness, Signal, Signess},
};

/// Decode a `SG_` line belonging to the message block `msg_key`.
/// Format (typical):
/// SG_ <name> [M|mX]: <bit_start>|<bit_length>@<endian><sign> (<factor>,<offset>) [<min>|<max>] "<unit>" <receivers...>
///
/// Any unreadable field skips the whole line.
pub(crate) fn decode(db: &mut Database, msg_key: MessageKey, line: &str) -> Option<SignalKey> {
    let sig: Signal = read(line)?;
    db.add_signal(msg_key, sig)
}

fn read(line: &str) -> Option<Signal> {
    let line: &str = line.trim();
    let mut split_colon = line.splitn(2, ':');
    let left: &str = split_colon.next()?.trim(); // "SG_ NAME [M|mX]"
    let right: &str = split_colon.next()?.trim();

    // Left part analysis SG_ NAME [M|mX]
    let mut left_it = left.split_ascii_whitespace();
    if left_it.next()? != "SG_" {
        return None;
    }
    let name: &str = left_it.next()?;
    // multiplexing tag ("M", "m0", "m1M") is tolerated but not modelled
    let _mux_tag: Option<&str> = left_it.next();
    if left_it.next().is_some() {
        return None;
    }

    // 1) bit info: "63|1@1+"
    let (bit_pos_len, after_at) = right.split_once('@')?;
    let (start_str, len_str) = bit_pos_len.trim().split_once('|')?;
    let bit_start: u16 = start_str.trim().parse().ok()?;
    let bit_length: u16 = len_str.trim().parse().ok()?;
    let mut flags = after_at.chars();
    let endian: Endianness = Endianness::from_dbc_digit(flags.next()?)?;
    let sign: Signess = Signess::from_dbc_char(flags.next()?)?;
    let rest: &str = flags.as_str().trim_start();

    // 2) "(factor,offset)"
    let inner_end: usize = rest.find(')')?;
    let scaling: &str = rest.strip_prefix('(')?.get(..inner_end - 1)?;
    let (factor_str, offset_str) = scaling.split_once(',')?;
    let factor: f64 = factor_str.trim().parse().ok()?;
    let offset: f64 = offset_str.trim().parse().ok()?;
    let rest: &str = rest[inner_end + 1..].trim_start();

    // 3) "[min|max]"
    let bounds_end: usize = rest.find(']')?;
    let bounds: &str = rest.strip_prefix('[')?.get(..bounds_end - 1)?;
    let (min_str, max_str) = bounds.split_once('|')?;
    let min: f64 = min_str.trim().parse().ok()?;
    let max: f64 = max_str.trim().parse().ok()?;
    let rest: &str = &rest[bounds_end + 1..];

    // 4) "unit"
    let (unit, rest) = strings::take_quoted(rest)?;

    // 5) receivers (comma or space separated)
    let receiver_nodes: Vec<String> = rest
        .trim()
        .trim_end_matches(';')
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();

    Some(Signal {
        name: name.to_string(),
        bit_start,
        bit_length,
        endian,
        sign,
        factor,
        offset,
        min,
        max,
        unit_of_measurement: unit.to_string(),
        receiver_nodes,
        ..Default::default()
    })
}
