//! One decoder per DBC record keyword.
//!
//! Construction decoders (`bu_`, `bo_`, `sg_`, `version`) build entities; overlay
//! decoders (`attributes`, `comments`, `val_`) look an entity up and patch it.

pub(crate) mod attributes;
pub(crate) mod bo_;
pub(crate) mod bu_;
pub(crate) mod comments;
pub(crate) mod sg_;
pub(crate) mod strings;
pub(crate) mod val_;
pub(crate) mod version;

/// What an overlay decoder did with one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Value stored on an entity.
    Applied,
    /// Not a record this decoder handles (other keyword, unknown attribute name).
    Ignored,
    /// Right keyword, but the record could not be read.
    Malformed,
    /// Well-formed, but the message ID or signal name is not declared.
    Dangling,
}
