//! Enum label tables. Entities store the raw index; labels are looked up only
//! when a row is rendered.

/// Fixed index → label table with an out-of-range fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumLabels {
    labels: &'static [&'static str],
    fallback: &'static str,
}

impl EnumLabels {
    pub const fn new(labels: &'static [&'static str], fallback: &'static str) -> Self {
        EnumLabels { labels, fallback }
    }

    /// Label at `raw`, or the fallback when `raw` is negative or past the table.
    pub fn label(&self, raw: i64) -> &'static str {
        usize::try_from(raw)
            .ok()
            .and_then(|idx| self.labels.get(idx))
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// `GenMsgSendType`
pub const MSG_SEND_TYPE: EnumLabels = EnumLabels::new(
    &[
        "Cyclic",
        "NoMsgSendType",
        "NotUsed",
        "NotUsed",
        "NotUsed",
        "NotUsed",
        "NotUsed",
        "IfActive",
        "NoMsgSendType",
        "NotUsed",
    ],
    "Cyclic",
);

/// `GenSigSendType`
pub const SIG_SEND_TYPE: EnumLabels = EnumLabels::new(
    &[
        "Cyclic",
        "NoSigSendType",
        "OnWriteWithRepetition",
        "OnChange",
        "OnChangeWithRepetition",
        "IfActive",
        "IfActiveWithRepetition",
        "NoSigSendType",
    ],
    "Cyclic",
);

/// `VFrameFormat`
pub const VFRAME_FORMAT: EnumLabels = EnumLabels::new(
    &[
        "StandardCAN",
        "ExtendedCAN",
        "reserved",
        "J1939PG",
        "reserved",
        "reserved",
        "reserved",
        "reserved",
        "reserved",
        "reserved",
        "reserved",
        "reserved",
        "reserved",
        "reserved",
        "StandardCAN_FD",
        "ExtendedCAN_FD",
    ],
    "StandardCAN_FD",
);

/// `CANFD_BRS`
pub const CANFD_BRS: EnumLabels = EnumLabels::new(&["0", "1"], "1");

/// `GenMsgILSupport`
pub const IL_SUPPORT: EnumLabels = EnumLabels::new(&["No", "Yes"], "Yes");

/// `NmMessage`
pub const NM_MESSAGE: EnumLabels = EnumLabels::new(&["No", "Yes"], "No");

/// `DiagRequest`, `DiagResponse`, `DiagState`
pub const DIAG_FLAG: EnumLabels = EnumLabels::new(&["No", "Yes"], "No");
