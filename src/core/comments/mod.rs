//! `CM_` comments scoped to a message or to a signal.
//!
//! Network (`CM_ "..."`), node (`CM_ BU_`) and environment-variable comments have
//! no target in the model and are ignored.

pub(crate) mod cm_bo_;
pub(crate) mod cm_sg_;
