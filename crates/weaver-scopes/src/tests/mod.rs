//! Crate-level unit and behaviour tests.

pub(crate) mod support;
mod unit;
