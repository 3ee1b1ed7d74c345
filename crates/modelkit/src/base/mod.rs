//! Builtin leaf fields and the validators they rely on.

pub mod field;
pub mod validator;
