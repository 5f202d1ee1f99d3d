//! Function and event param types.

#[cfg(feature = "full-serde")]
mod deserialize;
mod param_type;
mod reader;
mod writer;

pub use self::{param_type::ParamType, reader::Reader, writer::Writer};
