//! Protobuf envelopes for the raw wire encodings.

mod generated;

pub use generated::*;
