//! Protobuf definitions and serialization for the pre types.

/// Protobuf for the proxy re-encryption schemes.
pub mod pre;
