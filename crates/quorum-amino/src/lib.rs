//! Legacy amino signing support
//!
//! Hardware wallets and amino-only wallet extensions sign a JSON document
//! rather than protobuf bytes. This crate provides the message definitions,
//! the per-provider converter tables that translate packed protobuf
//! messages into their amino JSON form, the `StdSignDoc` with its canonical
//! sign bytes, and the protobuf body encoding shared by all co-signers.

pub mod body;
pub mod msgs;
pub mod registry;
pub mod signdoc;

pub use body::encode_body;
pub use registry::{AminoError, AminoMsg, AminoRegistry};
pub use signdoc::{StdFee, StdSignDoc};
