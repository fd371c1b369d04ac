// Shared helpers for block decoding and serialization

pub mod encoding;
pub mod io;
pub mod serialize;
