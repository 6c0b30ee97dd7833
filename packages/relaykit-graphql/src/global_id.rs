//! Opaque global identifiers, as used for connection cursors.
//!
//! An identifier is the standard base64 encoding of `"{tag}:{offset}"`.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::{GraphqlError, GraphqlResult};

/// Tag used for cursors that point into an array-backed connection.
pub const ARRAY_CONNECTION: &str = "arrayconnection";

pub fn encode_global_id(tag: &str, offset: i64) -> String {
    STANDARD.encode(format!("{tag}:{offset}"))
}

/// Recover the `(tag, offset)` pair from an identifier produced by
/// [`encode_global_id`].
pub fn decode_global_id(id: &str) -> GraphqlResult<(String, i64)> {
    let invalid = || GraphqlError::InvalidCursor(id.to_string());

    let bytes = STANDARD.decode(id).map_err(|_| invalid())?;
    let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
    let (tag, offset) = raw.rsplit_once(':').ok_or_else(invalid)?;
    let offset = offset.parse::<i64>().map_err(|_| invalid())?;

    Ok((tag.to_string(), offset))
}

pub fn encode_cursor(offset: i64) -> String {
    encode_global_id(ARRAY_CONNECTION, offset)
}

/// Decode a connection cursor, rejecting identifiers carrying any other tag.
pub fn decode_cursor(cursor: &str) -> GraphqlResult<i64> {
    match decode_global_id(cursor)? {
        (tag, offset) if tag == ARRAY_CONNECTION => Ok(offset),
        _ => Err(GraphqlError::InvalidCursor(cursor.to_string())),
    }
}
