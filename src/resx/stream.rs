//! Serialized `System.IO.MemoryStream` object graphs.
//!
//! Stream resources carry only the stream's content. The resx format has no native stream
//! representation, so the content is written as a `BinaryFormatter` object graph of a
//! `MemoryStream` wrapping it, which the reader deserializes back into a stream.
//!
//! The graph is always the same apart from three length fields and the trailing byte
//! array, so it is produced by patching a fixed template rather than by a serializer.
//!
//! # Layout
//!
//! ```text
//! 0x000  SerializedStreamHeader, BinaryLibrary "mscorlib" (implicit), ClassWithMembersAndTypes
//!        "System.IO.MemoryStream" with the fields _buffer, _origin, _position, _length,
//!        _capacity, _expandable, _writable, _exposable, _isOpen and
//!        MarshalByRefObject+__identity
//! 0x0C4  _length    (i32)
//! 0x0C8  _capacity  (i32)
//! 0x0CC  _expandable .. __identity, then ArraySinglePrimitive (Byte) header
//! 0x0D6  array length (i32)
//! 0x0DB  array content
//! ...    MessageEnd (0x0B)
//! ```

use crate::Result;

/// Template of the serialized graph, with all lengths set to 5.
const MEMORY_STREAM_TEMPLATE: [u8; 219] = [
    0x00, 0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x04, 0x01, 0x00, 0x00, 0x00, 0x16, 0x53, 0x79, 0x73, 0x74, 0x65, 0x6D, 0x2E,
    0x49, 0x4F, 0x2E, 0x4D, 0x65, 0x6D, 0x6F, 0x72, 0x79, 0x53, 0x74, 0x72, 0x65, 0x61, 0x6D,
    0x0A, 0x00, 0x00, 0x00, 0x07, 0x5F, 0x62, 0x75, 0x66, 0x66, 0x65, 0x72, 0x07, 0x5F, 0x6F,
    0x72, 0x69, 0x67, 0x69, 0x6E, 0x09, 0x5F, 0x70, 0x6F, 0x73, 0x69, 0x74, 0x69, 0x6F, 0x6E,
    0x07, 0x5F, 0x6C, 0x65, 0x6E, 0x67, 0x74, 0x68, 0x09, 0x5F, 0x63, 0x61, 0x70, 0x61, 0x63,
    0x69, 0x74, 0x79, 0x0B, 0x5F, 0x65, 0x78, 0x70, 0x61, 0x6E, 0x64, 0x61, 0x62, 0x6C, 0x65,
    0x09, 0x5F, 0x77, 0x72, 0x69, 0x74, 0x61, 0x62, 0x6C, 0x65, 0x0A, 0x5F, 0x65, 0x78, 0x70,
    0x6F, 0x73, 0x61, 0x62, 0x6C, 0x65, 0x07, 0x5F, 0x69, 0x73, 0x4F, 0x70, 0x65, 0x6E, 0x1D,
    0x4D, 0x61, 0x72, 0x73, 0x68, 0x61, 0x6C, 0x42, 0x79, 0x52, 0x65, 0x66, 0x4F, 0x62, 0x6A,
    0x65, 0x63, 0x74, 0x2B, 0x5F, 0x5F, 0x69, 0x64, 0x65, 0x6E, 0x74, 0x69, 0x74, 0x79, 0x07,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x08, 0x08, 0x08, 0x08, 0x01,
    0x01, 0x01, 0x01, 0x09, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x05, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x0A, 0x0F,
    0x02, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x02,
];

/// Offset of the `_length` field.
pub const LENGTH_OFFSET: usize = 196;
/// Offset of the `_capacity` field.
pub const CAPACITY_OFFSET: usize = 200;
/// Offset of the length of the `_buffer` byte array.
pub const BUFFER_LENGTH_OFFSET: usize = 214;
/// Offset of the first byte of the `_buffer` content.
pub const BUFFER_OFFSET: usize = MEMORY_STREAM_TEMPLATE.len();
/// The `MessageEnd` record closing the graph.
pub const MESSAGE_END: u8 = 0x0B;

/// Serialize `content` as a `BinaryFormatter` graph of a `MemoryStream`.
///
/// The result is `219 + content.len() + 1` bytes long.
///
/// # Errors
///
/// Returns [`crate::Error::UnsupportedPayload`] if `content` is longer than a .NET array
/// can be (`i32::MAX` bytes).
///
/// # Examples
///
/// ```rust
/// use dotresx::resx::{serialize_memory_stream, BUFFER_OFFSET, LENGTH_OFFSET};
///
/// let graph = serialize_memory_stream(b"abc")?;
///
/// assert_eq!(graph.len(), BUFFER_OFFSET + 3 + 1);
/// assert_eq!(&graph[LENGTH_OFFSET..LENGTH_OFFSET + 4], &3i32.to_le_bytes());
/// assert_eq!(&graph[BUFFER_OFFSET..BUFFER_OFFSET + 3], b"abc");
/// # Ok::<(), dotresx::Error>(())
/// ```
pub fn serialize_memory_stream(content: &[u8]) -> Result<Vec<u8>> {
    let length = i32::try_from(content.len()).map_err(|_| {
        unsupported_payload!(
            "stream of {} bytes exceeds the maximum array length",
            content.len()
        )
    })?;
    let length = length.to_le_bytes();

    let mut graph = Vec::with_capacity(BUFFER_OFFSET + content.len() + 1);
    graph.extend_from_slice(&MEMORY_STREAM_TEMPLATE);
    for offset in [LENGTH_OFFSET, CAPACITY_OFFSET, BUFFER_LENGTH_OFFSET] {
        graph[offset..offset + 4].copy_from_slice(&length);
    }
    graph.extend_from_slice(content);
    graph.push(MESSAGE_END);

    Ok(graph)
}
