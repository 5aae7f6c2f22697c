//! Writing .NET resource sets as resx documents.
//!
//! Resx is the XML resource format of .NET projects. Decompiled or exported projects need
//! their embedded resource sets turned back into resx files that the .NET tooling reads
//! exactly like the originals. This module produces those documents.
//!
//! # Architecture
//!
//! - **Type names** ([`TypeNameResolver`]) - Assembly-qualified names for every typed value,
//!   retargeted to the assemblies the exported module references
//! - **Value formatting** ([`format_payload`]) - Invariant-culture text or wrapped base64
//!   for each payload, see [`ResourceInfo`]
//! - **Stream emulation** ([`serialize_memory_stream`]) - `MemoryStream` object graphs for
//!   stream resources
//! - **Document writing** ([`ResxWriter`]) - The XML document itself
//! - **Export** ([`export_resources`], [`export_to_file`]) - Whole resource sets with
//!   cooperative cancellation
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotresx::{
//!     metadata::{
//!         resources::{ResourceEntry, ResourceType},
//!         typesystem::ModuleInfo,
//!     },
//!     resx::{export_to_file, CancellationFlag},
//! };
//!
//! let module = ModuleInfo::net_framework("MyApp");
//! let entries = vec![
//!     ResourceEntry::built_in("Title", ResourceType::String("My App".into())),
//!     ResourceEntry::built_in("MaxItems", ResourceType::Int32(25)),
//! ];
//!
//! let written = export_to_file("Strings.resx", &module, &entries, &CancellationFlag::new())?;
//! assert_eq!(written, 2);
//! # Ok::<(), dotresx::Error>(())
//! ```

mod base64;
mod config;
mod escape;
mod export;
mod format;
mod schema;
mod stream;
mod typename;
mod writer;

pub use base64::to_wrapped_base64;
pub use config::{ResxWriterConfig, CRLF, LF};
pub use export::{export_resources, export_to_file, CancellationFlag};
pub use format::{format_payload, ResourceInfo};
pub use stream::{
    serialize_memory_stream, BUFFER_LENGTH_OFFSET, BUFFER_OFFSET, CAPACITY_OFFSET,
    LENGTH_OFFSET, MESSAGE_END,
};
pub use typename::{TypeNameResolver, TypeRecipe};
pub use writer::ResxWriter;

/// Value of the `resmimetype` header.
pub const RES_MIME_TYPE: &str = "text/microsoft-resx";
/// Value of the `version` header.
pub const VERSION: &str = "2.0";
/// Mimetype of values serialized with `BinaryFormatter`.
pub const BIN_SERIALIZED_OBJECT_MIME_TYPE: &str =
    "application/x-microsoft.net.object.binary.base64";
/// Mimetype of values serialized to a byte array by a `TypeConverter`.
pub const BYTE_ARRAY_SERIALIZED_OBJECT_MIME_TYPE: &str =
    "application/x-microsoft.net.object.bytearray.base64";
