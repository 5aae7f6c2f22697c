// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # dotresx
//!
//! Writes the typed entries of .NET resource sets as resx XML documents.
//!
//! Compiled .NET assemblies embed their resources as binary `.resources` sets. Tools that
//! decompile an assembly back into a project need those sets as `.resx` files again,
//! written so that the .NET build and designer tooling read every entry back into exactly
//! the value the assembly carried. `dotresx` produces such documents: the standard resx
//! schema and headers, one `data` element per resource, invariant-culture text for
//! primitive values, wrapped base64 for serialized objects, and assembly-qualified type
//! names that target the framework the exported module was built against.
//!
//! ## Features
//!
//! - **Exact output** - Element layout, attribute order and escaping match the .NET resx writer
//! - **Framework-aware type names** - Host type names are retargeted to the module's own
//!   assembly references
//! - **Every built-in resource type** - Primitives, `decimal`, `DateTime`, `TimeSpan`, byte
//!   arrays and streams
//! - **Serialized objects** - `BinaryFormatter`, `TypeConverter` and activator payloads
//! - **Cooperative cancellation** - Long exports can be stopped between entries
//!
//! ## Quick Start
//!
//! ```rust
//! use dotresx::prelude::*;
//!
//! let module = ModuleInfo::net_framework("MyApp");
//! let mut writer = ResxWriter::with_config(
//!     Vec::new(),
//!     &module,
//!     HostEnvironment::net_framework(),
//!     ResxWriterConfig::without_bom(),
//! )?;
//!
//! writer.add_resource(&ResourceEntry::built_in("Title", ResourceType::String("My App".into())))?;
//! writer.add_resource(&ResourceEntry::built_in("Retries", ResourceType::Int32(3)))?;
//!
//! let document = String::from_utf8(writer.close()?).unwrap();
//! assert!(document.contains("<data name=\"Retries\" type=\"System.Int32, mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089\">"));
//! # Ok::<(), dotresx::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata::identity`] - Assembly identities and identity comparison
//! - [`metadata::typesystem`] - The exported module's and the host's view of types
//! - [`metadata::resources`] - Resource entries and their typed payloads
//! - [`resx`] - Value formatting, type naming and the document writer
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Every error aborts the export that
//! raised it; see [`Error`] for the categories.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types.
///
/// ```rust
/// use dotresx::prelude::*;
///
/// let module = ModuleInfo::net_framework("MyApp");
/// let writer = ResxWriter::new(Vec::new(), &module)?;
/// assert_eq!(writer.entry_count(), 0);
/// # Ok::<(), dotresx::Error>(())
/// ```
pub mod prelude;

/// .NET metadata needed to describe and name resource values.
///
/// Covers only what resx export requires: assembly identities, type references for
/// naming types, and the typed resource entries read from a `.resources` set.
pub mod metadata;

/// Resx document generation.
pub mod resx;

/// `dotresx` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use dotresx::{metadata::identity::AssemblyIdentity, Result};
///
/// fn parse_reference(name: &str) -> Result<AssemblyIdentity> {
///     AssemblyIdentity::parse(name)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `dotresx` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;
