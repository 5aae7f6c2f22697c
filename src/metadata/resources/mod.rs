//! Typed resource entries of .NET resource sets.
//!
//! This module holds the in-memory form of the entries of an embedded resource set, as
//! produced by a metadata reader and consumed by the [`crate::resx`] writer.
//!
//! # Key Types
//! - [`ResourceEntry`] - A named resource
//! - [`ResourcePayload`] - Built-in value or serialized user type
//! - [`ResourceType`] / [`ResourceTypeCode`] - Built-in values and their type codes
//! - [`BinaryResourceData`] / [`SerializationFormat`] - Serialized user types
mod types;

pub use types::*;
