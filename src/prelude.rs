//! # dotresx Prelude
//!
//! The types needed for a typical export: describe the module, build resource entries,
//! and write them with a [`ResxWriter`].

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotresx operations
pub use crate::Error;

/// The result type used throughout dotresx
pub use crate::Result;

// ================================================================================================
// Assembly Identity
// ================================================================================================

/// Assembly identity and comparison
pub use crate::metadata::identity::{
    AssemblyIdentity, AssemblyNameComparer, AssemblyNameComparerFlags, AssemblyVersion,
};

// ================================================================================================
// Type System
// ================================================================================================

/// Module and host views of the type system
pub use crate::metadata::typesystem::{
    CorLibType, HostEnvironment, HostType, HostTypes, ModuleContext, ModuleInfo,
};

// ================================================================================================
// Resources
// ================================================================================================

/// Resource entries and payloads
pub use crate::metadata::resources::{
    BinaryResourceData, ResourceEntry, ResourcePayload, ResourceType, ResourceTypeCode,
    SerializationFormat,
};

// ================================================================================================
// Resx Output
// ================================================================================================

/// Document writer and export entry points
pub use crate::resx::{
    export_resources, export_to_file, CancellationFlag, ResxWriter, ResxWriterConfig,
};
