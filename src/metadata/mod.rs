/// Assembly identities and identity comparison.
pub mod identity;
/// Typed resource entries.
pub mod resources;
/// Type references for naming resource value types.
pub mod typesystem;
