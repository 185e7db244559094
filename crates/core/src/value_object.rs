//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. To
/// "modify" one, build a new value: this is how currency conversion produces a
/// converted draft instead of rewriting the caller's.
///
/// Implemented by `CurrencyCode`, line items, drafts and computed totals.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
