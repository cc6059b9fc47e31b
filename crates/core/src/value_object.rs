//! Value object trait: equality by value, not identity.
//!
//! Every catalog field (id, name, price, ...) is wrapped in a value object whose
//! constructor is the only way to obtain an instance. Construction performs the
//! full validation, so holding a value object is proof that its invariants hold.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Two `Price`s with
/// the same amount and currency are the same price; there is no identity.
///
/// Implementors keep their fields private and expose a single validating
/// constructor returning [`crate::DomainResult`]. Nothing exposes a setter: to
/// "change" a value object, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// pub struct Name(String);
///
/// impl ValueObject for Name {}
///
/// assert_eq!(Name::new("Desk Lamp")?, Name::new("Desk Lamp")?);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug + Send + Sync {}
