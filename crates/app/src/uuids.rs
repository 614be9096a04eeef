//! Phantom-typed identifiers.
//!
//! Every table keys on a UUIDv7, and every domain model gets its own
//! `TypedUuid` alias so an order id cannot be passed where a product id is
//! expected. The phantom is `fn() -> T` so the id stays covariant and never
//! pretends to own a `T`.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use uuid::Uuid;

pub struct TypedUuid<T>(Uuid, PhantomData<fn() -> T>);

impl<T> TypedUuid<T> {
    /// Generate a fresh identifier. v7 keeps inserts roughly append-ordered.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7(), PhantomData)
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, PhantomData)
    }

    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl<T> Default for TypedUuid<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impls throughout: derives would demand the same bounds of `T`, and
// the marker types deliberately implement nothing.

impl<T> Clone for TypedUuid<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedUuid<T> {}

impl<T> Debug for TypedUuid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedUuid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedUuid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedUuid<T> {}

impl<T> Hash for TypedUuid<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedUuid<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedUuid<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<Uuid> for TypedUuid<T> {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

impl<T> From<TypedUuid<T>> for Uuid {
    fn from(value: TypedUuid<T>) -> Self {
        value.into_uuid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    type MarkerUuid = TypedUuid<Marker>;

    #[test]
    fn generated_ids_are_version_7() {
        assert_eq!(MarkerUuid::new().into_uuid().get_version_num(), 7);
    }

    #[test]
    fn wrapping_preserves_the_inner_value() {
        let raw = Uuid::new_v4();
        let typed = MarkerUuid::from_uuid(raw);

        assert_eq!(typed.into_uuid(), raw);
        assert_eq!(typed.to_string(), raw.to_string());
        assert_eq!(typed, MarkerUuid::from(raw));
    }

    #[test]
    fn ordering_follows_the_inner_uuid() {
        let low = MarkerUuid::from_uuid(Uuid::from_u128(1));
        let high = MarkerUuid::from_uuid(Uuid::from_u128(2));

        assert!(low < high);
    }
}
