use std::fmt::{Debug, Display};
use std::marker::PhantomData;

use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

pub trait TypedIdMarker {
    fn tag() -> &'static str;
}

/// A store-assigned integer identifier that is tagged with the entity it
/// refers to, so ids of different entities can't be mixed up.
pub struct TypedId<T: TypedIdMarker>(i64, PhantomData<T>);

impl<T: TypedIdMarker> TypedId<T> {
    pub fn from_raw(raw: i64) -> TypedId<T> {
        TypedId(raw, PhantomData)
    }

    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl<T: TypedIdMarker> Copy for TypedId<T> {}

impl<T: TypedIdMarker> Clone for TypedId<T> {
    fn clone(&self) -> TypedId<T> {
        *self
    }
}

impl<T: TypedIdMarker> PartialEq for TypedId<T> {
    fn eq(&self, other: &TypedId<T>) -> bool {
        self.0 == other.0
    }
}

impl<T: TypedIdMarker> Eq for TypedId<T> {}

impl<T: TypedIdMarker> Display for TypedId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}-{}", T::tag(), self.0)
    }
}

impl<T: TypedIdMarker> Debug for TypedId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Display::fmt(self, f)
    }
}

// the wire and storage formats only carry the bare number
impl<T: TypedIdMarker> Serialize for TypedId<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, T: TypedIdMarker> Deserialize<'de> for TypedId<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Ok(TypedId(raw, PhantomData))
    }
}

impl<T: TypedIdMarker> From<TypedId<T>> for Bson {
    fn from(id: TypedId<T>) -> Bson {
        Bson::Int64(id.0)
    }
}
