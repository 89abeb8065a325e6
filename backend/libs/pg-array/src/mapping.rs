//! sqlx binding for array-mapped properties
//!
//! An [`ElementMapping`] registers one element conversion against one
//! PostgreSQL array type. [`PgArray`] is the column type sqlx encodes and
//! decodes; every read and write goes through the element converter adapter.

use crate::converter::{ArrayConverter, ElementConverter, FnElementConverter};
use crate::error::MappingError;
use crate::repeated::RepeatedField;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgHasArrayType, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type};
use std::convert::Infallible;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// Static registration of an element conversion for an array column.
pub trait ElementMapping: Send + Sync + 'static {
    /// Element type held by the in-memory collection
    type Domain: Send + Sync + 'static;

    /// Element type of the PostgreSQL array
    type Storage: for<'q> Encode<'q, Postgres>
        + for<'r> Decode<'r, Postgres>
        + Type<Postgres>
        + PgHasArrayType
        + Send
        + Sync
        + 'static;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Column type declared for properties using this mapping (e.g. `text[]`)
    const COLUMN_TYPE: &'static str;

    fn to_storage(value: &Self::Domain) -> Result<Self::Storage, Self::Error>;

    fn from_storage(value: Self::Storage) -> Result<Self::Domain, Self::Error>;

    fn converter() -> ArrayConverter<FnElementConverter<Self::Domain, Self::Storage, Self::Error>>
    {
        ArrayConverter::new(ElementConverter::new(
            Self::to_storage as fn(&Self::Domain) -> Result<Self::Storage, Self::Error>,
            Self::from_storage as fn(Self::Storage) -> Result<Self::Domain, Self::Error>,
        ))
    }
}

/// `String` elements stored as-is in a `text[]` column.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextElements;

impl ElementMapping for TextElements {
    type Domain = String;
    type Storage = String;
    type Error = Infallible;

    const COLUMN_TYPE: &'static str = "text[]";

    fn to_storage(value: &String) -> Result<String, Infallible> {
        Ok(value.clone())
    }

    fn from_storage(value: String) -> Result<String, Infallible> {
        Ok(value)
    }
}

/// How a NULL array column is surfaced to the domain collection on read.
///
/// Writes never produce NULL: an empty collection is stored as `'{}'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullArrayPolicy {
    /// NULL reads as an empty collection
    #[default]
    Empty,
    /// NULL is a data error
    Reject,
}

impl FromStr for NullArrayPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "invalid null array policy '{}', expected 'empty' or 'reject'",
                other
            )),
        }
    }
}

/// Array column holding a [`RepeatedField`] converted through `M`.
pub struct PgArray<M: ElementMapping>(pub RepeatedField<M::Domain>);

impl<M: ElementMapping> PgArray<M> {
    pub fn new(values: RepeatedField<M::Domain>) -> Self {
        Self(values)
    }

    pub fn into_inner(self) -> RepeatedField<M::Domain> {
        self.0
    }

    /// Resolve a possibly-NULL column value according to `policy`.
    pub fn from_nullable(
        value: Option<Self>,
        policy: NullArrayPolicy,
        column: &str,
    ) -> Result<RepeatedField<M::Domain>, MappingError> {
        match (value, policy) {
            (Some(array), _) => Ok(array.0),
            (None, NullArrayPolicy::Empty) => Ok(RepeatedField::new()),
            (None, NullArrayPolicy::Reject) => Err(MappingError::UnexpectedNull {
                column: column.to_string(),
            }),
        }
    }
}

impl<M: ElementMapping> Default for PgArray<M> {
    fn default() -> Self {
        Self(RepeatedField::new())
    }
}

impl<M: ElementMapping> Clone for PgArray<M>
where
    M::Domain: Clone,
{
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<M: ElementMapping> PartialEq for PgArray<M>
where
    M::Domain: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<M: ElementMapping> fmt::Debug for PgArray<M>
where
    M::Domain: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PgArray").field(&self.0).finish()
    }
}

impl<M: ElementMapping> Deref for PgArray<M> {
    type Target = RepeatedField<M::Domain>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<M: ElementMapping> DerefMut for PgArray<M> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<M: ElementMapping> From<RepeatedField<M::Domain>> for PgArray<M> {
    fn from(values: RepeatedField<M::Domain>) -> Self {
        Self(values)
    }
}

impl<M: ElementMapping> Type<Postgres> for PgArray<M> {
    fn type_info() -> PgTypeInfo {
        <M::Storage as PgHasArrayType>::array_type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <M::Storage as PgHasArrayType>::array_compatible(ty)
    }
}

impl<'q, M: ElementMapping> Encode<'q, Postgres> for PgArray<M> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        let values = M::converter().to_storage(&self.0)?;
        <Vec<M::Storage> as Encode<'q, Postgres>>::encode_by_ref(&values, buf)
    }
}

impl<'r, M: ElementMapping> Decode<'r, Postgres> for PgArray<M> {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let values = <Vec<M::Storage> as Decode<'r, Postgres>>::decode(value)?;
        Ok(Self(M::converter().from_storage(values)?))
    }
}
