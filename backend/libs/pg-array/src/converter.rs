//! Element converter adapter
//!
//! Lifts a pair of element-level conversion functions into a pair of
//! collection-level conversions. Everything in this module is pure: no I/O,
//! no logging, inputs are only borrowed.

use crate::repeated::RepeatedField;
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

/// Bidirectional conversion of a single element between its domain and
/// storage representations.
///
/// Implementations must satisfy `from_storage(to_storage(x)?)? == x`.
pub trait ValueConversion {
    type Domain;
    type Storage;
    type Error;

    fn to_storage(&self, value: &Self::Domain) -> Result<Self::Storage, Self::Error>;

    fn from_storage(&self, value: Self::Storage) -> Result<Self::Domain, Self::Error>;
}

/// Conversion pair built from two functions. Both directions are required
/// at construction, so a half-defined converter cannot exist.
pub struct ElementConverter<D, S, E, F, G> {
    to_storage: F,
    from_storage: G,
    _marker: PhantomData<fn(D, S) -> E>,
}

impl<D, S, E, F, G> ElementConverter<D, S, E, F, G>
where
    F: Fn(&D) -> Result<S, E>,
    G: Fn(S) -> Result<D, E>,
{
    pub fn new(to_storage: F, from_storage: G) -> Self {
        Self {
            to_storage,
            from_storage,
            _marker: PhantomData,
        }
    }
}

impl<D, S, E, F, G> ValueConversion for ElementConverter<D, S, E, F, G>
where
    F: Fn(&D) -> Result<S, E>,
    G: Fn(S) -> Result<D, E>,
{
    type Domain = D;
    type Storage = S;
    type Error = E;

    fn to_storage(&self, value: &D) -> Result<S, E> {
        (self.to_storage)(value)
    }

    fn from_storage(&self, value: S) -> Result<D, E> {
        (self.from_storage)(value)
    }
}

impl<D, S, E, F: Clone, G: Clone> Clone for ElementConverter<D, S, E, F, G> {
    fn clone(&self) -> Self {
        Self {
            to_storage: self.to_storage.clone(),
            from_storage: self.from_storage.clone(),
            _marker: PhantomData,
        }
    }
}

impl<D, S, E, F, G> fmt::Debug for ElementConverter<D, S, E, F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementConverter")
            .field("domain", &std::any::type_name::<D>())
            .field("storage", &std::any::type_name::<S>())
            .finish()
    }
}

/// Element converter whose functions are plain fn pointers.
pub type FnElementConverter<D, S, E> =
    ElementConverter<D, S, E, fn(&D) -> Result<S, E>, fn(S) -> Result<D, E>>;

/// `T ⇄ T` converter (e.g. `String` stored in `text[]`).
pub type IdentityConverter<T> = FnElementConverter<T, T, Infallible>;

fn clone_element<T: Clone>(value: &T) -> Result<T, Infallible> {
    Ok(value.clone())
}

fn pass_element<T>(value: T) -> Result<T, Infallible> {
    Ok(value)
}

/// Collection-level converter: applies an element conversion to every
/// element, in order, and fails the whole batch on the first element error.
#[derive(Debug, Clone)]
pub struct ArrayConverter<C> {
    element: C,
}

impl<C: ValueConversion> ArrayConverter<C> {
    pub fn new(element: C) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &C {
        &self.element
    }

    /// Domain collection → storage array of identical length and order.
    ///
    /// An empty collection yields an empty array, never an absent value.
    pub fn to_storage(&self, values: &[C::Domain]) -> Result<Vec<C::Storage>, C::Error> {
        let mut out = Vec::with_capacity(values.len());
        for value in values {
            out.push(self.element.to_storage(value)?);
        }
        Ok(out)
    }

    /// Storage array → freshly built domain collection of identical length
    /// and order.
    pub fn from_storage(
        &self,
        values: Vec<C::Storage>,
    ) -> Result<RepeatedField<C::Domain>, C::Error> {
        let mut field = RepeatedField::with_capacity(values.len());
        for value in values {
            field.push(self.element.from_storage(value)?);
        }
        Ok(field)
    }
}

impl<T: Clone> ArrayConverter<IdentityConverter<T>> {
    pub fn identity() -> Self {
        Self::new(ElementConverter::new(
            clone_element::<T> as fn(&T) -> Result<T, Infallible>,
            pass_element::<T> as fn(T) -> Result<T, Infallible>,
        ))
    }
}

/// Lift an element conversion pair into a collection conversion pair.
pub fn adapt<D, S, E, F, G>(
    to_storage: F,
    from_storage: G,
) -> ArrayConverter<ElementConverter<D, S, E, F, G>>
where
    F: Fn(&D) -> Result<S, E>,
    G: Fn(S) -> Result<D, E>,
{
    ArrayConverter::new(ElementConverter::new(to_storage, from_storage))
}
