//! The generic ordered collection.
//!
//! Order is the position in the backing vector and nothing else: there is no
//! stored rank to keep in sync. Items are addressed exclusively through their
//! identifier because positions shift under every mutation.

use crate::error::{CollectionError, CollectionResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An item that can live in an [`OrderedCollection`].
///
/// The identifier is opaque to the collection: it is only compared for
/// equality. It must be assigned before the item is added and must not
/// change while the item is in a collection.
pub trait Embedded {
    /// Identifier type. `Display` is used only to report duplicates.
    type Id: PartialEq + fmt::Display;

    /// Returns the item's identifier.
    fn id(&self) -> &Self::Id;
}

/// An ordered list of embedded items with unique identifiers.
///
/// Identifier arguments accept either `&id` or an `Option<&id>`; `None`
/// stands for the "no identifier" case and simply never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedCollection<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Embedded> OrderedCollection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from items already in display order.
    ///
    /// Fails if two items share an identifier.
    pub fn with_items(items: Vec<T>) -> CollectionResult<Self> {
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|earlier| earlier.id() == item.id()) {
                return Err(duplicate(item.id()));
            }
        }
        Ok(Self { items })
    }

    /// Appends an item at the end.
    ///
    /// Fails with [`CollectionError::DuplicateIdentifier`] if an item with
    /// the same identifier is present; the collection is left untouched.
    pub fn add(&mut self, item: T) -> CollectionResult<()> {
        if self.contains_id(item.id()) {
            return Err(duplicate(item.id()));
        }
        self.items.push(item);
        Ok(())
    }

    /// Returns the item with the given identifier, if any.
    #[must_use]
    pub fn find_by_id<'a>(&self, id: impl Into<Option<&'a T::Id>>) -> Option<&T>
    where
        T::Id: 'a,
    {
        self.index_of(id).map(|i| &self.items[i])
    }

    /// Mutable access to the item with the given identifier.
    ///
    /// The identifier of the returned item must not be changed.
    pub fn find_by_id_mut<'a>(&mut self, id: impl Into<Option<&'a T::Id>>) -> Option<&mut T>
    where
        T::Id: 'a,
    {
        let index = self.index_of(id)?;
        Some(&mut self.items[index])
    }

    /// Returns true if an item with this identifier is present.
    #[must_use]
    pub fn contains_id<'a>(&self, id: impl Into<Option<&'a T::Id>>) -> bool
    where
        T::Id: 'a,
    {
        self.index_of(id).is_some()
    }

    /// Current zero-based position of an item. Only meaningful until the
    /// next mutation.
    #[must_use]
    pub fn position_of<'a>(&self, id: impl Into<Option<&'a T::Id>>) -> Option<usize>
    where
        T::Id: 'a,
    {
        self.index_of(id)
    }

    /// Removes the item with the given identifier and returns it.
    ///
    /// Unknown identifiers are a no-op, so removal is safe to repeat.
    pub fn remove_by_id<'a>(&mut self, id: impl Into<Option<&'a T::Id>>) -> Option<T>
    where
        T::Id: 'a,
    {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    /// Swaps the item with its predecessor.
    ///
    /// Returns `false` without changing anything when the item is already
    /// first or the identifier is unknown.
    pub fn move_up<'a>(&mut self, id: impl Into<Option<&'a T::Id>>) -> bool
    where
        T::Id: 'a,
    {
        match self.index_of(id) {
            Some(index) if index > 0 => {
                self.items.swap(index - 1, index);
                true
            }
            _ => false,
        }
    }

    /// Swaps the item with its successor.
    ///
    /// Returns `false` without changing anything when the item is already
    /// last or the identifier is unknown.
    pub fn move_down<'a>(&mut self, id: impl Into<Option<&'a T::Id>>) -> bool
    where
        T::Id: 'a,
    {
        match self.index_of(id) {
            Some(index) if index + 1 < self.items.len() => {
                self.items.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Identifiers in display order.
    pub fn ids(&self) -> impl Iterator<Item = &T::Id> {
        self.items.iter().map(T::id)
    }

    fn index_of<'a>(&self, id: impl Into<Option<&'a T::Id>>) -> Option<usize>
    where
        T::Id: 'a,
    {
        let id = id.into()?;
        self.items.iter().position(|item| item.id() == id)
    }
}

impl<T> OrderedCollection<T> {
    /// Read-only view of the items in display order.
    #[must_use]
    pub fn list(&self) -> &[T] {
        &self.items
    }

    /// Iterates the items in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the collection, returning the items in display order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Embedded> TryFrom<Vec<T>> for OrderedCollection<T> {
    type Error = CollectionError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        Self::with_items(items)
    }
}

impl<'c, T> IntoIterator for &'c OrderedCollection<T> {
    type Item = &'c T;
    type IntoIter = std::slice::Iter<'c, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for OrderedCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// Stored as a bare array; uniqueness is re-checked when reading it back.
impl<T: Serialize> Serialize for OrderedCollection<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.items.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for OrderedCollection<T>
where
    T: Deserialize<'de> + Embedded,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::with_items(items).map_err(serde::de::Error::custom)
    }
}

fn duplicate<I: fmt::Display>(id: &I) -> CollectionError {
    CollectionError::DuplicateIdentifier { id: id.to_string() }
}
