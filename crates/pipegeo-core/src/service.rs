// crates/pipegeo-core/src/service.rs

//! # Entity Service
//!
//! The CRUD surface the backend exposes for each flat entity list, plus a
//! vector-backed implementation for tests and offline tooling.

use crate::common::{EntityId, EntityKind};
use crate::error::{GeoError, Result};
use crate::label::Language;
use crate::model::{Country, District, Locality, Location, State, Zone};
use crate::text::contains_folded;
use crate::traits::{Designated, Validate};
use log::debug;

/// A persistable backend record.
pub trait Record: Designated + Validate + Clone {
    const KIND: EntityKind;

    fn set_id(&mut self, id: EntityId);
}

macro_rules! impl_record {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Record for $ty {
                const KIND: EntityKind = EntityKind::$kind;

                fn set_id(&mut self, id: EntityId) {
                    self.id = id;
                }
            }
        )*
    };
}

impl_record!(
    Country => Country,
    State => State,
    District => District,
    Locality => Locality,
    Location => Location,
    Zone => Zone,
);

/// CRUD operations for one entity type.
pub trait EntityService<T: Record> {
    fn list(&self) -> Result<Vec<T>>;

    fn get_by_id(&self, id: EntityId) -> Result<T>;

    /// Stores a new record and returns it with its assigned id.
    fn create(&mut self, item: T) -> Result<T>;

    fn update(&mut self, id: EntityId, item: T) -> Result<T>;

    fn delete(&mut self, id: EntityId) -> Result<()>;

    /// Records whose code or any designation contains `term`.
    fn search(&self, term: &str) -> Result<Vec<T>>;
}

/// Vector-backed [`EntityService`]. Ids are assigned sequentially.
#[derive(Debug, Clone)]
pub struct InMemoryService<T> {
    items: Vec<T>,
    next_id: EntityId,
}

impl<T: Record> Default for InMemoryService<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Record> InMemoryService<T> {
    /// Seeds the store; new ids continue after the largest seeded one.
    pub fn new(items: Vec<T>) -> Self {
        let next_id = items
            .iter()
            .filter_map(Designated::id)
            .max()
            .map_or(1, |m| m + 1);
        InMemoryService { items, next_id }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: EntityId) -> Result<usize> {
        self.items
            .iter()
            .position(|i| i.id() == Some(id))
            .ok_or(GeoError::NotFound { kind: T::KIND, id })
    }

    fn check(item: &T) -> Result<()> {
        let errors = item.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(GeoError::InvalidEntity(errors))
        }
    }
}

impl<T: Record> EntityService<T> for InMemoryService<T> {
    fn list(&self) -> Result<Vec<T>> {
        Ok(self.items.clone())
    }

    fn get_by_id(&self, id: EntityId) -> Result<T> {
        let pos = self.position(id)?;
        Ok(self.items[pos].clone())
    }

    fn create(&mut self, mut item: T) -> Result<T> {
        item.set_id(self.next_id);
        Self::check(&item)?;
        self.next_id += 1;
        debug!("created {} {}", T::KIND, self.next_id - 1);
        self.items.push(item.clone());
        Ok(item)
    }

    fn update(&mut self, id: EntityId, mut item: T) -> Result<T> {
        let pos = self.position(id)?;
        item.set_id(id);
        Self::check(&item)?;
        self.items[pos] = item.clone();
        debug!("updated {} {id}", T::KIND);
        Ok(item)
    }

    fn delete(&mut self, id: EntityId) -> Result<()> {
        let pos = self.position(id)?;
        self.items.remove(pos);
        debug!("deleted {} {id}", T::KIND);
        Ok(())
    }

    fn search(&self, term: &str) -> Result<Vec<T>> {
        let term = term.trim();
        if term.is_empty() {
            return self.list();
        }
        let hits = self
            .items
            .iter()
            .filter(|item| {
                item.code().is_some_and(|c| contains_folded(c, term))
                    || [Language::Ar, Language::En, Language::Fr]
                        .into_iter()
                        .filter_map(|l| item.designation(l))
                        .any(|d| contains_folded(d, term))
            })
            .cloned()
            .collect();
        Ok(hits)
    }
}
