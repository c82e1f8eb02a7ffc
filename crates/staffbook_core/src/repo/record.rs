//! Shared record handle.
//!
//! A `Record<E>` is the in-memory object callers hold. Clones share the same
//! id slot and field cell, so a handle returned by one query observes every
//! later change made through another handle or by re-materialization.
//!
//! # Invariants
//! - Equality is identity: two handles are equal iff they share one record.
//! - Field cells are `RefCell`s. A read that re-materializes a record whose
//!   `fields()` guard is still alive keeps the current values when they match
//!   the stored row and otherwise fails with `RepoError::RecordBorrowed`.

use super::entity::Entity;
use super::session::Session;
use super::RepoResult;
use crate::model::RecordId;
use serde::{Serialize, Serializer};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

pub struct Record<E>(Rc<RecordCell<E>>);

struct RecordCell<E> {
    id: Cell<Option<RecordId>>,
    fields: RefCell<E>,
}

impl<E> Record<E> {
    /// Wraps validated fields into a transient record.
    pub fn new(fields: E) -> Self {
        Self::with_id(None, fields)
    }

    pub(crate) fn persisted(id: RecordId, fields: E) -> Self {
        Self::with_id(Some(id), fields)
    }

    fn with_id(id: Option<RecordId>, fields: E) -> Self {
        Self(Rc::new(RecordCell {
            id: Cell::new(id),
            fields: RefCell::new(fields),
        }))
    }

    /// Primary key, absent while transient or after delete.
    pub fn id(&self) -> Option<RecordId> {
        self.0.id.get()
    }

    pub fn is_persisted(&self) -> bool {
        self.id().is_some()
    }

    pub fn fields(&self) -> Ref<'_, E> {
        self.0.fields.borrow()
    }

    /// Mutable access for the validated `set_*` methods of the field type.
    pub fn fields_mut(&self) -> RefMut<'_, E> {
        self.0.fields.borrow_mut()
    }

    pub(crate) fn assign_id(&self, id: Option<RecordId>) {
        self.0.id.set(id);
    }

    /// Overwrites the fields with `fields`.
    ///
    /// Returns `false` when the cell is borrowed elsewhere and its current
    /// values differ from `fields`; the record is left untouched then.
    pub(crate) fn replace_fields(&self, fields: E) -> bool
    where
        E: PartialEq,
    {
        if let Ok(mut current) = self.0.fields.try_borrow_mut() {
            *current = fields;
            return true;
        }
        matches!(self.0.fields.try_borrow(), Ok(current) if *current == fields)
    }
}

impl<E: Entity> Record<E> {
    /// Inserts this transient record and registers it in the session.
    pub fn save(&self, session: &mut Session<'_>) -> RepoResult<RecordId> {
        session.save(self)
    }

    pub fn update(&self, session: &mut Session<'_>) -> RepoResult<()> {
        session.update(self)
    }

    pub fn delete(&self, session: &mut Session<'_>) -> RepoResult<()> {
        session.delete(self)
    }

    /// Reloads fields from the store; `Ok(false)` when there was nothing to
    /// reload.
    pub fn refresh(&self, session: &mut Session<'_>) -> RepoResult<bool> {
        session.refresh(self)
    }
}

impl<E> Clone for Record<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E> PartialEq for Record<E> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<E> Eq for Record<E> {}

impl<E: Debug> Debug for Record<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("Record");
        out.field("id", &self.id());
        match self.0.fields.try_borrow() {
            Ok(fields) => out.field("fields", &*fields),
            Err(_) => out.field("fields", &"<borrowed>"),
        };
        out.finish()
    }
}

impl<E: Entity + Display> Display for Record<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} ", E::KIND)?;
        match self.id() {
            Some(id) => write!(f, "{id}")?,
            None => f.write_str("None")?,
        }
        write!(f, ": {}>", self.fields())
    }
}

#[derive(Serialize)]
struct Snapshot<'a, E> {
    id: Option<RecordId>,
    #[serde(flatten)]
    fields: &'a E,
}

impl<E: Serialize> Serialize for Record<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Snapshot {
            id: self.id(),
            fields: &*self.fields(),
        }
        .serialize(serializer)
    }
}
