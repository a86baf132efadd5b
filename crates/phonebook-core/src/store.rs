//! [`ContactStore`] — the in-memory contact collection and its JSON file.
//!
//! The store owns the contact sequence outright. Callers read through shared
//! borrows and mutate only through the methods here, which keeps the
//! `modified` flag honest.

use std::{
  fs,
  io::Write as _,
  path::{Path, PathBuf},
};

use serde::Serialize as _;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::{
  contact::{Contact, ContactUpdate},
  error::{Error, Field, FileError, Result},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A phonebook held in memory and persisted as a flat JSON array.
#[derive(Debug, Default)]
pub struct ContactStore {
  contacts:     Vec<Contact>,
  current_file: Option<PathBuf>,
  modified:     bool,
}

impl ContactStore {
  /// An empty, unmodified store with no associated file.
  pub fn new() -> Self { Self::default() }

  // ── Accessors ─────────────────────────────────────────────────────────

  /// All contacts in insertion (or file) order.
  pub fn contacts(&self) -> &[Contact] { &self.contacts }

  /// The path most recently opened or saved to.
  pub fn current_file(&self) -> Option<&Path> { self.current_file.as_deref() }

  /// Whether memory has diverged from [`Self::current_file`].
  pub fn is_modified(&self) -> bool { self.modified }

  /// Look up a single contact by id.
  pub fn get(&self, id: u64) -> Option<&Contact> {
    self.contacts.iter().find(|c| c.id == id)
  }

  // ── Persistence ───────────────────────────────────────────────────────

  /// Replace the whole collection with the contents of `path`.
  ///
  /// Fields are taken as stored: no trimming or validation is applied. On
  /// failure the store is left exactly as it was.
  pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let contacts = read_contacts(path).map_err(|e| Error::load(path, e))?;

    self.contacts = contacts;
    self.current_file = Some(path.to_path_buf());
    self.modified = false;
    Ok(())
  }

  /// Write the whole collection to `path`, or to [`Self::current_file`]
  /// when `path` is `None`.
  ///
  /// The data is written to a temporary file next to the destination and
  /// renamed into place, so a failed save never truncates the previous file.
  pub fn save_file(&mut self, path: Option<&Path>) -> Result<()> {
    let path = path
      .or(self.current_file.as_deref())
      .ok_or(Error::NoSaveTarget)?
      .to_path_buf();

    write_contacts(&path, &self.contacts).map_err(|e| Error::save(&path, e))?;

    self.current_file = Some(path);
    self.modified = false;
    Ok(())
  }

  // ── Mutations ─────────────────────────────────────────────────────────

  /// Append a new contact and return it.
  ///
  /// All three fields are trimmed; `name` and `phone` must be non-empty
  /// afterwards. The id is one more than the largest id currently held;
  /// [`Error::IdExhausted`] if that id is already `u64::MAX`.
  pub fn add_contact(
    &mut self,
    name: &str,
    phone: &str,
    comment: &str,
  ) -> Result<Contact> {
    let name = name.trim();
    let phone = phone.trim();
    if name.is_empty() {
      return Err(Error::Validation(Field::Name));
    }
    if phone.is_empty() {
      return Err(Error::Validation(Field::Phone));
    }

    let contact = Contact {
      id:      self.next_id()?,
      name:    name.to_owned(),
      phone:   phone.to_owned(),
      comment: comment.trim().to_owned(),
    };

    self.contacts.push(contact.clone());
    self.modified = true;
    Ok(contact)
  }

  /// Contacts containing `term`, in store order.
  ///
  /// `name` and `comment` match case-insensitively, `phone` verbatim. An
  /// empty term matches everything.
  pub fn find_contacts(&self, term: &str) -> Vec<&Contact> {
    let needle = term.to_lowercase();
    self
      .contacts
      .iter()
      .filter(|c| c.matches(term, &needle))
      .collect()
  }

  /// Apply a partial update to the contact with `id`.
  ///
  /// The store is marked modified whenever the id exists, even if no field
  /// ends up changing.
  pub fn update_contact(
    &mut self,
    id: u64,
    update: &ContactUpdate,
  ) -> Result<&Contact> {
    let contact = self
      .contacts
      .iter_mut()
      .find(|c| c.id == id)
      .ok_or(Error::NotFound(id))?;

    update.apply_to(contact);
    self.modified = true;
    Ok(contact)
  }

  /// Remove the contact with `id` and return it.
  pub fn delete_contact(&mut self, id: u64) -> Result<Contact> {
    let index = self
      .contacts
      .iter()
      .position(|c| c.id == id)
      .ok_or(Error::NotFound(id))?;

    let removed = self.contacts.remove(index);
    self.modified = true;
    Ok(removed)
  }

  fn next_id(&self) -> Result<u64> {
    let max = self.contacts.iter().map(|c| c.id).max().unwrap_or(0);
    max.checked_add(1).ok_or(Error::IdExhausted)
  }
}

// ─── File I/O ────────────────────────────────────────────────────────────────

fn read_contacts(path: &Path) -> Result<Vec<Contact>, FileError> {
  let raw = fs::read_to_string(path)?;
  Ok(serde_json::from_str(&raw)?)
}

/// Serialise `contacts` as a 4-space-indented JSON array.
fn encode_contacts(contacts: &[Contact]) -> Result<Vec<u8>, FileError> {
  let mut buf = Vec::new();
  let mut ser = serde_json::Serializer::with_formatter(
    &mut buf,
    PrettyFormatter::with_indent(b"    "),
  );
  contacts.serialize(&mut ser)?;
  buf.push(b'\n');
  Ok(buf)
}

fn write_contacts(path: &Path, contacts: &[Contact]) -> Result<(), FileError> {
  let bytes = encode_contacts(contacts)?;

  // The temporary file must live on the same filesystem for the rename.
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut tmp = NamedTempFile::new_in(dir)?;
  tmp.write_all(&bytes)?;
  tmp.as_file().sync_all()?;

  if let Ok(meta) = fs::metadata(path) {
    tmp.as_file().set_permissions(meta.permissions())?;
  }

  tmp.persist(path).map_err(|e| e.error)?;
  Ok(())
}
