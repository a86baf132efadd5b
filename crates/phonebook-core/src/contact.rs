//! Contact types — the records held by a [`crate::store::ContactStore`].

use serde::{Deserialize, Serialize};

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A single phonebook entry.
///
/// Field order matches the key order of the on-disk JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  /// Assigned by the store; never supplied by callers.
  pub id:      u64,
  pub name:    String,
  pub phone:   String,
  pub comment: String,
}

impl Contact {
  /// Whether `term` occurs in this contact.
  ///
  /// `name` and `comment` are compared case-insensitively; `phone` is matched
  /// verbatim. `needle` must already be lowercased by the caller.
  pub(crate) fn matches(&self, term: &str, needle: &str) -> bool {
    self.name.to_lowercase().contains(needle)
      || self.phone.contains(term)
      || self.comment.to_lowercase().contains(needle)
  }
}

// ─── ContactUpdate ───────────────────────────────────────────────────────────

/// Input to [`crate::store::ContactStore::update_contact`].
///
/// A field that is `None`, or that is empty after trimming, leaves the
/// existing value untouched. An update therefore cannot clear a comment,
/// even though [`crate::store::ContactStore::add_contact`] accepts an empty
/// one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
  pub name:    Option<String>,
  pub phone:   Option<String>,
  pub comment: Option<String>,
}

impl ContactUpdate {
  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  pub fn phone(mut self, phone: impl Into<String>) -> Self {
    self.phone = Some(phone.into());
    self
  }

  pub fn comment(mut self, comment: impl Into<String>) -> Self {
    self.comment = Some(comment.into());
    self
  }

  /// Overwrite the fields of `contact` that this update carries.
  pub(crate) fn apply_to(&self, contact: &mut Contact) {
    apply(&mut contact.name, self.name.as_deref());
    apply(&mut contact.phone, self.phone.as_deref());
    apply(&mut contact.comment, self.comment.as_deref());
  }
}

fn apply(slot: &mut String, value: Option<&str>) {
  if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
    *slot = v.to_owned();
  }
}
