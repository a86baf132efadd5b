//! Menu controller: reads a choice, dispatches it against the store, repeats.

use std::{
  io::{BufRead, Write},
  path::Path,
};

use phonebook_core::{ContactStore, ContactUpdate};

use crate::{
  error::{Error, Result},
  view::View,
};

// ─── Action ───────────────────────────────────────────────────────────────────

/// One numbered menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Open,
  Save,
  List,
  Create,
  Find,
  Update,
  Delete,
  Exit,
}

impl Action {
  pub fn from_choice(choice: &str) -> Option<Self> {
    Some(match choice {
      "1" => Self::Open,
      "2" => Self::Save,
      "3" => Self::List,
      "4" => Self::Create,
      "5" => Self::Find,
      "6" => Self::Update,
      "7" => Self::Delete,
      "8" => Self::Exit,
      _ => return None,
    })
  }
}

/// What the loop does after an action completes.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
  Continue,
  Quit,
}

/// Parse a user-supplied contact id: ASCII digits only, greater than zero.
///
/// The store never assigns `0`, but `open_file` loads ids verbatim, so a
/// hand-edited file may hold a contact with id `0`. Such a contact is listed
/// and searchable but cannot be updated or deleted from the menu.
pub fn parse_id(raw: &str) -> Result<u64> {
  if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
    return Err(Error::InputFormat(raw.to_owned()));
  }
  match raw.parse::<u64>() {
    Ok(id) if id > 0 => Ok(id),
    _ => Err(Error::InputFormat(raw.to_owned())),
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<R, W> {
  pub store: ContactStore,
  view:      View<R, W>,
}

impl<R: BufRead, W: Write> App<R, W> {
  pub fn new(input: R, output: W) -> Self {
    Self { store: ContactStore::new(), view: View::new(input, output) }
  }

  /// Open `path` before the menu starts. A failure is reported and the
  /// session continues with an empty store.
  pub fn open_startup_file(&mut self, path: &Path) -> Result<()> {
    match self.store.open_file(path) {
      Ok(()) => {
        tracing::info!(path = %path.display(), count = self.store.contacts().len(), "opened file");
        Ok(())
      }
      Err(e) => {
        tracing::warn!(error = %e, "could not open startup file");
        self.view.message(&format!("Error: {e}"))
      }
    }
  }

  /// Run the menu until the user exits or input ends.
  ///
  /// Per-action failures are shown and the menu is redrawn; only terminal
  /// I/O errors are returned.
  pub fn run(&mut self) -> Result<()> {
    loop {
      self.view.show_menu()?;
      let choice = match self.view.prompt("Choose an action: ") {
        Ok(c) => c,
        Err(Error::EndOfInput) => {
          tracing::info!(modified = self.store.is_modified(), "input closed");
          return Ok(());
        }
        Err(e) => return Err(e),
      };

      let Some(action) = Action::from_choice(&choice) else {
        self.view.message("Invalid choice. Try again.")?;
        continue;
      };

      tracing::debug!(?action, "dispatching");
      match self.dispatch(action) {
        Ok(Flow::Continue) => {}
        Ok(Flow::Quit) => return Ok(()),
        Err(Error::EndOfInput) => return Ok(()),
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
          tracing::warn!(?action, error = %e, "action failed");
          self.view.message(&format!("Error: {e}"))?;
        }
      }
    }
  }

  fn dispatch(&mut self, action: Action) -> Result<Flow> {
    match action {
      Action::Open => self.open_file()?,
      Action::Save => self.save_file()?,
      Action::List => self.view.show_contacts(self.store.contacts())?,
      Action::Create => self.create_contact()?,
      Action::Find => self.find_contacts()?,
      Action::Update => self.update_contact()?,
      Action::Delete => self.delete_contact()?,
      Action::Exit => return self.exit(),
    }
    Ok(Flow::Continue)
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  fn open_file(&mut self) -> Result<()> {
    let name = self.view.prompt("File name: ")?;
    self.store.open_file(&name)?;
    tracing::info!(path = %name, count = self.store.contacts().len(), "opened file");
    self.view.message("File loaded.")
  }

  /// Save to the current file, asking for a name when there is none.
  fn save_file(&mut self) -> Result<()> {
    let path = match self.store.current_file() {
      Some(p) => p.to_path_buf(),
      None => self.view.prompt("File name to save to: ")?.into(),
    };
    self.store.save_file(Some(&path))?;
    tracing::info!(path = %path.display(), "saved file");
    self.view.message("File saved.")
  }

  fn create_contact(&mut self) -> Result<()> {
    let name = self.view.prompt("Name: ")?;
    let phone = self.view.prompt("Phone: ")?;
    let comment = self.view.prompt("Comment: ")?;

    let id = self.store.add_contact(&name, &phone, &comment)?.id;
    tracing::info!(id, "created contact");
    self.view.message("Contact created.")
  }

  fn find_contacts(&mut self) -> Result<()> {
    let term = self.view.prompt("Search: ")?;
    let found = self.store.find_contacts(&term);
    self.view.show_contacts(found)
  }

  fn update_contact(&mut self) -> Result<()> {
    let id = parse_id(&self.view.prompt("Contact ID: ")?)?;
    if self.store.get(id).is_none() {
      return Err(phonebook_core::Error::NotFound(id).into());
    }

    let keep = "(leave empty to keep)";
    let update = ContactUpdate {
      name:    non_empty(self.view.prompt(&format!("New name {keep}: "))?),
      phone:   non_empty(self.view.prompt(&format!("New phone {keep}: "))?),
      comment: non_empty(self.view.prompt(&format!("New comment {keep}: "))?),
    };

    self.store.update_contact(id, &update)?;
    tracing::info!(id, "updated contact");
    self.view.message("Contact updated.")
  }

  fn delete_contact(&mut self) -> Result<()> {
    let id = parse_id(&self.view.prompt("Contact ID: ")?)?;
    if !self.view.confirm("Are you sure? (y/n): ")? {
      return Ok(());
    }

    self.store.delete_contact(id)?;
    tracing::info!(id, "deleted contact");
    self.view.message("Contact deleted.")
  }

  fn exit(&mut self) -> Result<Flow> {
    if self.store.is_modified()
      && self.view.confirm("Save changes before exiting? (y/n): ")?
    {
      self.save_file()?;
    }
    Ok(Flow::Quit)
  }

  #[cfg(test)]
  fn into_output(self) -> W { self.view.into_output() }
}

fn non_empty(s: String) -> Option<String> { (!s.is_empty()).then_some(s) }

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::{fs, io::Cursor};

  use super::*;

  type TestApp<'a> = App<Cursor<&'a [u8]>, Vec<u8>>;

  fn app(script: &str) -> TestApp<'_> { App::new(Cursor::new(script.as_bytes()), Vec::new()) }

  fn output(app: TestApp<'_>) -> String {
    String::from_utf8(app.into_output()).unwrap()
  }

  #[test]
  fn parse_id_accepts_positive_integers_only() {
    assert_eq!(parse_id("12").unwrap(), 12);
    for bad in ["", "0", "-1", "+3", "1.5", "abc", "99999999999999999999999"] {
      assert!(matches!(parse_id(bad), Err(Error::InputFormat(_))), "{bad:?}");
    }
  }

  #[test]
  fn loaded_zero_id_is_listed_but_not_addressable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    fs::write(&path, r#"[{"id": 0, "name": "Zero", "phone": "0", "comment": ""}]"#).unwrap();

    let mut a = app("3\n7\n0\n8\n");
    a.open_startup_file(&path).unwrap();
    a.run().unwrap();

    assert_eq!(a.store.contacts().len(), 1);
    let out = output(a);
    assert!(out.contains("ID: 0\nName: Zero"));
    assert!(out.contains("Error: invalid id format: \"0\""));
  }

  #[test]
  fn action_from_choice() {
    assert_eq!(Action::from_choice("1"), Some(Action::Open));
    assert_eq!(Action::from_choice("8"), Some(Action::Exit));
    assert_eq!(Action::from_choice("9"), None);
    assert_eq!(Action::from_choice(""), None);
  }

  #[test]
  fn create_and_list() {
    let mut a = app("4\nAlice\n555-1234\nfriend\n3\n8\nn\n");
    a.run().unwrap();

    assert_eq!(a.store.contacts().len(), 1);
    let out = output(a);
    assert!(out.contains("Contact created."));
    assert!(out.contains("ID: 1\nName: Alice\nPhone: 555-1234\nComment: friend"));
  }

  #[test]
  fn create_with_missing_phone_reports_error() {
    let mut a = app("4\nAlice\n\nfriend\n8\n");
    a.run().unwrap();

    assert!(a.store.contacts().is_empty());
    assert!(output(a).contains("Error: phone must not be empty"));
  }

  #[test]
  fn invalid_choice_is_reported() {
    let mut a = app("42\n8\n");
    a.run().unwrap();
    assert!(output(a).contains("Invalid choice. Try again."));
  }

  #[test]
  fn list_empty_store() {
    let mut a = app("3\n8\n");
    a.run().unwrap();
    assert!(output(a).contains("No contacts."));
  }

  #[test]
  fn find_filters_contacts() {
    let mut a = app("4\nAlice\n1\nfriend\n4\nBob\n2\n\n5\nFRIEND\n8\nn\n");
    a.run().unwrap();

    let out = output(a);
    let search = out.rsplit("Search: ").next().unwrap();
    assert!(search.contains("Name: Alice"));
    assert!(!search.contains("Name: Bob"));
  }

  #[test]
  fn update_keeps_blank_fields() {
    let mut a = app("4\nAlice\n1\nfriend\n6\n1\n\n999\n\n8\nn\n");
    a.run().unwrap();

    let c = &a.store.contacts()[0];
    assert_eq!(c.name, "Alice");
    assert_eq!(c.phone, "999");
    assert_eq!(c.comment, "friend");
  }

  #[test]
  fn update_rejects_bad_and_unknown_ids() {
    let mut a = app("6\nabc\n6\n7\n8\n");
    a.run().unwrap();

    let out = output(a);
    assert!(out.contains("Error: invalid id format: \"abc\""));
    assert!(out.contains("Error: contact not found: 7"));
    // The unknown id is caught before any field prompt.
    assert!(!out.contains("New name"));
  }

  #[test]
  fn delete_requires_confirmation() {
    let mut a = app("4\nAlice\n1\n\n7\n1\nn\n7\n1\nY\n8\nn\n");
    a.run().unwrap();

    assert!(a.store.contacts().is_empty());
    assert_eq!(output(a).matches("Contact deleted.").count(), 1);
  }

  #[test]
  fn delete_unknown_id_is_reported() {
    let mut a = app("7\n5\ny\n8\n");
    a.run().unwrap();
    assert!(output(a).contains("Error: contact not found: 5"));
  }

  #[test]
  fn save_prompts_for_name_then_reuses_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    let script = format!(
      "4\nAlice\n1\n\n2\n{}\n4\nBob\n2\n\n2\n8\n",
      path.display()
    );

    let mut a = app(&script);
    a.run().unwrap();

    assert!(!a.store.is_modified());
    let mut reloaded = ContactStore::new();
    reloaded.open_file(&path).unwrap();
    assert_eq!(reloaded.contacts().len(), 2);
    assert_eq!(output(a).matches("File name to save to: ").count(), 1);
  }

  #[test]
  fn exit_offers_to_save_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    let script = format!("4\nAlice\n1\n\n8\ny\n{}\n", path.display());

    let mut a = app(&script);
    a.run().unwrap();

    assert!(fs::read_to_string(&path).unwrap().contains("Alice"));
  }

  #[test]
  fn exit_without_changes_does_not_prompt() {
    let mut a = app("8\n");
    a.run().unwrap();
    assert!(!output(a).contains("Save changes"));
  }

  #[test]
  fn open_failure_keeps_menu_running() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let script = format!("1\n{}\n3\n8\n", missing.display());

    let mut a = app(&script);
    a.run().unwrap();

    let out = output(a);
    assert!(out.contains("Error: failed to load"));
    assert!(out.contains("No contacts."));
  }

  #[test]
  fn open_startup_file_loads_contacts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    fs::write(&path, r#"[{"id": 4, "name": "Dee", "phone": "4", "comment": ""}]"#).unwrap();

    let mut a = app("");
    a.open_startup_file(&path).unwrap();
    assert_eq!(a.store.get(4).map(|c| c.name.as_str()), Some("Dee"));
    assert_eq!(a.store.current_file(), Some(path.as_path()));
  }

  #[test]
  fn end_of_input_stops_cleanly() {
    let mut a = app("4\nAlice\n");
    a.run().unwrap();
    assert!(a.store.contacts().is_empty());
  }
}
