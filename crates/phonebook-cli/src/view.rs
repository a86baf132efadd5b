//! Line-based prompts and rendering.
//!
//! Generic over the input and output streams so the menu can be driven from
//! a script in tests.

use std::io::{BufRead, Write};

use phonebook_core::Contact;

use crate::error::{Error, Result};

const MENU: &str = "
Phonebook
1. Open file
2. Save file
3. Show all contacts
4. Create contact
5. Find contacts
6. Update contact
7. Delete contact
8. Exit
";

pub struct View<R, W> {
  input:  R,
  output: W,
}

impl<R: BufRead, W: Write> View<R, W> {
  pub fn new(input: R, output: W) -> Self { Self { input, output } }

  pub fn show_menu(&mut self) -> Result<()> {
    write!(self.output, "{MENU}")?;
    Ok(())
  }

  /// Print `label` and read one line, trimmed.
  ///
  /// Returns [`Error::EndOfInput`] once the input is exhausted.
  pub fn prompt(&mut self, label: &str) -> Result<String> {
    write!(self.output, "{label}")?;
    self.output.flush()?;

    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Err(Error::EndOfInput);
    }
    Ok(line.trim().to_owned())
  }

  /// Ask a yes/no question; only `y` (any case) counts as yes.
  pub fn confirm(&mut self, label: &str) -> Result<bool> {
    Ok(self.prompt(label)?.eq_ignore_ascii_case("y"))
  }

  pub fn message(&mut self, msg: &str) -> Result<()> {
    writeln!(self.output, "{msg}")?;
    Ok(())
  }

  pub fn show_contacts<'a>(
    &mut self,
    contacts: impl IntoIterator<Item = &'a Contact>,
  ) -> Result<()> {
    let mut any = false;
    for contact in contacts {
      any = true;
      writeln!(self.output)?;
      writeln!(self.output, "ID: {}", contact.id)?;
      writeln!(self.output, "Name: {}", contact.name)?;
      writeln!(self.output, "Phone: {}", contact.phone)?;
      writeln!(self.output, "Comment: {}", contact.comment)?;
    }

    if any {
      writeln!(self.output, "-------------------")?;
    } else {
      writeln!(self.output, "No contacts.")?;
    }
    Ok(())
  }

  #[cfg(test)]
  pub fn into_output(self) -> W { self.output }
}
