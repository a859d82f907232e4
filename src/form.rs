//! Generic form builder driven by a field schema.
//!
//! A [`FormState`] holds the text typed into each field of a schema. It does
//! no I/O: submitting either yields the entered [`FieldValues`] or a
//! [`ValidationError`] pointing at the first empty required field.

use std::collections::BTreeMap;

use crate::models::{Record, RecordId};

/// Describes one input of a form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name, also the key in [`FieldValues`]
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    /// Whether the list table shows this field as a column
    pub in_table: bool,
    pub required_message: &'static str,
}

impl FieldSpec {
    pub const fn required(
        name: &'static str,
        label: &'static str,
        required_message: &'static str,
    ) -> Self {
        FieldSpec {
            name,
            label,
            required: true,
            in_table: true,
            required_message,
        }
    }

    pub const fn hidden_in_table(mut self) -> Self {
        self.in_table = false;
        self
    }
}

/// Plain field-value object produced by a submitted form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldValues(BTreeMap<&'static str, String>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.0.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn get_or_empty(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }
}

/// A required field was left empty
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{label}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub label: &'static str,
    pub message: String,
}

/// Create vs edit, decided by whether an initial record was supplied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

#[derive(Clone, Debug)]
pub struct FormState {
    mode: FormMode,
    schema: &'static [FieldSpec],
    inputs: Vec<String>,
    focused: usize,
    /// Byte offset into the focused input
    cursor: usize,
    error: Option<ValidationError>,
    pending: Option<u64>,
}

impl FormState {
    /// Open a form over `schema`, pre-filled from `initial` when editing
    pub fn new(schema: &'static [FieldSpec], initial: Option<&Record>) -> Self {
        let (mode, inputs) = match initial {
            Some(record) => (
                FormMode::Edit(record.id),
                (0..schema.len())
                    .map(|i| record.values.get(i).cloned().unwrap_or_default())
                    .collect(),
            ),
            None => (FormMode::Create, vec![String::new(); schema.len()]),
        };
        let cursor = inputs.first().map(String::len).unwrap_or(0);

        FormState {
            mode,
            schema,
            inputs,
            focused: 0,
            cursor,
            error: None,
            pending: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn schema(&self) -> &'static [FieldSpec] {
        self.schema
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_request(&self) -> Option<u64> {
        self.pending
    }

    pub fn mark_pending(&mut self, request_id: u64) {
        self.pending = Some(request_id);
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    // ========================
    // Field navigation
    // ========================

    pub fn next_field(&mut self) {
        if !self.inputs.is_empty() {
            self.focus((self.focused + 1) % self.inputs.len());
        }
    }

    pub fn prev_field(&mut self) {
        if !self.inputs.is_empty() {
            let prev = self.focused.checked_sub(1).unwrap_or(self.inputs.len() - 1);
            self.focus(prev);
        }
    }

    fn focus(&mut self, index: usize) {
        self.focused = index;
        self.cursor = self.inputs.get(index).map(String::len).unwrap_or(0);
    }

    // ========================
    // Text editing
    // ========================

    pub fn enter_char(&mut self, c: char) {
        if self.pending.is_some() {
            return;
        }
        let cursor = self.cursor;
        if let Some(input) = self.inputs.get_mut(self.focused) {
            if cursor <= input.len() {
                input.insert(cursor, c);
                self.cursor = cursor + c.len_utf8();
            }
        }
        self.clear_error_on_focused();
    }

    pub fn delete_char(&mut self) {
        if self.pending.is_some() || self.cursor == 0 {
            return;
        }
        let cursor = self.cursor;
        if let Some(input) = self.inputs.get_mut(self.focused) {
            let prev = input[..cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(input) = self.inputs.get(self.focused) {
            if self.cursor > 0 {
                self.cursor = input[..self.cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
            }
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(input) = self.inputs.get(self.focused) {
            if self.cursor < input.len() {
                self.cursor = input[self.cursor..]
                    .char_indices()
                    .nth(1)
                    .map(|(i, _)| self.cursor + i)
                    .unwrap_or(input.len());
            }
        }
    }

    fn clear_error_on_focused(&mut self) {
        let focused = self.schema.get(self.focused).map(|f| f.name);
        if self.error.as_ref().map(|e| e.field) == focused {
            self.error = None;
        }
    }

    // ========================
    // Submission
    // ========================

    /// Check required fields without touching the form
    pub fn validate(&self) -> Result<FieldValues, ValidationError> {
        let mut values = FieldValues::new();
        for (spec, input) in self.schema.iter().zip(self.inputs.iter()) {
            if spec.required && input.trim().is_empty() {
                return Err(ValidationError {
                    field: spec.name,
                    label: spec.label,
                    message: spec.required_message.to_string(),
                });
            }
            values = values.with(spec.name, input.clone());
        }
        Ok(values)
    }

    /// Validate; on failure highlight and focus the offending field
    pub fn submit(&mut self) -> Result<FieldValues, ValidationError> {
        match self.validate() {
            Ok(values) => {
                self.error = None;
                Ok(values)
            }
            Err(err) => {
                self.reject(err.clone());
                Err(err)
            }
        }
    }

    /// Flag a field as invalid and move focus to it
    pub fn reject(&mut self, err: ValidationError) {
        if let Some(index) = self.schema.iter().position(|f| f.name == err.field) {
            self.focus(index);
        }
        self.error = Some(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceKind;

    fn museum_form(initial: Option<&Record>) -> FormState {
        FormState::new(ResourceKind::Museum.schema(), initial)
    }

    fn type_text(form: &mut FormState, text: &str) {
        for c in text.chars() {
            form.enter_char(c);
        }
    }

    #[test]
    fn empty_form_is_create_mode_and_blocks_submit() {
        let mut form = museum_form(None);
        assert_eq!(form.mode(), FormMode::Create);

        let err = form.submit().unwrap_err();
        assert_eq!(err.field, "nombre");
        assert_eq!(err.message, "El nombre es obligatorio");
        assert_eq!(form.error(), Some(&err));
    }

    #[test]
    fn missing_second_field_moves_focus_to_it() {
        let mut form = museum_form(None);
        type_text(&mut form, "Louvre");
        form.next_field();
        form.next_field();
        assert_eq!(form.focused(), 0);

        let err = form.submit().unwrap_err();
        assert_eq!(err.field, "ubicacion");
        assert_eq!(form.focused(), 1);
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut form = museum_form(None);
        type_text(&mut form, "   ");
        form.next_field();
        type_text(&mut form, "Paris");
        assert_eq!(form.submit().unwrap_err().field, "nombre");
    }

    #[test]
    fn filled_form_yields_values() {
        let mut form = museum_form(None);
        type_text(&mut form, "Louvre");
        form.next_field();
        type_text(&mut form, "Paris");

        let values = form.submit().unwrap();
        assert_eq!(values.get("nombre"), Some("Louvre"));
        assert_eq!(values.get("ubicacion"), Some("Paris"));
        assert!(form.error().is_none());
    }

    #[test]
    fn edit_mode_prefills_record_values() {
        let record = Record::new(RecordId(7), vec!["Prado".into(), "Madrid".into()]);
        let form = museum_form(Some(&record));

        assert_eq!(form.mode(), FormMode::Edit(RecordId(7)));
        assert_eq!(form.inputs(), &["Prado".to_string(), "Madrid".to_string()]);
        assert_eq!(form.cursor(), "Prado".len());
    }

    #[test]
    fn typing_clears_error_on_the_offending_field() {
        let mut form = museum_form(None);
        form.submit().unwrap_err();
        form.enter_char('L');
        assert!(form.error().is_none());
    }

    #[test]
    fn cursor_handles_multibyte_chars() {
        let mut form = museum_form(None);
        type_text(&mut form, "Ubicación");
        form.move_cursor_left();
        form.move_cursor_left();
        form.delete_char();
        assert_eq!(form.inputs()[0], "Ubicacón");
        form.move_cursor_right();
        form.move_cursor_right();
        assert_eq!(form.cursor(), "Ubicacón".len());
    }

    #[test]
    fn pending_form_ignores_typing() {
        let mut form = museum_form(None);
        form.mark_pending(3);
        form.enter_char('x');
        assert!(form.inputs()[0].is_empty());
        assert_eq!(form.pending_request(), Some(3));
    }
}
