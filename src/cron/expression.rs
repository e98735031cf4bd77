//! Cron form - six editable field slots and their validity
//!
//! Every edit (typed value, keystroke, preset) goes through the same
//! recomposition path, so validity always reflects the current slots.

use serde::Serialize;
use std::fmt;

use super::field::CronField;
use super::grammar::is_valid_field;
use super::presets::Preset;

/// One field slot as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSlot {
    pub field: CronField,
    pub value: String,
    pub valid: bool,
}

/// Snapshot of the whole form after an edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub fields: Vec<FieldSlot>,
    pub expression: String,
    pub valid: bool,
}

impl FieldState {
    pub fn slot(&self, field: CronField) -> &FieldSlot {
        &self.fields[field.index()]
    }

    /// Fields that failed validation
    pub fn invalid_fields(&self) -> Vec<CronField> {
        self.fields
            .iter()
            .filter(|s| !s.valid)
            .map(|s| s.field)
            .collect()
    }
}

/// Editable six-field cron expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronForm {
    values: [String; 6],
}

impl Default for CronForm {
    fn default() -> Self {
        Self::parse("")
    }
}

impl CronForm {
    /// Split an expression into its six slots.
    ///
    /// Missing tokens take the field default (`0` for time fields, `*` for
    /// date fields); tokens past the sixth are ignored.
    pub fn parse(expression: &str) -> Self {
        let mut tokens = expression.split_whitespace();
        let values = CronField::ALL.map(|field| {
            tokens
                .next()
                .unwrap_or_else(|| field.default_token())
                .to_string()
        });
        Self { values }
    }

    pub fn value(&self, field: CronField) -> &str {
        &self.values[field.index()]
    }

    pub fn set_field(&mut self, field: CronField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Append one typed character to a slot
    pub fn push_char(&mut self, field: CronField, c: char) {
        if !c.is_whitespace() {
            self.values[field.index()].push(c);
        }
    }

    /// Remove the last character of a slot
    pub fn pop_char(&mut self, field: CronField) {
        self.values[field.index()].pop();
    }

    /// Overwrite all six slots from a preset's tokens
    pub fn apply_preset(&mut self, preset: &Preset) {
        *self = Self::parse(preset.expr);
    }

    pub fn is_field_valid(&self, field: CronField) -> bool {
        is_valid_field(self.value(field), field)
    }

    pub fn is_valid(&self) -> bool {
        CronField::ALL.into_iter().all(|f| self.is_field_valid(f))
    }

    /// The six slots joined by single spaces, in field order
    pub fn expression(&self) -> String {
        self.values.join(" ")
    }

    /// The expression, only when every field is valid
    pub fn accepted(&self) -> Option<String> {
        self.is_valid().then(|| self.expression())
    }

    pub fn state(&self) -> FieldState {
        let fields: Vec<FieldSlot> = CronField::ALL
            .into_iter()
            .map(|field| FieldSlot {
                field,
                value: self.value(field).to_string(),
                valid: self.is_field_valid(field),
            })
            .collect();
        let valid = fields.iter().all(|s| s.valid);

        FieldState {
            fields,
            expression: self.expression(),
            valid,
        }
    }
}

impl fmt::Display for CronForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression())
    }
}

/// Validate a complete expression in one call
pub fn validate(expression: &str) -> FieldState {
    CronForm::parse(expression).state()
}
