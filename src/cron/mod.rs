//! Cron engine - six-field expression grammar, form state, presets,
//! human-readable descriptions and upcoming run times

mod describe;
mod expression;
mod field;
mod grammar;
mod presets;
mod schedule;

pub use describe::{Describe, EnglishDescriber};
pub use expression::{validate, CronForm, FieldSlot, FieldState};
pub use field::{CronField, FieldRange};
pub use grammar::{is_valid_field, Production};
pub use presets::{find_preset, Preset, PRESETS};
pub use schedule::Schedule;

use thiserror::Error;

/// Errors for callers that need a whole, valid expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CronError {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid value '{value}' for field {field}")]
    InvalidField { field: CronField, value: String },

    #[error("unknown field '{0}' (expected sec, min, hou, dom, mon or dow)")]
    UnknownField(String),
}

/// Split an expression into exactly six tokens, each valid for its field
pub(crate) fn parse_strict(expression: &str) -> Result<[Production; 6], CronError> {
    let tokens: Vec<&str> = expression.split_whitespace().collect();
    if tokens.len() != 6 {
        return Err(CronError::FieldCount(tokens.len()));
    }

    let mut productions = Vec::with_capacity(6);
    for (field, token) in CronField::ALL.into_iter().zip(tokens) {
        match Production::parse(token) {
            Some(p) if p.is_valid_for(field) => productions.push(p),
            _ => {
                return Err(CronError::InvalidField {
                    field,
                    value: token.to_string(),
                })
            }
        }
    }

    productions
        .try_into()
        .map_err(|v: Vec<Production>| CronError::FieldCount(v.len()))
}
