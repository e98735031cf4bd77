//! Field grammar - one token of a cron expression
//!
//! A token is matched against six productions, in order:
//! `*`, `*/N`, `A-B`, `A-B/N`, `A,B,...`, and a single integer.
//! Parsing is purely syntactic; range checks live in [`Production::is_valid_for`].

use super::field::CronField;

/// A syntactically recognised field token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Production {
    /// `*`
    Wildcard,
    /// `*/N`
    StepWildcard { step: u32 },
    /// `A-B`
    Range { start: u32, end: u32 },
    /// `A-B/N`
    StepRange { start: u32, end: u32, step: u32 },
    /// `A,B,C` (two or more values)
    List(Vec<u32>),
    /// `A`
    Single(u32),
}

/// Decimal digits only; no sign, no whitespace
fn number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn range(s: &str) -> Option<(u32, u32)> {
    let (start, end) = s.split_once('-')?;
    Some((number(start)?, number(end)?))
}

impl Production {
    /// Match a token against the productions; `None` if none applies
    pub fn parse(token: &str) -> Option<Self> {
        if token == "*" {
            return Some(Self::Wildcard);
        }

        if let Some(step) = token.strip_prefix("*/") {
            return number(step).map(|step| Self::StepWildcard { step });
        }

        if let Some((range_part, step)) = token.split_once('/') {
            let (start, end) = range(range_part)?;
            let step = number(step)?;
            return Some(Self::StepRange { start, end, step });
        }

        if token.contains('-') {
            let (start, end) = range(token)?;
            return Some(Self::Range { start, end });
        }

        if token.contains(',') {
            let values = token
                .split(',')
                .map(number)
                .collect::<Option<Vec<u32>>>()?;
            return Some(Self::List(values));
        }

        number(token).map(Self::Single)
    }

    /// Semantic check of the production against a field's range
    pub fn is_valid_for(&self, field: CronField) -> bool {
        let range = field.range();
        match self {
            Self::Wildcard => true,
            Self::StepWildcard { step } => *step > 0 && *step <= range.max,
            Self::Range { start, end } => {
                *start >= range.min && *end <= range.max && start <= end
            }
            Self::StepRange { start, end, step } => {
                *start >= range.min && *end <= range.max && start <= end && *step > 0
            }
            Self::List(values) => values.iter().all(|v| range.contains(*v)),
            Self::Single(value) => range.contains(*value),
        }
    }

    /// Every value the production selects within the field's range
    pub fn values(&self, field: CronField) -> Vec<u32> {
        let range = field.range();
        let mut values: Vec<u32> = match self {
            Self::Wildcard => (range.min..=range.max).collect(),
            Self::StepWildcard { step } => {
                (range.min..=range.max).step_by((*step).max(1) as usize).collect()
            }
            Self::Range { start, end } => (*start..=*end).collect(),
            Self::StepRange { start, end, step } => {
                (*start..=*end).step_by((*step).max(1) as usize).collect()
            }
            Self::List(values) => values.clone(),
            Self::Single(value) => vec![*value],
        };
        values.retain(|v| range.contains(*v));
        values.sort_unstable();
        values.dedup();
        values
    }
}

/// Whether a raw token is a valid value for the field
pub fn is_valid_field(token: &str, field: CronField) -> bool {
    Production::parse(token).is_some_and(|p| p.is_valid_for(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use CronField::*;

    #[test]
    fn test_parse_productions() {
        assert_eq!(Production::parse("*"), Some(Production::Wildcard));
        assert_eq!(Production::parse("*/5"), Some(Production::StepWildcard { step: 5 }));
        assert_eq!(Production::parse("1-5"), Some(Production::Range { start: 1, end: 5 }));
        assert_eq!(
            Production::parse("0-30/10"),
            Some(Production::StepRange { start: 0, end: 30, step: 10 })
        );
        assert_eq!(Production::parse("1,15,30"), Some(Production::List(vec![1, 15, 30])));
        assert_eq!(Production::parse("42"), Some(Production::Single(42)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for token in [
            "", "**", "*/", "*/x", "1-", "-5", "1-2-3", "1,,2", ",1", "1,", "5abc", "a", "+3",
            "*/5/2", "1/2", "1,2-3", " 1", "١",
        ] {
            assert_eq!(Production::parse(token), None, "token {:?}", token);
        }
    }

    #[test]
    fn test_wildcard() {
        for field in CronField::ALL {
            assert!(is_valid_field("*", field));
        }
    }

    #[test]
    fn test_step_wildcard() {
        assert!(is_valid_field("*/5", Minute));
        assert!(is_valid_field("*/59", Second));
        assert!(!is_valid_field("*/60", Second));
        assert!(!is_valid_field("*/0", Minute));
        assert!(is_valid_field("*/31", DayOfMonth));
        assert!(!is_valid_field("*/7", DayOfWeek));
    }

    #[test]
    fn test_range() {
        assert!(is_valid_field("1-5", DayOfWeek));
        assert!(is_valid_field("0-23", Hour));
        assert!(!is_valid_field("0-24", Hour));
        assert!(!is_valid_field("0-5", DayOfMonth));
        assert!(!is_valid_field("5-1", DayOfWeek));
        assert!(is_valid_field("3-3", Month));
    }

    #[test]
    fn test_step_range() {
        assert!(is_valid_field("0-30/10", Minute));
        assert!(!is_valid_field("0-30/0", Minute));
        assert!(is_valid_field("1-31/5", Second));
        assert!(!is_valid_field("1-60/5", Second));
        assert!(!is_valid_field("10-5/2", Hour));
    }

    #[test]
    fn test_list() {
        assert!(is_valid_field("0,15,30,45", Minute));
        assert!(!is_valid_field("0,15,60", Minute));
        assert!(!is_valid_field("0,6", Month));
        assert!(is_valid_field("0,6", DayOfWeek));
    }

    #[test]
    fn test_single() {
        assert!(!is_valid_field("70", Second));
        assert!(!is_valid_field("0", DayOfMonth));
        assert!(!is_valid_field("13", Month));
        assert!(is_valid_field("12", Month));
        assert!(!is_valid_field("7", DayOfWeek));
        assert!(!is_valid_field("99999999999", Second));
    }

    #[test]
    fn test_values() {
        assert_eq!(Production::Wildcard.values(DayOfWeek), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(
            Production::StepWildcard { step: 15 }.values(Minute),
            vec![0, 15, 30, 45]
        );
        assert_eq!(
            Production::StepWildcard { step: 10 }.values(DayOfMonth),
            vec![1, 11, 21, 31]
        );
        assert_eq!(
            Production::StepRange { start: 1, end: 10, step: 4 }.values(Hour),
            vec![1, 5, 9]
        );
        assert_eq!(Production::List(vec![30, 5, 5]).values(Minute), vec![5, 30]);
    }
}
