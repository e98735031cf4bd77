//! Human-readable schedule descriptions

use super::grammar::Production;
use super::{parse_strict, CronError};

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Turns a valid six-field expression into a sentence for a locale
pub trait Describe {
    fn describe(&self, expression: &str, locale: &str) -> Result<String, CronError>;
}

/// Built-in describer; every locale is rendered in English
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishDescriber;

impl Describe for EnglishDescriber {
    fn describe(&self, expression: &str, locale: &str) -> Result<String, CronError> {
        let lang = locale.to_ascii_lowercase();
        if !(lang.is_empty() || lang.starts_with("en")) {
            log::debug!("No '{}' translation, describing schedule in English", locale);
        }

        let [sec, min, hou, dom, mon, dow] = parse_strict(expression)?;

        let mut parts = vec![time_phrase(&sec, &min, &hou)];
        parts.extend(day_of_month_phrase(&dom));
        parts.extend(day_of_week_phrase(&dow));
        parts.extend(month_phrase(&mon));

        Ok(parts.join(", "))
    }
}

fn time_phrase(sec: &Production, min: &Production, hou: &Production) -> String {
    use Production::*;

    match (sec, min, hou) {
        (Single(0), Single(m), Single(h)) => format!("at {:02}:{:02}", h, m),
        (Single(s), Single(m), Single(h)) => format!("at {:02}:{:02}:{:02}", h, m, s),
        (Wildcard, Wildcard, Wildcard) => "every second".to_string(),
        (Single(0), Wildcard, Wildcard) => "every minute".to_string(),
        (Single(0), Single(0), Wildcard) => "every hour".to_string(),
        _ => {
            let mut segments = Vec::new();
            match sec {
                Single(0) => {}
                other => segments.push(unit_phrase(other, "second")),
            }
            match min {
                Wildcard if matches!(sec, Single(0)) => segments.push("every minute".to_string()),
                Wildcard => {}
                other => segments.push(unit_phrase(other, "minute")),
            }
            if !matches!(hou, Wildcard) {
                segments.push(unit_phrase(hou, "hour"));
            }
            segments.join(", ")
        }
    }
}

fn unit_phrase(production: &Production, unit: &str) -> String {
    match production {
        Production::Wildcard | Production::StepWildcard { step: 1 } => format!("every {}", unit),
        Production::StepWildcard { step } => format!("every {} {}s", step, unit),
        Production::Range { start, end } => format!("{}s {} through {}", unit, start, end),
        Production::StepRange { start, end, step } => {
            format!("every {} {}s, {}s {} through {}", step, unit, unit, start, end)
        }
        Production::List(values) => format!("at {}s {}", unit, join_list(values, |v| v.to_string())),
        Production::Single(value) => format!("at {} {}", unit, value),
    }
}

fn day_of_month_phrase(dom: &Production) -> Option<String> {
    let phrase = match dom {
        Production::Wildcard => return None,
        Production::StepWildcard { step } => format!("every {} days", step),
        Production::Range { start, end } => {
            format!("between day {} and {} of the month", start, end)
        }
        Production::StepRange { start, end, step } => format!(
            "every {} days, between day {} and {} of the month",
            step, start, end
        ),
        Production::List(values) => format!(
            "on days {} of the month",
            join_list(values, |v| v.to_string())
        ),
        Production::Single(day) => format!("on day {} of the month", day),
    };
    Some(phrase)
}

fn day_of_week_phrase(dow: &Production) -> Option<String> {
    let name = |v: &u32| WEEKDAYS[*v as usize % 7].to_string();
    let phrase = match dow {
        Production::Wildcard => return None,
        Production::StepWildcard { step } => format!("every {} days of the week", step),
        Production::Range { start, end } => format!("{} through {}", name(start), name(end)),
        Production::StepRange { start, end, step } => format!(
            "every {} days of the week, {} through {}",
            step,
            name(start),
            name(end)
        ),
        Production::List(values) => format!("only on {}", join_list(values, name)),
        Production::Single(day) => format!("only on {}", name(day)),
    };
    Some(phrase)
}

fn month_phrase(mon: &Production) -> Option<String> {
    let name = |v: &u32| MONTHS[(*v as usize).saturating_sub(1) % 12].to_string();
    let phrase = match mon {
        Production::Wildcard => return None,
        Production::StepWildcard { step } => format!("every {} months", step),
        Production::Range { start, end } => format!("{} through {}", name(start), name(end)),
        Production::StepRange { start, end, step } => format!(
            "every {} months, {} through {}",
            step,
            name(start),
            name(end)
        ),
        Production::List(values) => format!("only in {}", join_list(values, name)),
        Production::Single(month) => format!("only in {}", name(month)),
    };
    Some(phrase)
}

/// "a", "a and b", "a, b and c"
fn join_list(values: &[u32], render: impl Fn(&u32) -> String) -> String {
    let items: Vec<String> = values.iter().map(render).collect();
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cron::PRESETS;

    fn describe(expr: &str) -> String {
        EnglishDescriber.describe(expr, "en").unwrap()
    }

    #[test]
    fn test_presets() {
        let expected = [
            "every minute",
            "every 5 minutes",
            "every hour",
            "at 00:00",
            "at 09:00",
            "at 09:00, only on Monday",
            "at 09:00, Monday through Friday",
        ];
        for (preset, text) in PRESETS.iter().zip(expected) {
            assert_eq!(describe(preset.expr), text, "preset {}", preset.name);
        }
    }

    #[test]
    fn test_time_shapes() {
        assert_eq!(describe("* * * * * *"), "every second");
        assert_eq!(describe("*/10 * * * * *"), "every 10 seconds");
        assert_eq!(describe("30 15 8 * * *"), "at 08:15:30");
        assert_eq!(describe("0 0,30 9-17 * * *"), "at minutes 0 and 30, hours 9 through 17");
        assert_eq!(describe("0 0 */2 * * *"), "at minute 0, every 2 hours");
    }

    #[test]
    fn test_date_shapes() {
        assert_eq!(
            describe("0 0 12 1,15 * *"),
            "at 12:00, on days 1 and 15 of the month"
        );
        assert_eq!(
            describe("0 0 6 * 1-3 0,6"),
            "at 06:00, only on Sunday and Saturday, January through March"
        );
        assert_eq!(describe("0 0 0 * 12 *"), "at 00:00, only in December");
    }

    #[test]
    fn test_other_locale_falls_back() {
        assert_eq!(
            EnglishDescriber.describe("0 */5 * * * *", "pt-BR").unwrap(),
            "every 5 minutes"
        );
    }

    #[test]
    fn test_invalid_expression() {
        assert!(EnglishDescriber.describe("0 61 * * * *", "en").is_err());
        assert!(EnglishDescriber.describe("0 * * *", "en").is_err());
    }

    #[test]
    fn test_join_list() {
        let plain = |v: &u32| v.to_string();
        assert_eq!(join_list(&[1], plain), "1");
        assert_eq!(join_list(&[1, 2], plain), "1 and 2");
        assert_eq!(join_list(&[1, 2, 3], plain), "1, 2 and 3");
    }
}
