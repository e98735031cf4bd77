//! Named schedule presets

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub expr: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "Every minute",
        expr: "0 * * * * *",
    },
    Preset {
        name: "Every five minutes",
        expr: "0 */5 * * * *",
    },
    Preset {
        name: "Every hour",
        expr: "0 0 * * * *",
    },
    Preset {
        name: "Daily midnight",
        expr: "0 0 0 * * *",
    },
    Preset {
        name: "Daily 9am",
        expr: "0 0 9 * * *",
    },
    Preset {
        name: "Every monday 9am",
        expr: "0 0 9 * * 1",
    },
    Preset {
        name: "Weekdays 9am",
        expr: "0 0 9 * * 1-5",
    },
];

impl Preset {
    /// Lowercase, dash-separated name (`weekdays-9am`)
    pub fn slug(&self) -> String {
        self.name
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Look a preset up by name or slug, case-insensitively
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    let wanted = name.trim();
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(wanted) || p.slug().eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_name_and_slug() {
        assert_eq!(find_preset("every five minutes").unwrap().expr, "0 */5 * * * *");
        assert_eq!(find_preset("weekdays-9am").unwrap().expr, "0 0 9 * * 1-5");
        assert!(find_preset("every fortnight").is_none());
    }

    #[test]
    fn test_slug() {
        assert_eq!(PRESETS[5].slug(), "every-monday-9am");
    }
}
