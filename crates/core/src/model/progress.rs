/// Answered sections against the configured total.
///
/// The total is kept as read from the page, so it may be fractional,
/// negative or infinite. Only a positive total produces a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    answered: u32,
    total: f64,
}

impl Progress {
    #[must_use]
    pub fn new(answered: u32, total: f64) -> Self {
        Self { answered, total }
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// `round(100 * answered / total)`, halves rounding up; 0 unless total is positive.
    ///
    /// Not clamped: answering more sections than `total` yields more than 100.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total > 0.0 {
            (100.0 * f64::from(self.answered) / self.total + 0.5).floor()
        } else {
            0.0
        }
    }

    /// Value for the fill element's `width` style.
    #[must_use]
    pub fn fill_width(&self, clamp: bool) -> String {
        let percent = if clamp {
            self.percent().min(100.0)
        } else {
            self.percent()
        };
        format!("{}%", format_number(percent))
    }

    /// Text for the label element, e.g. `2 / 4` or `2 / 4.5`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} / {}", self.answered, format_number(self.total))
    }
}

/// Shortest decimal form: `4`, `4.5`, `-1`, `Infinity`.
fn format_number(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Drops the sign of -0.
        return "0".to_string();
    }
    value.to_string()
}

/// Parse the configured total from its attribute value with page number
/// coercion rules.
///
/// Decimal, exponent, `0x`/`0o`/`0b` and `Infinity` forms are numeric.
/// Absent, blank or non-numeric input reads as 0.
#[must_use]
pub fn parse_total(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return 0.0;
    };
    parse_number(raw).unwrap_or(0.0)
}

fn parse_number(raw: &str) -> Option<f64> {
    let prefixed = [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ];
    for (prefix, radix) in prefixed {
        if let Some(digits) = raw.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if unsigned == "Infinity" {
        let infinity = f64::INFINITY;
        return Some(if raw.starts_with('-') { -infinity } else { infinity });
    }
    // `f64::from_str` also takes `inf` and `nan`, which are not numbers here.
    let leading = |c: char| c.is_ascii_digit() || c == '.';
    let decimal = |c: char| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-');
    if !unsigned.starts_with(leading) || !unsigned.chars().all(decimal) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|value| !value.is_nan())
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}
