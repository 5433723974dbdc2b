//! Environment variable validation with helpful warnings
//!
//! Invalid values are ignored (the caller keeps its current setting) and
//! reported with a typo suggestion when one is close enough.

/// Validator for one environment variable
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    /// `valid_values` is only used for the warning text; an empty slice
    /// means free-form (e.g. numbers)
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse `value`, logging a warning and returning `None` when invalid
    pub fn parse<T, F>(&self, value: &str, parser: F) -> Option<T>
    where
        F: Fn(&str) -> Option<T>,
    {
        let parsed = parser(value.trim());
        if parsed.is_none() {
            log::warn!("{}", self.warning(value));
        }
        parsed
    }

    /// Warning text for an invalid `value`
    pub fn warning(&self, value: &str) -> String {
        let mut message = format!(
            "ignoring invalid {} value '{}'{}",
            self.var_name,
            value,
            self.suggest(value)
        );
        if !self.valid_values.is_empty() {
            message.push_str(&format!(" (valid values: {})", self.valid_values.join(", ")));
        }
        message
    }

    fn suggest(&self, value: &str) -> String {
        let input = value.trim().to_lowercase();
        let best = self
            .valid_values
            .iter()
            .map(|valid| (*valid, levenshtein(&input, valid)))
            .min_by_key(|(_, dist)| *dist);

        match best {
            Some((suggested, dist)) if dist <= 2 && dist > 0 => {
                format!(", did you mean '{}'?", suggested)
            }
            _ => String::new(),
        }
    }
}

/// Levenshtein distance for typo suggestions
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let a_len = a_bytes.len();
    let b_len = b_bytes.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}
