//! Identifier sequencing
//!
//! Identifiers are decimal strings derived from the wall clock in
//! milliseconds. Two creations inside the same millisecond would collide, so
//! the sequence never issues a value lower than or equal to the previous one.
//! Values are kept as decimal digit strings, so priming from an arbitrarily
//! large stored id cannot overflow.

use std::cmp::Ordering;

/// Strictly increasing, time-derived identifier source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    /// Canonical decimal digits, no leading zeros
    last: String,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self {
            last: "0".to_string(),
        }
    }
}

fn is_decimal(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

fn canonical(digits: &str) -> &str {
    match digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    }
}

/// Numeric order of two canonical decimal strings
fn compare_decimal(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Add one to a canonical decimal string
fn increment(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();

    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }

    format!("1{}", String::from_utf8_lossy(&bytes))
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start after the largest decimal id among `existing`
    ///
    /// Non-decimal ids are ignored; they can never collide with a decimal id.
    pub fn primed<'a, I>(existing: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sequence = Self::default();
        for id in existing.into_iter().filter(|id| is_decimal(id)) {
            let id = canonical(id);
            if compare_decimal(id, &sequence.last) == Ordering::Greater {
                sequence.last = id.to_string();
            }
        }
        sequence
    }

    /// Issue the next id given the current time in milliseconds
    pub fn next(&mut self, now_millis: u64) -> String {
        let now = now_millis.to_string();
        let bumped = increment(&self.last);

        self.last = match compare_decimal(&now, &bumped) {
            Ordering::Greater => now,
            _ => bumped,
        };
        self.last.clone()
    }
}
