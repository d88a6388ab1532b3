/// Leading integer of `raw`, read the way a browser number input reads
/// partial text: surrounding whitespace is ignored, an optional sign is
/// accepted, and parsing stops at the first non-digit.
fn leading_integer(raw: &str) -> Option<i64> {
    let text = raw.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Quantity input attached to one product row.
///
/// Hidden until toggled. Holds 0 by default; `None` means the input holds
/// something that is not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantitySelector {
    visible: bool,
    value: Option<u32>,
}

impl Default for QuantitySelector {
    fn default() -> Self {
        Self {
            visible: false,
            value: Some(0),
        }
    }
}

impl QuantitySelector {
    /// Flips visibility and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set(&mut self, quantity: u32) {
        self.value = Some(quantity);
    }

    /// Stores raw input text. Negative or non-numeric text leaves the input unset,
    /// and so does a quantity above `u32::MAX`.
    pub fn set_input(&mut self, raw: &str) -> Option<u32> {
        self.value = leading_integer(raw).and_then(|v| u32::try_from(v).ok());
        self.value
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// Quantity to bill, if any.
    pub fn billable(&self) -> Option<u32> {
        self.value.filter(|q| *q > 0)
    }
}
