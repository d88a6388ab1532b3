use super::product::{Product, ProductId};

/// Fractional digits needed to print any finite `f64` without rounding.
const EXACT_DIGITS: usize = 1074;

/// Formats an amount with two decimals, rounding the exact binary value of
/// `value`. Ties go to the larger magnitude, so `0.125` prints as `0.13` while
/// `0.015` (stored as `0.01499...`) prints as `0.01`.
fn two_decimals(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let fraction = fraction.as_bytes();

    let mut digits: Vec<u8> = whole.bytes().collect();
    digits.extend((0..2).map(|i| fraction.get(i).copied().unwrap_or(b'0')));
    if fraction.get(2).is_some_and(|d| *d >= b'5') {
        carry_one(&mut digits);
    }

    let (whole, cents) = digits.split_at(digits.len() - 2);
    let sign = if value < 0.0 { "-" } else { "" };
    format!(
        "{sign}{}.{}",
        whole.iter().copied().map(char::from).collect::<String>(),
        cents.iter().copied().map(char::from).collect::<String>()
    )
}

/// Adds one unit in the last place of a run of ASCII digits.
fn carry_one(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

fn money(value: f64) -> String {
    format!("${}", two_decimals(value))
}

/// One selected product on a bill.
#[derive(Debug, Clone, PartialEq)]
pub struct BillLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub subtotal: f64,
}

impl BillLine {
    /// Text shown for the line, e.g. `Pen - Quantity: 3 - Subtotal: $7.50`.
    pub fn text(&self) -> String {
        format!(
            "{} - Quantity: {} - Subtotal: {}",
            self.name,
            self.quantity,
            money(self.subtotal)
        )
    }
}

/// A bill derived from the current quantity selection. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bill {
    lines: Vec<BillLine>,
    total: f64,
}

impl Bill {
    /// Builds a bill from `(product, quantity)` pairs in display order.
    ///
    /// Entries with no quantity or a zero quantity are left off the bill, as are
    /// products whose price is not a number.
    pub fn from_selection<'a, I>(selection: I) -> Self
    where
        I: IntoIterator<Item = (&'a Product, Option<u32>)>,
    {
        let mut bill = Bill::default();
        for (product, quantity) in selection {
            let Some(quantity) = quantity.filter(|q| *q > 0) else {
                continue;
            };
            let Some(price) = product.price.amount() else {
                tracing::warn!(product_id = %product.id, price = %product.price, "Price is not a number, skipping bill line");
                continue;
            };
            let subtotal = price * f64::from(quantity);
            bill.total += subtotal;
            bill.lines.push(BillLine {
                product_id: product.id,
                name: product.name.clone(),
                quantity,
                subtotal,
            });
        }
        bill
    }

    pub fn lines(&self) -> &[BillLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Unrounded sum of the line subtotals.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Total as displayed, e.g. `$7.50`.
    pub fn total_text(&self) -> String {
        money(self.total)
    }
}
