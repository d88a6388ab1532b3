use crate::domain::Bill;

/// The bill overlay. Each opening shows a freshly computed bill.
#[derive(Debug, Clone, Default)]
pub struct BillPopup {
    bill: Option<Bill>,
}

impl BillPopup {
    pub fn open(&mut self, bill: Bill) -> &Bill {
        self.bill.insert(bill)
    }

    pub fn close(&mut self) -> bool {
        self.bill.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.bill.is_some()
    }

    pub fn bill(&self) -> Option<&Bill> {
        self.bill.as_ref()
    }

    /// Lines as displayed, followed by the total.
    pub fn text(&self) -> Option<String> {
        self.bill.as_ref().map(|bill| {
            let mut out = String::new();
            for line in bill.lines() {
                out.push_str(&line.text());
                out.push('\n');
            }
            out.push_str("Total: ");
            out.push_str(&bill.total_text());
            out
        })
    }
}
