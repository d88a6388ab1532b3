use std::fmt;

use crate::domain::ProductId;

/// Per-row actions, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    SelectQuantity,
    Edit,
    Delete,
}

impl RowAction {
    pub const ALL: [RowAction; 3] = [RowAction::SelectQuantity, RowAction::Edit, RowAction::Delete];

    pub fn label(&self) -> &'static str {
        match self {
            RowAction::SelectQuantity => "Select Item",
            RowAction::Edit => "Edit",
            RowAction::Delete => "Delete",
        }
    }
}

/// Cells of one product row as handed to a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCells {
    pub index: usize,
    pub product_id: ProductId,
    pub name: String,
    pub price: String,
    pub description: String,
    pub actions: [RowAction; 3],
}

/// Where the product table is drawn.
pub trait TableSurface {
    /// Removes every row drawn so far.
    fn clear_rows(&mut self);

    /// Appends one row below the existing ones.
    fn append_row(&mut self, row: &RowCells);
}

/// Plain-text table kept in memory and printed with [`fmt::Display`].
#[derive(Debug, Default, Clone)]
pub struct TextSurface {
    rows: Vec<RowCells>,
    clears: usize,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[RowCells] {
        &self.rows
    }

    /// How many times the table has been cleared.
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl TableSurface for TextSurface {
    fn clear_rows(&mut self) {
        self.rows.clear();
        self.clears += 1;
    }

    fn append_row(&mut self, row: &RowCells) {
        self.rows.push(row.clone());
    }
}

const HEADERS: [&str; 5] = ["ID", "Name", "Price", "Description", "Actions"];

fn write_line(f: &mut fmt::Formatter<'_>, line: &[&str], widths: &[usize]) -> fmt::Result {
    let padded: Vec<String> = line
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(f, "{}", padded.join("  ").trim_end())
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<[String; 5]> = self
            .rows
            .iter()
            .map(|row| {
                let actions = row.actions.iter().map(RowAction::label).collect::<Vec<_>>().join(" | ");
                [
                    row.product_id.to_string(),
                    row.name.clone(),
                    row.price.clone(),
                    row.description.clone(),
                    actions,
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for line in &cells {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_line(f, &HEADERS, &widths)?;
        for line in &cells {
            let refs: Vec<&str> = line.iter().map(String::as_str).collect();
            write_line(f, &refs, &widths)?;
        }
        Ok(())
    }
}
