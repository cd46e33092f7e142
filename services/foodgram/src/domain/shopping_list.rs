//! Shopping-list aggregation.
//!
//! Cart rows arrive in cart order, then recipe-ingredient order. Amounts are
//! summed per `(name, measurement_unit)` and lines keep first-encounter order.

use std::collections::HashMap;
use std::fmt;

/// One ingredient occurrence from a recipe in the user's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartIngredient {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// One consolidated shopping-list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}

impl fmt::Display for ShoppingListLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} {}", self.name, self.total, self.measurement_unit)
    }
}

/// Merge cart rows into one line per `(name, measurement_unit)`.
pub fn aggregate(rows: impl IntoIterator<Item = CartIngredient>) -> Vec<ShoppingListLine> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut lines: Vec<ShoppingListLine> = Vec::new();

    for row in rows {
        let key = (row.name, row.measurement_unit);
        match index.get(&key) {
            Some(&pos) => lines[pos].total += row.amount,
            None => {
                index.insert(key.clone(), lines.len());
                lines.push(ShoppingListLine {
                    name: key.0,
                    measurement_unit: key.1,
                    total: row.amount,
                });
            }
        }
    }
    lines
}

/// Render lines as the downloadable text body. Empty input yields an empty string.
pub fn render(lines: &[ShoppingListLine]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}
