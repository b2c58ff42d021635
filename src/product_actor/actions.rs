//! Custom actions for the Product actor.

/// Stock operations beyond CRUD.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Adds units to stock, e.g. when a production run completes.
    Restock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckStock(u32),
    /// The stock level after the restock.
    Restock(u32),
}
