//! Canned report statements and the query dispatcher.
//!
//! Maps a UI-selected report kind plus a selected customer name to a literal
//! SQL string. Customer names are embedded as SQL string literals, so
//! apostrophes are escaped by doubling per SQL quoting rules.

use crate::error::{DashResult, DashboardError};
use serde::Deserialize;

/// Sample statement shown in (and defaulted for) the custom SQL editor.
pub const SAMPLE_CUSTOM_SQL: &str = "SELECT * FROM Customer LIMIT 5;";

/// The four report modes the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// One customer's order line items
    CustomerOrders,
    /// One customer's total ordered value
    CustomerTotal,
    /// Total ordered value per customer, across all customers
    AllCustomerTotals,
    /// Free-form SQL supplied by the user
    Custom,
}

impl ReportKind {
    /// Human-readable label, matching the selection control.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CustomerOrders => "Customer orders",
            Self::CustomerTotal => "Customer total",
            Self::AllCustomerTotals => "All customers total",
            Self::Custom => "Custom SQL",
        }
    }
}

/// Escape a string for embedding in a single-quoted SQL literal.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Statement listing one customer's order line items.
pub fn customer_orders_sql(customer: &str) -> String {
    format!(
        "SELECT od.OrderID, od.OrderDate, p.ProductName, od.QuantityOrdered, p.ProductUnitPrice\n\
         FROM OrderDetail od\n\
         JOIN Customer c ON c.CustomerID = od.CustomerID\n\
         JOIN Product p ON p.ProductID = od.ProductID\n\
         WHERE c.FirstName || ' ' || c.LastName = {}\n\
         ORDER BY od.OrderDate, od.OrderID;",
        quote_literal(customer)
    )
}

/// Statement computing one customer's total ordered value.
pub fn customer_total_sql(customer: &str) -> String {
    format!(
        "SELECT c.FirstName || ' ' || c.LastName AS Name,\n\
         \x20      SUM(od.QuantityOrdered * p.ProductUnitPrice) AS TotalOrdered\n\
         FROM OrderDetail od\n\
         JOIN Customer c ON c.CustomerID = od.CustomerID\n\
         JOIN Product p ON p.ProductID = od.ProductID\n\
         WHERE c.FirstName || ' ' || c.LastName = {}\n\
         GROUP BY c.CustomerID;",
        quote_literal(customer)
    )
}

/// Statement computing total ordered value per customer.
///
/// Independent of any selection: it always covers all customers.
pub fn all_customer_totals_sql() -> String {
    "SELECT c.FirstName || ' ' || c.LastName AS Name,\n\
     \x20      SUM(od.QuantityOrdered * p.ProductUnitPrice) AS TotalOrdered\n\
     FROM OrderDetail od\n\
     JOIN Customer c ON c.CustomerID = od.CustomerID\n\
     JOIN Product p ON p.ProductID = od.ProductID\n\
     GROUP BY c.CustomerID\n\
     ORDER BY TotalOrdered DESC;"
        .to_string()
}

/// Produce the SQL text for a report request.
///
/// Customer-scoped kinds require a customer name. Custom mode passes the
/// user's text through verbatim, falling back to [`SAMPLE_CUSTOM_SQL`] when
/// the text is empty or whitespace.
pub fn dispatch(
    kind: ReportKind,
    customer: Option<&str>,
    custom_sql: Option<&str>,
) -> DashResult<String> {
    match kind {
        ReportKind::CustomerOrders => Ok(customer_orders_sql(require_customer(customer)?)),
        ReportKind::CustomerTotal => Ok(customer_total_sql(require_customer(customer)?)),
        ReportKind::AllCustomerTotals => Ok(all_customer_totals_sql()),
        ReportKind::Custom => match custom_sql {
            Some(sql) if !sql.trim().is_empty() => Ok(sql.to_string()),
            _ => Ok(SAMPLE_CUSTOM_SQL.to_string()),
        },
    }
}

fn require_customer(customer: Option<&str>) -> DashResult<&str> {
    customer
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DashboardError::invalid_input("Select a customer for this report"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_sql_contains_name_literal() {
        let sql = customer_orders_sql("Ada Lovelace");
        assert!(sql.contains("'Ada Lovelace'"));
    }

    #[test]
    fn test_total_sql_contains_name_literal() {
        let sql = customer_total_sql("Ada Lovelace");
        assert!(sql.contains("'Ada Lovelace'"));
    }

    #[test]
    fn test_apostrophe_in_name_is_escaped() {
        let sql = customer_orders_sql("Miles O'Brien");
        assert!(sql.contains("'Miles O''Brien'"));
        // the raw unescaped literal must not appear
        assert!(!sql.contains("'Miles O'Brien'"));

        let sql = customer_total_sql("Miles O'Brien");
        assert!(sql.contains("'Miles O''Brien'"));
    }

    #[test]
    fn test_all_totals_independent_of_selection() {
        let a = dispatch(ReportKind::AllCustomerTotals, Some("Ada Lovelace"), None).unwrap();
        let b = dispatch(ReportKind::AllCustomerTotals, Some("Miles O'Brien"), None).unwrap();
        let c = dispatch(ReportKind::AllCustomerTotals, None, None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_custom_passes_text_verbatim() {
        let sql = dispatch(
            ReportKind::Custom,
            None,
            Some("SELECT COUNT(*) FROM Product"),
        )
        .unwrap();
        assert_eq!(sql, "SELECT COUNT(*) FROM Product");
    }

    #[test]
    fn test_custom_defaults_to_sample_when_empty() {
        assert_eq!(
            dispatch(ReportKind::Custom, None, None).unwrap(),
            SAMPLE_CUSTOM_SQL
        );
        assert_eq!(
            dispatch(ReportKind::Custom, None, Some("   \n")).unwrap(),
            SAMPLE_CUSTOM_SQL
        );
    }

    #[test]
    fn test_customer_required_for_scoped_reports() {
        assert!(dispatch(ReportKind::CustomerOrders, None, None).is_err());
        assert!(dispatch(ReportKind::CustomerTotal, Some("  "), None).is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(ReportKind::Custom.label(), "Custom SQL");
        assert_eq!(ReportKind::AllCustomerTotals.label(), "All customers total");
    }
}
