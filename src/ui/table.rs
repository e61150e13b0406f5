use tabled::{settings::Style, Table, Tabled};
use crate::{Customer, DbStats, OrderWithCustomer};

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Customer")]
    customer: String,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Table")]
    table: &'static str,
    #[tabled(rename = "Rows")]
    rows: usize,
}

/// Rounded table of customers; empty string when there are none
pub fn customers_table(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return String::new();
    }

    let rows: Vec<CustomerRow> = customers
        .iter()
        .map(|c| CustomerRow {
            id: c.id,
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone().unwrap_or_default(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Rounded table of orders with their customers; empty string when there are none
pub fn orders_table(orders: &[OrderWithCustomer]) -> String {
    if orders.is_empty() {
        return String::new();
    }

    let rows: Vec<OrderRow> = orders
        .iter()
        .map(|o| OrderRow {
            id: o.id,
            date: o.date.to_string(),
            product: o.product.clone(),
            amount: format!("{:.2}", o.amount),
            customer: format!("{} <{}>", o.customer_name, o.customer_email),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn stats_table(stats: &DbStats) -> String {
    let rows = [
        StatRow { table: "customers", rows: stats.customers },
        StatRow { table: "orders", rows: stats.orders },
    ];
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_tables_render_nothing() {
        assert!(customers_table(&[]).is_empty());
        assert!(orders_table(&[]).is_empty());
    }

    #[test]
    fn test_orders_table_shows_customer_and_amount() {
        let order = OrderWithCustomer {
            id: 1,
            customer_id: 1,
            product: "Widget".to_string(),
            amount: 49.9,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            customer_name: "Ana".to_string(),
            customer_email: "ana@x.com".to_string(),
        };

        let table = orders_table(&[order]);
        assert!(table.contains("49.90"));
        assert!(table.contains("2024-01-01"));
        assert!(table.contains("Ana <ana@x.com>"));
    }

    #[test]
    fn test_customers_table_blank_phone() {
        let customer = Customer {
            id: 3,
            name: "Bia".to_string(),
            email: "bia@x.com".to_string(),
            phone: None,
        };

        let table = customers_table(&[customer]);
        assert!(table.contains("bia@x.com"));
        assert!(table.contains("Phone"));
    }
}
