//! Order repository

use rusqlite::params;
use crate::{Result, Error};
use crate::order::{NewOrder, OrderWithCustomer};
use super::sqlite::{constraint_violation, Constraint, Database};

/// CRUD operations against `orders`
pub struct OrderRepository<'a> {
    db: &'a Database,
}

impl<'a> OrderRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert an order and return its generated id.
    ///
    /// The owning customer must exist; the foreign key rejects anything else.
    pub fn add(&self, order: &NewOrder) -> Result<i64> {
        order.validate()?;

        let store = self.db.connect()?;
        let id = store
            .insert(
                "INSERT INTO orders (customer_id, product, amount, date) VALUES (?1, ?2, ?3, ?4)",
                params![order.customer_id, order.product, order.amount, order.effective_date()],
            )
            .map_err(|e| match constraint_violation(&e) {
                Some(Constraint::ForeignKey) => Error::CustomerNotFound(order.customer_id),
                _ => Error::Storage(e),
            })?;

        tracing::debug!("Added order {} for customer {}", id, order.customer_id);
        Ok(id)
    }

    /// All orders with their customer's name and email, newest first
    pub fn list_with_customer(&self) -> Result<Vec<OrderWithCustomer>> {
        let store = self.db.connect()?;
        let mut stmt = store.connection().prepare(
            r#"
            SELECT o.id, o.customer_id, o.product, o.amount, o.date, c.name, c.email
            FROM orders o
            JOIN customers c ON o.customer_id = c.id
            ORDER BY o.date DESC, o.id DESC
            "#,
        )?;

        let orders = stmt
            .query_map([], |row| {
                Ok(OrderWithCustomer {
                    id: row.get(0)?,
                    customer_id: row.get(1)?,
                    product: row.get(2)?,
                    amount: row.get(3)?,
                    date: row.get(4)?,
                    customer_name: row.get(5)?,
                    customer_email: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(orders)
    }

    /// Delete one order.
    ///
    /// Returns `false` when no order has this id.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let store = self.db.connect()?;
        let changed = store.execute("DELETE FROM orders WHERE id = ?1", [id])?;

        tracing::debug!("Delete order {}: {} row(s)", id, changed);
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::NewCustomer;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("book.db"));
        db.ensure_schema().unwrap();
        (dir, db)
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_end_to_end_with_cascade() {
        let (_dir, db) = setup();

        let ana = db
            .customers()
            .add(&NewCustomer::new("Ana", "ana@x.com", Some("111".to_string())))
            .unwrap();
        assert_eq!(ana, 1);

        let order = db
            .orders()
            .add(&NewOrder::new(ana, "Widget", 49.90, date(2024, 1, 1)))
            .unwrap();
        assert_eq!(order, 1);

        let listed = db.orders().list_with_customer().unwrap();
        assert_eq!(listed.len(), 1);
        let row = &listed[0];
        assert_eq!(row.id, 1);
        assert_eq!(row.product, "Widget");
        assert!((row.amount - 49.90).abs() < 1e-9);
        assert_eq!(row.date.to_string(), "2024-01-01");
        assert_eq!(row.customer_name, "Ana");
        assert_eq!(row.customer_email, "ana@x.com");

        assert!(db.customers().delete(ana).unwrap());
        assert!(db.orders().list_with_customer().unwrap().is_empty());
        assert_eq!(db.stats().unwrap().orders, 0);
    }

    #[test]
    fn test_cascade_only_removes_orders_of_deleted_customer() {
        let (_dir, db) = setup();
        let ana = db.customers().add(&NewCustomer::new("Ana", "ana@x.com", None)).unwrap();
        let bia = db.customers().add(&NewCustomer::new("Bia", "bia@x.com", None)).unwrap();

        db.orders().add(&NewOrder::new(ana, "Widget", 1.0, date(2024, 1, 1))).unwrap();
        db.orders().add(&NewOrder::new(ana, "Gadget", 2.0, date(2024, 1, 2))).unwrap();
        db.orders().add(&NewOrder::new(bia, "Gizmo", 3.0, date(2024, 1, 3))).unwrap();

        assert!(db.customers().delete(ana).unwrap());

        let remaining = db.orders().list_with_customer().unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|o| o.customer_id == bia));
    }

    #[test]
    fn test_order_for_missing_customer_is_rejected() {
        let (_dir, db) = setup();

        let err = db
            .orders()
            .add(&NewOrder::new(7, "Widget", 1.0, None))
            .unwrap_err();
        assert!(matches!(err, Error::CustomerNotFound(7)));
        assert_eq!(db.stats().unwrap().orders, 0);
    }

    #[test]
    fn test_five_digit_year_is_rejected_before_insert() {
        let (_dir, db) = setup();
        let ana = db.customers().add(&NewCustomer::new("Ana", "ana@x.com", None)).unwrap();

        db.orders().add(&NewOrder::new(ana, "Now", 1.0, date(2024, 1, 1))).unwrap();
        let err = db
            .orders()
            .add(&NewOrder::new(ana, "Far", 1.0, date(10000, 1, 1)))
            .unwrap_err();
        assert!(matches!(err, Error::DateOutOfRange(_)));

        let listed = db.orders().list_with_customer().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].product, "Now");
    }

    #[test]
    fn test_list_is_newest_first() {
        let (_dir, db) = setup();
        let ana = db.customers().add(&NewCustomer::new("Ana", "ana@x.com", None)).unwrap();

        db.orders().add(&NewOrder::new(ana, "Old", 1.0, date(2023, 12, 31))).unwrap();
        db.orders().add(&NewOrder::new(ana, "New", 1.0, date(2024, 3, 1))).unwrap();
        db.orders().add(&NewOrder::new(ana, "Mid", 1.0, date(2024, 1, 15))).unwrap();

        let listed = db.orders().list_with_customer().unwrap();
        let products: Vec<_> = listed.iter().map(|o| o.product.as_str()).collect();
        assert_eq!(products, ["New", "Mid", "Old"]);
        assert!(listed.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_date_defaults_to_today() {
        let (_dir, db) = setup();
        let ana = db.customers().add(&NewCustomer::new("Ana", "ana@x.com", None)).unwrap();

        let before = crate::order::today();
        db.orders().add(&NewOrder::new(ana, "Widget", 1.0, None)).unwrap();
        let listed = db.orders().list_with_customer().unwrap();
        assert!(listed[0].date >= before && listed[0].date <= crate::order::today());
    }

    #[test]
    fn test_delete_order() {
        let (_dir, db) = setup();
        let ana = db.customers().add(&NewCustomer::new("Ana", "ana@x.com", None)).unwrap();
        let id = db.orders().add(&NewOrder::new(ana, "Widget", 1.0, None)).unwrap();

        assert!(db.orders().delete(id).unwrap());
        assert!(!db.orders().delete(id).unwrap());
        assert!(db.orders().list_with_customer().unwrap().is_empty());
        // The customer survives its order
        assert!(db.customers().get(ana).unwrap().is_some());
    }
}
