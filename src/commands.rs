use chrono::NaiveDate;
use clientbook::config::{self, ClientbookConfig};
use clientbook::output::{error_envelope, success_envelope, OutputMode};
use clientbook::ui::{self, Icons};
use clientbook::{Customer, Database, NewCustomer, NewOrder, OrderWithCustomer};
use dialoguer::Confirm;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

pub fn emit_success<T: Serialize>(output_mode: OutputMode, command: &str, data: &T) -> anyhow::Result<()> {
    if !output_mode.is_human() {
        println!("{}", serde_json::to_string_pretty(&success_envelope(command, data)?)?);
    }
    Ok(())
}

pub fn emit_error(output_mode: OutputMode, command: &str, err: &anyhow::Error) {
    if output_mode.is_human() {
        ui::error(&err.to_string());
    } else {
        println!("{}", error_envelope(command, &err.to_string()));
    }
}

pub fn run_init(
    output_mode: OutputMode,
    config_path: &Path,
    database: Option<PathBuf>,
    force: bool,
) -> anyhow::Result<()> {
    let db_path = database.unwrap_or_else(config::default_database_path);
    let cfg = ClientbookConfig {
        database: Some(db_path.to_string_lossy().to_string()),
    };
    config::write_config(config_path, &cfg, force)?;
    config::ensure_db_dir(&db_path)?;
    Database::new(&db_path).ensure_schema()?;

    if output_mode.is_human() {
        ui::success(&format!("Wrote {}", config_path.display()));
        ui::info("Database", &db_path.display().to_string());
    } else {
        emit_success(output_mode, "init", &json!({
            "config": config_path.display().to_string(),
            "database": db_path.display().to_string(),
        }))?;
    }
    Ok(())
}

// ========== Customers ==========

pub fn customer_add(
    db: &Database,
    output_mode: OutputMode,
    name: String,
    email: String,
    phone: Option<String>,
) -> anyhow::Result<()> {
    let customer = NewCustomer::new(name, email, phone);
    let id = db.customers().add(&customer)?;

    if output_mode.is_human() {
        ui::success(&format!("Customer '{}' added (ID: {})", customer.name, id));
    } else {
        emit_success(output_mode, "customer.add", &json!({ "id": id }))?;
    }
    Ok(())
}

pub fn customer_list(db: &Database, output_mode: OutputMode) -> anyhow::Result<()> {
    let customers = db.customers().list()?;

    if output_mode.is_human() {
        show_customers(&customers);
    } else {
        emit_success(output_mode, "customer.list", &customers)?;
    }
    Ok(())
}

pub fn customer_show(db: &Database, output_mode: OutputMode, id: i64) -> anyhow::Result<()> {
    let Some(customer) = db.customers().get(id)? else {
        anyhow::bail!("Customer with ID {} not found", id);
    };

    if output_mode.is_human() {
        println!("{} {}", Icons::PERSON, customer.name);
        ui::info("ID", &customer.id.to_string());
        ui::info("Email", &customer.email);
        ui::info("Phone", customer.phone.as_deref().unwrap_or("-"));
    } else {
        emit_success(output_mode, "customer.show", &customer)?;
    }
    Ok(())
}

pub fn customer_update(
    db: &Database,
    output_mode: OutputMode,
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
) -> anyhow::Result<()> {
    let updated = db.customers().update(id, &NewCustomer::new(name, email, phone))?;

    if output_mode.is_human() {
        if updated {
            ui::success(&format!("Customer ID {} updated", id));
        } else {
            ui::warn(&format!("Customer with ID {} not found", id));
        }
    } else {
        emit_success(output_mode, "customer.update", &json!({ "id": id, "updated": updated }))?;
    }
    Ok(())
}

pub fn customer_delete(db: &Database, output_mode: OutputMode, id: i64, yes: bool) -> anyhow::Result<()> {
    if !yes {
        if !console::Term::stderr().is_term() {
            anyhow::bail!("Refusing to delete customer {} without --yes", id);
        }
        if !confirm_customer_delete(id)? {
            if output_mode.is_human() {
                ui::warn("Operation cancelled");
            } else {
                emit_success(output_mode, "customer.delete", &delete_outcome(id, false, true))?;
            }
            return Ok(());
        }
    }

    let deleted = db.customers().delete(id)?;

    if output_mode.is_human() {
        if deleted {
            ui::success(&format!("Customer ID {} (and their orders) deleted", id));
        } else {
            ui::warn(&format!("Customer with ID {} not found", id));
        }
    } else {
        emit_success(output_mode, "customer.delete", &delete_outcome(id, deleted, false))?;
    }
    Ok(())
}

/// `data` of a `customer.delete` envelope
fn delete_outcome(id: i64, deleted: bool, cancelled: bool) -> serde_json::Value {
    if cancelled {
        json!({ "id": id, "deleted": false, "cancelled": true })
    } else {
        json!({ "id": id, "deleted": deleted })
    }
}

/// Ask before a delete that cascades to orders
pub fn confirm_customer_delete(id: i64) -> anyhow::Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(format!("Delete customer ID {} and all of their orders?", id))
        .default(false)
        .interact()?;
    Ok(confirmed)
}

pub fn show_customers(customers: &[Customer]) {
    if customers.is_empty() {
        println!("{} No customers registered.", Icons::EMPTY);
        return;
    }
    ui::section("Customers");
    println!("{}", ui::customers_table(customers));
}

// ========== Orders ==========

pub fn order_add(
    db: &Database,
    output_mode: OutputMode,
    customer_id: i64,
    product: String,
    amount: f64,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let order = NewOrder::new(customer_id, product, amount, date);
    let id = db.orders().add(&order)?;

    if output_mode.is_human() {
        ui::success(&format!("Order '{}' added (ID: {})", order.product, id));
    } else {
        emit_success(output_mode, "order.add", &json!({ "id": id }))?;
    }
    Ok(())
}

pub fn order_list(db: &Database, output_mode: OutputMode) -> anyhow::Result<()> {
    let orders = db.orders().list_with_customer()?;

    if output_mode.is_human() {
        show_orders(&orders);
    } else {
        emit_success(output_mode, "order.list", &orders)?;
    }
    Ok(())
}

pub fn order_delete(db: &Database, output_mode: OutputMode, id: i64) -> anyhow::Result<()> {
    let deleted = db.orders().delete(id)?;

    if output_mode.is_human() {
        if deleted {
            ui::success(&format!("Order ID {} deleted", id));
        } else {
            ui::warn(&format!("Order with ID {} not found", id));
        }
    } else {
        emit_success(output_mode, "order.delete", &json!({ "id": id, "deleted": deleted }))?;
    }
    Ok(())
}

pub fn show_orders(orders: &[OrderWithCustomer]) {
    if orders.is_empty() {
        println!("{} No orders registered.", Icons::EMPTY);
        return;
    }
    ui::section("Orders (with customers)");
    println!("{}", ui::orders_table(orders));
}

// ========== Stats ==========

pub fn run_stats(db: &Database, output_mode: OutputMode) -> anyhow::Result<()> {
    let stats = db.stats()?;

    if output_mode.is_human() {
        ui::header("Clientbook statistics");
        ui::info("Database", &db.path().display().to_string());
        println!("{}", ui::stats_table(&stats));
    } else {
        emit_success(output_mode, "stats", &stats)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_delete_reports_nothing_deleted() {
        let value = success_envelope("customer.delete", &delete_outcome(3, false, true)).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["data"]["id"], 3);
        assert_eq!(value["data"]["deleted"], false);
        assert_eq!(value["data"]["cancelled"], true);
    }

    #[test]
    fn test_confirmed_delete_has_no_cancelled_flag() {
        let value = delete_outcome(3, true, false);
        assert_eq!(value["deleted"], true);
        assert!(value.get("cancelled").is_none());
    }
}
