//! Interactive menu
//!
//! Every action reports its own failure and returns to the menu, so a bad
//! email or a missing customer never ends the session.

use crate::commands::{confirm_customer_delete, show_customers, show_orders};
use clientbook::order::{parse_date, today};
use clientbook::ui::{self, Icons};
use clientbook::{Database, NewCustomer, NewOrder};
use dialoguer::{Input, Select};

pub fn run(db: &Database) -> anyhow::Result<()> {
    loop {
        ui::section("Customer & Order Management");
        let choice = Select::new()
            .with_prompt("Choose an option")
            .items(&["Manage customers", "Manage orders", "Exit"])
            .default(0)
            .interact()?;

        match choice {
            0 => customers_menu(db)?,
            1 => orders_menu(db)?,
            _ => {
                println!("Goodbye!");
                return Ok(());
            }
        }
    }
}

fn customers_menu(db: &Database) -> anyhow::Result<()> {
    loop {
        ui::section(&format!("{} Customers", Icons::PERSON));
        let choice = Select::new()
            .with_prompt("Choose an option")
            .items(&["Add customer", "List customers", "Update customer", "Delete customer", "Back"])
            .default(0)
            .interact()?;

        let outcome = match choice {
            0 => add_customer(db),
            1 => db.customers().list().map(|c| show_customers(&c)).map_err(Into::into),
            2 => update_customer(db),
            3 => delete_customer(db),
            _ => return Ok(()),
        };
        report(outcome);
    }
}

fn orders_menu(db: &Database) -> anyhow::Result<()> {
    loop {
        ui::section(&format!("{} Orders", Icons::PACKAGE));
        let choice = Select::new()
            .with_prompt("Choose an option")
            .items(&["Add order", "List all orders (with customers)", "Delete order", "Back"])
            .default(0)
            .interact()?;

        let outcome = match choice {
            0 => add_order(db),
            1 => db.orders().list_with_customer().map(|o| show_orders(&o)).map_err(Into::into),
            2 => delete_order(db),
            _ => return Ok(()),
        };
        report(outcome);
    }
}

fn report(outcome: anyhow::Result<()>) {
    if let Err(e) = outcome {
        ui::error(&e.to_string());
    }
}

fn prompt_text(prompt: &str, initial: Option<&str>) -> anyhow::Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }
    Ok(input.interact_text()?)
}

fn prompt_id(prompt: &str) -> anyhow::Result<i64> {
    Ok(Input::<i64>::new().with_prompt(prompt).interact_text()?)
}

fn add_customer(db: &Database) -> anyhow::Result<()> {
    let name = prompt_text("Customer name", None)?;
    let email = prompt_text("Customer email", None)?;
    let phone = prompt_text("Customer phone (optional)", None)?;

    let customer = NewCustomer::new(name, email, Some(phone));
    let id = db.customers().add(&customer)?;
    ui::success(&format!("Customer '{}' added (ID: {})", customer.name, id));
    Ok(())
}

fn update_customer(db: &Database) -> anyhow::Result<()> {
    let customers = db.customers().list()?;
    show_customers(&customers);
    if customers.is_empty() {
        return Ok(());
    }

    let id = prompt_id("ID of the customer to update")?;
    let Some(current) = db.customers().get(id)? else {
        ui::warn(&format!("Customer with ID {} not found", id));
        return Ok(());
    };

    let name = prompt_text("New name", Some(&current.name))?;
    let email = prompt_text("New email", Some(&current.email))?;
    let phone = prompt_text("New phone", current.phone.as_deref())?;

    if db.customers().update(id, &NewCustomer::new(name, email, Some(phone)))? {
        ui::success(&format!("Customer ID {} updated", id));
    } else {
        ui::warn(&format!("Customer with ID {} not found", id));
    }
    Ok(())
}

fn delete_customer(db: &Database) -> anyhow::Result<()> {
    let customers = db.customers().list()?;
    show_customers(&customers);
    if customers.is_empty() {
        return Ok(());
    }

    let id = prompt_id("ID of the customer to delete")?;
    if !confirm_customer_delete(id)? {
        ui::warn("Operation cancelled");
        return Ok(());
    }

    if db.customers().delete(id)? {
        ui::success(&format!("Customer ID {} (and their orders) deleted", id));
    } else {
        ui::warn(&format!("Customer with ID {} not found", id));
    }
    Ok(())
}

fn add_order(db: &Database) -> anyhow::Result<()> {
    println!("Select the customer for the order:");
    let customers = db.customers().list()?;
    show_customers(&customers);
    if customers.is_empty() {
        return Ok(());
    }

    let customer_id = prompt_id("Customer ID")?;
    let product = prompt_text("Product name", None)?;
    let amount = Input::<f64>::new()
        .with_prompt("Order amount (e.g. 49.90)")
        .interact_text()?;

    let default_date = today().to_string();
    let raw_date = Input::<String>::new()
        .with_prompt("Order date")
        .default(default_date)
        .interact_text()?;
    let date = parse_date(&raw_date)
        .map_err(|e| anyhow::anyhow!("Invalid date '{}': {}", raw_date, e))?;

    let order = NewOrder::new(customer_id, product, amount, Some(date));
    let id = db.orders().add(&order)?;
    ui::success(&format!("Order '{}' added (ID: {})", order.product, id));
    Ok(())
}

fn delete_order(db: &Database) -> anyhow::Result<()> {
    let orders = db.orders().list_with_customer()?;
    show_orders(&orders);
    if orders.is_empty() {
        return Ok(());
    }

    let id = prompt_id("ID of the order to delete")?;
    if db.orders().delete(id)? {
        ui::success(&format!("Order ID {} deleted", id));
    } else {
        ui::warn(&format!("Order with ID {} not found", id));
    }
    Ok(())
}
