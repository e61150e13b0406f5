use serde::Serialize;
use serde_json::{json, Value};

/// How command results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }

    pub fn is_human(self) -> bool {
        self == Self::Human
    }
}

/// `{"ok": true, "command": ..., "data": ...}`
pub fn success_envelope<T: Serialize>(command: &str, data: &T) -> serde_json::Result<Value> {
    Ok(json!({
        "ok": true,
        "command": command,
        "data": serde_json::to_value(data)?,
    }))
}

/// `{"ok": false, "command": ..., "error": ...}`
pub fn error_envelope(command: &str, message: &str) -> Value {
    json!({
        "ok": false,
        "command": command,
        "error": message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Customer, OrderWithCustomer};
    use chrono::NaiveDate;

    #[test]
    fn test_success_envelope_wraps_data() {
        let customer = Customer {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            phone: None,
        };
        let value = success_envelope("customer.show", &customer).unwrap();

        assert_eq!(value["ok"], true);
        assert_eq!(value["command"], "customer.show");
        assert_eq!(value["data"]["email"], "ana@x.com");
        assert!(value["data"]["phone"].is_null());
    }

    #[test]
    fn test_order_dates_serialize_as_iso_text() {
        let order = OrderWithCustomer {
            id: 1,
            customer_id: 1,
            product: "Widget".to_string(),
            amount: 49.9,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            customer_name: "Ana".to_string(),
            customer_email: "ana@x.com".to_string(),
        };
        let value = success_envelope("order.list", &vec![order]).unwrap();

        assert_eq!(value["data"][0]["date"], "2024-01-01");
        assert_eq!(value["data"][0]["customer_name"], "Ana");
    }

    #[test]
    fn test_error_envelope() {
        let value = error_envelope("order.add", "Customer with ID 7 not found");
        assert_eq!(value["ok"], false);
        assert_eq!(value["error"], "Customer with ID 7 not found");
    }
}
