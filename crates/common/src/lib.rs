//! Shared building blocks for the coffee service crates:
//! logging bootstrap, runtime directory checks and small response types.

pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn health_serializes_as_status_object() {
        let json = serde_json::to_value(types::Health::ok()).expect("serialize health");
        assert_eq!(json, serde_json::json!({ "status": "ok" }));
    }
}
