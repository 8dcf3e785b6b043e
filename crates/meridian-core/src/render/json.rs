//! JSON object rendering.

use std::collections::BTreeMap;

use crate::error::Result;

/// Convierte el mapa de configuracion a un objeto JSON compacto con los
/// miembros tal cual (valores string).
pub fn to_string(configurations: &BTreeMap<String, String>) -> Result<String> {
    Ok(serde_json::to_string(configurations)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_match_input_verbatim() {
        let mut configurations = BTreeMap::new();
        configurations.insert("a".to_string(), "1".to_string());
        configurations.insert("b".to_string(), "2".to_string());

        let body = to_string(&configurations).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(parsed, serde_json::json!({"a": "1", "b": "2"}));
    }

    #[test]
    fn values_stay_strings() {
        let mut configurations = BTreeMap::new();
        configurations.insert("port".to_string(), "8080".to_string());

        assert_eq!(to_string(&configurations).unwrap(), r#"{"port":"8080"}"#);
    }

    #[test]
    fn empty_map_renders_empty_object() {
        assert_eq!(to_string(&BTreeMap::new()).unwrap(), "{}");
    }
}
