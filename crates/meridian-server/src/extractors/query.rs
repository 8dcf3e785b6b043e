use serde::Deserialize;

/// Query parameters opcionales de los endpoints de config files.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFileQuery {
    #[serde(rename = "dataCenter")]
    pub data_center: Option<String>,
    pub ip: Option<String>,
    pub label: Option<String>,
}

impl ConfigFileQuery {
    /// Data center, con blancos tratados como ausentes.
    pub fn data_center(&self) -> Option<String> {
        non_blank(self.data_center.as_deref())
    }

    pub fn client_ip(&self) -> Option<String> {
        non_blank(self.ip.as_deref())
    }

    pub fn client_label(&self) -> Option<String> {
        non_blank(self.label.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_parameters_are_absent() {
        let query = ConfigFileQuery {
            data_center: Some("  ".to_string()),
            ip: Some(String::new()),
            label: None,
        };

        assert_eq!(query.data_center(), None);
        assert_eq!(query.client_ip(), None);
        assert_eq!(query.client_label(), None);
    }

    #[test]
    fn values_are_trimmed() {
        let query = ConfigFileQuery {
            data_center: Some(" dc1 ".to_string()),
            ip: Some("1.2.3.4".to_string()),
            label: Some("canary".to_string()),
        };

        assert_eq!(query.data_center(), Some("dc1".to_string()));
        assert_eq!(query.client_ip(), Some("1.2.3.4".to_string()));
        assert_eq!(query.client_label(), Some("canary".to_string()));
    }
}
