use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where data is read from (pull) or written to (push)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataAddress {
    #[serde(rename = "type")]
    pub address_type: String,
    pub endpoint_type: String,
    pub endpoint: String,
    #[serde(default)]
    pub endpoint_properties: Vec<EndpointProperty>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EndpointProperty {
    #[serde(rename = "type")]
    pub property_type: String,
    pub name: String,
    pub value: String,
}

impl DataAddress {
    pub fn new(
        address_type: impl Into<String>,
        endpoint_type: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            address_type: address_type.into(),
            endpoint_type: endpoint_type.into(),
            endpoint: endpoint.into(),
            endpoint_properties: Vec::new(),
        }
    }

    pub fn with_property(
        mut self,
        property_type: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.endpoint_properties.push(EndpointProperty {
            property_type: property_type.into(),
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Look up an endpoint property value by name
    pub fn property(&self, name: &str) -> Option<&str> {
        self.endpoint_properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}
