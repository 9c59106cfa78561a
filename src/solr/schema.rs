//! Core schema as an explicit field-descriptor map
//!
//! Discovered fields are looked up by name, never exposed as dynamic
//! attributes of the schema object.

use serde::Deserialize;
use std::collections::HashMap;

/// Descriptor of one schema field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Solr field type name
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether the field holds multiple values
    #[serde(rename = "multiValued", default)]
    pub multi_valued: bool,
    /// Whether the field is indexed
    #[serde(default)]
    pub indexed: bool,
    /// Whether the field is stored
    #[serde(default)]
    pub stored: bool,
}

/// Wire shape of a `/schema` response.
#[derive(Debug, Deserialize)]
pub(crate) struct SchemaResponse {
    schema: SchemaBody,
}

#[derive(Debug, Deserialize)]
struct SchemaBody {
    #[serde(default)]
    fields: Vec<FieldDescriptor>,
}

/// A core's schema: field descriptors keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct SolrSchema {
    fields: HashMap<String, FieldDescriptor>,
}

impl SolrSchema {
    pub(crate) fn from_response(resp: SchemaResponse) -> Self {
        let fields = resp
            .schema
            .fields
            .into_iter()
            .map(|f| (f.name.clone(), f))
            .collect();
        Self { fields }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Iterate over field names
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
