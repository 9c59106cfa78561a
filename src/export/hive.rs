//! Hive table metadata CSV export
//!
//! Exports every Hive table entity with its business metadata: name,
//! description, tags, custom properties (`up_*` fields, `CM.` columns) and
//! managed properties from the catalog's property model (`MM.` columns).
//! Tables carrying no metadata at all are left out of the file.

use crate::error::{Error, Result};
use crate::solr::{Query, SolrServer};
use crate::types::JsonValue;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Model class holding managed Hive table properties.
const MODEL_CLASS: &str = "hv_table";

/// Identity columns present on every exported row.
const BASE_FIELDS: [&str; 4] = ["sourceType", "type", "parentPath", "originalName"];

/// Business metadata columns; a row is exported only if at least one of
/// these (or a custom/managed property) is non-empty.
const DETAIL_FIELDS: [&str; 3] = ["name", "description", "tags"];

/// One managed property descriptor from the catalog's property model.
#[derive(Debug, Clone, Deserialize)]
struct PropertyDescriptor {
    #[serde(rename = "type")]
    property_type: String,
    namespace: String,
    name: String,
}

impl PropertyDescriptor {
    /// `type.namespace.name`, the exported column suffix
    fn full_name(&self) -> String {
        format!("{}.{}.{}", self.property_type, self.namespace, self.name)
    }

    /// `namespace.name`, the document field the value lives in
    fn field_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

/// Outcome of a metadata export.
#[derive(Debug, Clone)]
pub struct HiveMetadataExport {
    /// Header row that was written
    pub headers: Vec<String>,
    /// Data rows written (excluded all-empty records don't count)
    pub rows_written: u64,
}

/// Export Hive table metadata to CSV.
///
/// Scans `sourceType:HIVE AND type:TABLE` entities (optionally restricted
/// to one database), one row per table that carries any metadata, with
/// empty fields rendered as empty strings. The writer is flushed before
/// returning and closed on every exit path.
pub async fn export_hive_table_metadata(
    server: &SolrServer,
    database: Option<&str>,
    path: &Path,
) -> Result<HiveMetadataExport> {
    let managed = fetch_managed_properties(server).await?;
    let custom_keys = collect_custom_property_keys(server).await?;

    let mut headers: Vec<String> = BASE_FIELDS.iter().map(ToString::to_string).collect();
    headers.extend(DETAIL_FIELDS.iter().map(ToString::to_string));
    headers.extend(custom_keys.iter().map(|k| format!("CM.{}", &k["up_".len()..])));
    headers.extend(managed.iter().map(|p| format!("MM.{}", p.full_name())));

    let managed_fields: Vec<String> = managed.iter().map(PropertyDescriptor::field_name).collect();
    let mut fl: Vec<String> = BASE_FIELDS.iter().map(ToString::to_string).collect();
    fl.extend(DETAIL_FIELDS.iter().map(ToString::to_string));
    fl.extend(custom_keys.iter().cloned());
    fl.extend(managed_fields.iter().cloned());

    let q = match database {
        Some(db) => format!("sourceType:HIVE AND type:TABLE AND parentPath:\"/{db}\""),
        None => "sourceType:HIVE AND type:TABLE".to_string(),
    };

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&headers)?;

    let mut scan = server
        .elements()
        .scan(Query::new().q(q).fl(fl.join(",")))?;

    let mut rows_written = 0u64;
    while let Some(doc) = scan.next_doc().await? {
        let mut record = Vec::with_capacity(headers.len());
        for field in BASE_FIELDS {
            let value = doc
                .get(field)
                .ok_or_else(|| Error::missing_field(field.to_string()))?;
            record.push(render_value(value));
        }

        let details: Vec<String> = DETAIL_FIELDS
            .iter()
            .map(|f| doc.get(*f).map(render_value).unwrap_or_default())
            .collect();
        let custom: Vec<String> = custom_keys
            .iter()
            .map(|k| doc.get(k).map(render_value).unwrap_or_default())
            .collect();
        let managed_values: Vec<String> = managed_fields
            .iter()
            .map(|f| doc.get(f).map(render_value).unwrap_or_default())
            .collect();

        let has_metadata = details.iter().any(|v| !v.is_empty())
            || custom.iter().any(|v| !v.is_empty())
            || managed_values.iter().any(|v| !v.is_empty());
        if !has_metadata {
            continue;
        }

        record.extend(details);
        record.extend(custom);
        record.extend(managed_values);
        writer.write_record(&record)?;
        rows_written += 1;
    }

    writer.flush()?;
    info!("Exported {} Hive table metadata rows", rows_written);

    Ok(HiveMetadataExport {
        headers,
        rows_written,
    })
}

/// Fetch managed property descriptors for the Hive table model class.
async fn fetch_managed_properties(server: &SolrServer) -> Result<Vec<PropertyDescriptor>> {
    let url = format!(
        "{}/models/packages/nav/classes/{MODEL_CLASS}/properties",
        server.client().api_url(9)
    );
    server.client().get_json(&url, &Vec::new()).await
}

/// Collect every custom property key (`up_*` field) present on any Hive
/// table entity, in first-seen order.
async fn collect_custom_property_keys(server: &SolrServer) -> Result<Vec<String>> {
    let mut scan = server
        .elements()
        .scan(Query::new().q("sourceType:HIVE AND type:TABLE").fl("up_*"))?;

    let mut keys = Vec::new();
    while let Some(doc) = scan.next_doc().await? {
        for key in doc.keys() {
            if key.starts_with("up_") && !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    Ok(keys)
}

/// Render a document value for CSV: strings pass through, multi-valued
/// fields join with commas, missing/null renders empty.
pub(crate) fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
