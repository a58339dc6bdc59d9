//! Schema Registry
//!
//! Entry point for boundary layers: resolves record names, validates payloads
//! of any kind, and publishes the JSON Schema contract with checksums.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::checksum::Checksum;
use crate::config::{ExportConfig, RegistryConfig};
use crate::error::{Result, ValidationError};
use crate::field::ParseMode;
use crate::schema::{EntityKind, Record, JSON_SCHEMA_DRAFT};

/// One record in the published contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub file: String,
    pub checksum: Checksum,
    /// Field summaries in declaration order, e.g. `dob: date`
    pub fields: Vec<String>,
}

/// Everything a client needs to pin the wire contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryManifest {
    /// Version of the crate that produced the contract
    pub version: Version,
    pub generated_at: DateTime<Utc>,
    pub draft: String,
    pub entities: Vec<ManifestEntry>,
    /// Checksum over all entity checksums, in manifest order
    pub manifest_checksum: Checksum,
}

impl RegistryManifest {
    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Check that every entry still matches the schemas compiled into this crate
    pub fn verify(&self) -> bool {
        let entries_match = self.entities.iter().all(|entry| {
            entry
                .name
                .parse::<EntityKind>()
                .map(|kind| kind.checksum() == entry.checksum)
                .unwrap_or(false)
        });
        entries_match
            && Checksum::combine(self.entities.iter().map(|e| &e.checksum)) == self.manifest_checksum
    }
}

/// The schema registry
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    mode: ParseMode,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ParseMode) -> Self {
        Self { mode }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::with_mode(config.parse.mode)
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// All registered record kinds
    pub fn kinds(&self) -> &'static [EntityKind] {
        &EntityKind::ALL
    }

    /// Resolve a record name
    pub fn lookup(&self, name: &str) -> Result<EntityKind> {
        name.parse()
    }

    /// Parse one payload with the registry's parse mode
    pub fn validate(&self, kind: EntityKind, value: &Value) -> std::result::Result<Record, ValidationError> {
        kind.parse(value, self.mode)
    }

    /// Parse a single object or every element of an array
    pub fn validate_batch(
        &self,
        kind: EntityKind,
        value: &Value,
    ) -> Vec<std::result::Result<Record, ValidationError>> {
        match value {
            Value::Array(items) => items.iter().map(|item| self.validate(kind, item)).collect(),
            single => vec![self.validate(kind, single)],
        }
    }

    pub fn manifest(&self) -> RegistryManifest {
        let entities: Vec<ManifestEntry> = EntityKind::ALL
            .iter()
            .map(|kind| ManifestEntry {
                name: kind.name().to_string(),
                file: kind.filename(),
                checksum: kind.checksum(),
                fields: kind.fields().iter().map(|f| f.summary()).collect(),
            })
            .collect();
        let manifest_checksum = Checksum::combine(entities.iter().map(|e| &e.checksum));

        RegistryManifest {
            version: Version::parse(env!("CARGO_PKG_VERSION")).unwrap_or_else(|_| Version::new(0, 0, 0)),
            generated_at: Utc::now(),
            draft: JSON_SCHEMA_DRAFT.to_string(),
            entities,
            manifest_checksum,
        }
    }

    /// Write the JSON Schema contract to `output_dir`
    ///
    /// Layout:
    /// ```text
    /// <output_dir>/
    /// ├── Appointment.schema.json
    /// ├── ...
    /// ├── manifest.json
    /// └── checksums.sha256
    /// ```
    pub fn export(&self, output_dir: impl AsRef<Path>, options: &ExportConfig) -> Result<RegistryManifest> {
        let output = output_dir.as_ref();
        fs::create_dir_all(output)?;

        for kind in EntityKind::ALL {
            let path = output.join(kind.filename());
            fs::write(&path, options.output_format.render(&kind.json_schema())?)?;
            tracing::debug!(entity = %kind, path = %path.display(), "schema written");
        }

        let manifest = self.manifest();

        if options.include_manifest {
            let content = options.output_format.render(&serde_json::to_value(&manifest)?)?;
            fs::write(output.join("manifest.json"), content)?;
        }

        if options.include_checksums {
            let checksums: String = manifest
                .entities
                .iter()
                .map(|e| format!("{}  {}\n", e.checksum, e.file))
                .collect();
            fs::write(output.join("checksums.sha256"), checksums)?;
        }

        tracing::info!(
            dir = %output.display(),
            entities = manifest.entities.len(),
            checksum = %manifest.manifest_checksum,
            "exported schema contract"
        );
        Ok(manifest)
    }
}
