//! Pedigree reference stores.
//!
//! The sire, dam and damsire tables are compiled-in JSON assets. They are
//! parsed once into a process-wide singleton and never mutated afterwards.
//! At startup each table can be replaced by a file named in configuration.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{error, info, warn};

use crate::breeding::normalize::normalize_name;
use crate::breeding::profiles::{
    DamProfile, DamsireProfile, PedigreeProfile, Role, SireProfile,
};
use crate::config::PedigreeConfig;
use crate::error::BreedingError;

/// Global store singleton
static STORES: OnceLock<PedigreeStores> = OnceLock::new();

const EMBEDDED_SIRES: &str = include_str!("../../data/pedigree/sires.json");
const EMBEDDED_DAMS: &str = include_str!("../../data/pedigree/dams.json");
const EMBEDDED_DAMSIRES: &str = include_str!("../../data/pedigree/damsires.json");

/// On-disk layout of a reference table.
#[derive(Debug, Deserialize)]
struct ReferenceFile<P> {
    version: String,
    #[serde(default)]
    description: String,
    entries: Vec<P>,
}

/// Keyed lookup table for one pedigree role.
#[derive(Debug, Clone)]
pub struct ReferenceStore<P> {
    version: String,
    description: String,
    entries: HashMap<String, P>,
}

impl<P: PedigreeProfile + DeserializeOwned> ReferenceStore<P> {
    /// Parse and validate a reference table.
    ///
    /// Every entry must have a non-empty name, a base score inside its
    /// tier's band, and a normalized name not shared with another entry.
    pub fn from_json(json: &str) -> Result<Self, BreedingError> {
        let file: ReferenceFile<P> = serde_json::from_str(json)
            .map_err(|source| BreedingError::InvalidData { role: P::ROLE, source })?;

        let mut entries = HashMap::with_capacity(file.entries.len());
        for profile in file.entries {
            let key = normalize_name(profile.name());
            if key.is_empty() {
                return Err(BreedingError::EmptyName { role: P::ROLE });
            }

            let band = P::ROLE.tier_band(profile.tier());
            if !band.contains(&profile.base_score()) {
                return Err(BreedingError::ScoreOutsideBand {
                    role: P::ROLE,
                    name: profile.name().to_string(),
                    tier: profile.tier().as_str(),
                    score: profile.base_score(),
                    min: *band.start(),
                    max: *band.end(),
                });
            }

            if entries.contains_key(&key) {
                return Err(BreedingError::DuplicateEntry { role: P::ROLE, name: key });
            }
            entries.insert(key, profile);
        }

        Ok(Self {
            version: file.version,
            description: file.description,
            entries,
        })
    }

    /// Load a reference table from a JSON file.
    pub fn from_file<Q: AsRef<Path>>(path: Q) -> Result<Self, BreedingError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| BreedingError::Io {
            role: P::ROLE,
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse a compiled-in table, falling back to an empty store so every
    /// lookup resolves to the unknown baseline.
    fn embedded(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(store) => store,
            Err(e) => {
                error!("Embedded {} table is invalid: {}, using empty store", P::ROLE, e);
                Self::empty()
            }
        }
    }
}

impl<P: PedigreeProfile> ReferenceStore<P> {
    pub fn empty() -> Self {
        Self {
            version: "empty".to_string(),
            description: String::new(),
            entries: HashMap::new(),
        }
    }

    /// Look up an individual by any spelling that normalizes to its key.
    pub fn get(&self, name: &str) -> Option<&P> {
        self.entries.get(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.entries.values()
    }

    /// Entry count for one role, grouped by tier.
    pub fn summary(&self) -> RoleSummary {
        let mut tiers = BTreeMap::new();
        for profile in self.entries.values() {
            *tiers.entry(profile.tier().as_str().to_string()).or_insert(0) += 1;
        }
        RoleSummary {
            version: self.version.clone(),
            entries: self.entries.len(),
            tiers,
        }
    }
}

/// The three role tables.
#[derive(Debug, Clone)]
pub struct PedigreeStores {
    pub sires: ReferenceStore<SireProfile>,
    pub dams: ReferenceStore<DamProfile>,
    pub damsires: ReferenceStore<DamsireProfile>,
}

impl PedigreeStores {
    /// Stores built from the compiled-in tables.
    pub fn embedded() -> Self {
        Self {
            sires: ReferenceStore::embedded(EMBEDDED_SIRES),
            dams: ReferenceStore::embedded(EMBEDDED_DAMS),
            damsires: ReferenceStore::embedded(EMBEDDED_DAMSIRES),
        }
    }

    /// Stores built from configured override files, using the embedded
    /// table for any role without one. Errors in a named file propagate.
    pub fn from_config(config: &PedigreeConfig) -> Result<Self, BreedingError> {
        let sires = match config.sires_file {
            Some(ref path) => ReferenceStore::from_file(path)?,
            None => ReferenceStore::embedded(EMBEDDED_SIRES),
        };
        let dams = match config.dams_file {
            Some(ref path) => ReferenceStore::from_file(path)?,
            None => ReferenceStore::embedded(EMBEDDED_DAMS),
        };
        let damsires = match config.damsires_file {
            Some(ref path) => ReferenceStore::from_file(path)?,
            None => ReferenceStore::embedded(EMBEDDED_DAMSIRES),
        };
        Ok(Self { sires, dams, damsires })
    }

    /// Profile for a name in one role's table.
    pub fn lookup(&self, role: Role, name: &str) -> Option<StoredProfile<'_>> {
        match role {
            Role::Sire => self.sires.get(name).map(StoredProfile::Sire),
            Role::Dam => self.dams.get(name).map(StoredProfile::Dam),
            Role::Damsire => self.damsires.get(name).map(StoredProfile::Damsire),
        }
    }

    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            sires: self.sires.summary(),
            dams: self.dams.summary(),
            damsires: self.damsires.summary(),
        }
    }
}

/// A profile from any of the three tables, tagged with its role.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum StoredProfile<'a> {
    Sire(&'a SireProfile),
    Dam(&'a DamProfile),
    Damsire(&'a DamsireProfile),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSummary {
    pub version: String,
    pub entries: usize,
    pub tiers: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSummary {
    pub sires: RoleSummary,
    pub dams: RoleSummary,
    pub damsires: RoleSummary,
}

/// Initialize the global stores from configuration.
///
/// Must run before the first call to [`stores`]; a second call keeps the
/// stores already in place.
pub fn load_stores(config: &PedigreeConfig) -> Result<&'static PedigreeStores, BreedingError> {
    if let Some(existing) = STORES.get() {
        warn!("Pedigree stores already initialized, ignoring reload");
        return Ok(existing);
    }

    let loaded = PedigreeStores::from_config(config)?;
    let stores = STORES.get_or_init(|| loaded);
    info!(
        "Loaded pedigree stores: {} sires, {} dams, {} damsires",
        stores.sires.len(),
        stores.dams.len(),
        stores.damsires.len()
    );
    Ok(stores)
}

/// Get the global stores (embedded tables unless [`load_stores`] ran first).
pub fn stores() -> &'static PedigreeStores {
    STORES.get_or_init(PedigreeStores::embedded)
}
