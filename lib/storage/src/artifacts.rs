// On-disk catalog artifacts: vectorizer, vector matrix and record table,
// bincode-encoded, plus a JSON manifest with SHA-256 checksums.
use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{SecondsFormat, Utc};
use organix_core::{Catalog, Error, Record, Result, Vector, Vectorizer};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const VECTORIZER_FILE: &str = "vectorizer.bin";
pub const VECTORS_FILE: &str = "vectors.bin";
pub const RECORDS_FILE: &str = "records.bin";
pub const MANIFEST_FILE: &str = "manifest.json";

pub const FORMAT_VERSION: u32 = 1;

/// Describes an artifact directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    pub format_version: u32,
    pub created_at: String,
    pub records: usize,
    pub dimension: usize,
    /// file name -> sha256 hex digest
    pub checksums: BTreeMap<String, String>,
}

/// Reads and writes the three catalog artifacts in one directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Write all artifacts and the manifest. Each file is replaced atomically.
    pub fn save(&self, vectorizer: &Vectorizer, catalog: &Catalog) -> Result<Manifest> {
        fs::create_dir_all(&self.dir)?;

        let vectors: Vec<&[f32]> = catalog.vectors().iter().map(Vector::as_slice).collect();
        let files = [
            (VECTORIZER_FILE, encode(vectorizer)?),
            (VECTORS_FILE, encode(&vectors)?),
            (RECORDS_FILE, encode(&catalog.records())?),
        ];

        let mut checksums = BTreeMap::new();
        for (name, bytes) in &files {
            write_atomic(&self.path(name), bytes)?;
            checksums.insert((*name).to_string(), sha256_hex(bytes));
        }

        let manifest = Manifest {
            format_version: FORMAT_VERSION,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            records: catalog.len(),
            dimension: vectorizer.dim(),
            checksums,
        };
        let json = serde_json::to_vec_pretty(&manifest)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        write_atomic(&self.path(MANIFEST_FILE), &json)?;

        tracing::info!(
            dir = %self.dir.display(),
            records = manifest.records,
            dimension = manifest.dimension,
            "catalog artifacts written"
        );
        Ok(manifest)
    }

    /// Read the manifest if the directory has one
    pub fn manifest(&self) -> Result<Option<Manifest>> {
        let path = self.path(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)
            .map_err(|e| Error::Load(format!("cannot read {}: {}", path.display(), e)))?;
        let manifest = serde_json::from_slice(&bytes)
            .map_err(|e| Error::Load(format!("corrupt manifest {}: {}", path.display(), e)))?;
        Ok(Some(manifest))
    }

    /// Load and cross-check the artifacts. Every failure is reported as
    /// [`Error::Load`].
    pub fn load(&self) -> Result<(Vectorizer, Catalog)> {
        let manifest = self.manifest()?;
        if let Some(m) = &manifest {
            if m.format_version != FORMAT_VERSION {
                return Err(Error::Load(format!(
                    "unsupported artifact format version {} (expected {})",
                    m.format_version, FORMAT_VERSION
                )));
            }
        } else {
            tracing::warn!(dir = %self.dir.display(), "no manifest found, skipping checksum verification");
        }

        let vectorizer: Vectorizer = self.read_artifact(VECTORIZER_FILE, manifest.as_ref())?;
        vectorizer.validate()?;
        let vectors: Vec<Vec<f32>> = self.read_artifact(VECTORS_FILE, manifest.as_ref())?;
        let records: Vec<Record> = self.read_artifact(RECORDS_FILE, manifest.as_ref())?;

        if let Some(m) = &manifest {
            if m.records != records.len() || m.dimension != vectorizer.dim() {
                return Err(Error::Load(format!(
                    "manifest describes {} records of dimension {}, found {} records of dimension {}",
                    m.records,
                    m.dimension,
                    records.len(),
                    vectorizer.dim()
                )));
            }
        }

        let vectors = vectors.into_iter().map(Vector::new).collect();
        let catalog = Catalog::new(records, vectors, vectorizer.dim()).map_err(|e| match e {
            Error::Load(msg) => Error::Load(msg),
            other => Error::Load(other.to_string()),
        })?;

        tracing::info!(
            dir = %self.dir.display(),
            records = catalog.len(),
            dimension = catalog.dim(),
            "catalog artifacts loaded"
        );
        Ok((vectorizer, catalog))
    }

    fn read_artifact<T>(&self, name: &str, manifest: Option<&Manifest>) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let path = self.path(name);
        let bytes = fs::read(&path)
            .map_err(|e| Error::Load(format!("cannot read {}: {}", path.display(), e)))?;

        if let Some(expected) = manifest.and_then(|m| m.checksums.get(name)) {
            let actual = sha256_hex(&bytes);
            if &actual != expected {
                return Err(Error::Load(format!(
                    "checksum mismatch for {}: expected {}, got {}",
                    name, expected, actual
                )));
            }
        }

        bincode::deserialize(&bytes)
            .map_err(|e| Error::Load(format!("corrupt artifact {}: {}", path.display(), e)))
    }
}

/// Read a JSON array of records (the input of the offline build)
pub fn read_records_json<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::Serialization(format!("{}: {}", path.display(), e)))
}

/// Fit a catalog over `records` and write it to `store`
pub fn build_artifacts(store: &ArtifactStore, records: Vec<Record>) -> Result<Manifest> {
    let (vectorizer, catalog) = Catalog::build(records)?;
    store.save(&vectorizer, &catalog)
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| Error::Serialization(e.to_string()))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(bytes))
        .map_err(|e| Error::Io(std::io::Error::other(format!("{}: {}", path.display(), e))))
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
