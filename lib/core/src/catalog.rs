use crate::{Error, Record, Result, Vector, Vectorizer};

/// Ordered records with one precomputed vector per record.
///
/// Read-only after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<Record>,
    vectors: Vec<Vector>,
    dim: usize,
}

impl Catalog {
    /// Assemble a catalog, enforcing the shape invariants: at least one
    /// record, one vector per record, every vector `dim` wide and finite.
    pub fn new(records: Vec<Record>, vectors: Vec<Vector>, dim: usize) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::Load("catalog is empty".to_string()));
        }
        if records.len() != vectors.len() {
            return Err(Error::Load(format!(
                "catalog has {} records but {} vectors",
                records.len(),
                vectors.len()
            )));
        }
        if let Some(bad) = vectors.iter().find(|v| v.dim() != dim) {
            return Err(Error::InvalidDimension {
                expected: dim,
                actual: bad.dim(),
            });
        }
        if let Some(index) = vectors
            .iter()
            .position(|v| v.as_slice().iter().any(|x| !x.is_finite()))
        {
            return Err(Error::Load(format!(
                "vector {} has non-finite components",
                index
            )));
        }

        Ok(Self { records, vectors, dim })
    }

    /// Fit a vectorizer over the records' indexed texts and vectorize each
    /// record with it. This is the offline build step.
    pub fn build(records: Vec<Record>) -> Result<(Vectorizer, Self)> {
        let vectorizer = Vectorizer::fit(records.iter().map(Record::indexed_text));
        let vectors = records
            .iter()
            .map(|r| vectorizer.transform(&r.indexed_text()))
            .collect();
        let catalog = Self::new(records, vectors, vectorizer.dim())?;
        Ok((vectorizer, catalog))
    }

    /// Record at `index`
    pub fn get(&self, index: usize) -> Result<&Record> {
        self.records.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn vectors(&self) -> &[Vector] {
        &self.vectors
    }
}
