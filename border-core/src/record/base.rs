//! Base implementation of records.
use crate::error::LrrError;
use std::collections::{hash_map::Keys, HashMap};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, like a reward.
    Scalar(f32),

    /// A 1-dimensional array of floating-point values, like joint targets.
    Array1(Vec<f32>),

    /// A text value.
    String(String),
}

/// A container for storing key-value pairs of various data types.
#[derive(Debug, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// Values of `record` overwrite values of `self` with the same key.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges another record into this one in place.
    pub fn merge_inplace(&mut self, record: Record) {
        self.0.extend(record.0);
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f32, LrrError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(LrrError::RecordValueTypeError("Scalar".to_string())),
            None => Err(LrrError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array from the record.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, LrrError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(LrrError::RecordValueTypeError("Array1".to_string())),
            None => Err(LrrError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, LrrError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(LrrError::RecordValueTypeError("String".to_string())),
            None => Err(LrrError::RecordKeyError(k.to_string())),
        }
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordValue};
    use crate::error::LrrError;

    #[test]
    fn test_typed_getters() {
        let record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(1.5)),
            ("act", RecordValue::Array1(vec![0.0, 1.0])),
            ("task", RecordValue::String("FlatTerrainTask".to_string())),
        ]);

        assert_eq!(record.get_scalar("reward").unwrap(), 1.5);
        assert_eq!(record.get_array1("act").unwrap(), vec![0.0, 1.0]);
        assert_eq!(record.get_string("task").unwrap(), "FlatTerrainTask");
        assert!(matches!(
            record.get_scalar("act"),
            Err(LrrError::RecordValueTypeError(_))
        ));
        assert!(matches!(
            record.get_scalar("missing"),
            Err(LrrError::RecordKeyError(_))
        ));
    }

    #[test]
    fn test_merge_overwrites() {
        let mut record = Record::from_scalar("reward", 1.0);
        record.merge_inplace(Record::from_scalar("reward", 2.0));
        assert_eq!(record.get_scalar("reward").unwrap(), 2.0);

        let record = record.merge(Record::from_scalar("length", 3.0));
        assert_eq!(record.keys().count(), 2);
        assert!(!record.is_empty());
        assert!(Record::empty().is_empty());
    }
}
