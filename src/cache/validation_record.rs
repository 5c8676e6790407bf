
/// Key of a cached validation outcome: one record per (identity, token).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub identity: i64,
    pub token: String,
}

impl RecordKey {
    pub fn new(identity: i64, token: impl Into<String>) -> Self {
        Self { identity, token: token.into() }
    }
}

/// Validation outcome persisted by a record store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRecord {
    pub key: RecordKey,
    pub validated: bool,
}

impl ValidationRecord {
    pub fn new(key: RecordKey, validated: bool) -> Self {
        Self { key, validated }
    }
}
