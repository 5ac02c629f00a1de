//! Loader for the clubs and competitions data files
//!
//! Both files share the same layout: a JSON object with an optional `schema_version` and one
//! array of flat records.
//!
//! ```json
//! { "schema_version": 1, "clubs": [{ "name": "Simply Lift", "email": "john@simplylift.co", "points": "13" }] }
//! { "schema_version": 1, "competitions": [{ "name": "Spring Festival", "date": "2030-03-27 10:00:00", "number_of_places": "25" }] }
//! ```
//!
//! Counts may be written either as JSON integers or as decimal strings. Every record is checked
//! before failing, so a single error lists all the problems in a file.

use std::{
    collections::HashSet,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use super::memory::MemoryDatabase;
use crate::domain::{Club, Competition, DATE_FORMAT};

/// Only supported version of the data files
pub const SCHEMA_VERSION: u64 = 1;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} has no {collection:?} array", .path.display())]
    MissingCollection {
        path: PathBuf,
        collection: &'static str,
    },

    #[error("{} uses schema version {found}, expected {}", .path.display(), SCHEMA_VERSION)]
    UnsupportedSchemaVersion { path: PathBuf, found: Value },

    #[error("{} has {} invalid record(s):{}", .path.display(), .errors.len(), RecordErrors(.errors))]
    InvalidRecords {
        path: PathBuf,
        errors: Vec<RecordError>,
    },
}

/// Problem with one record of a data file
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("record {index}: {reason}")]
pub struct RecordError {
    /// Position of the record in its array
    pub index: usize,
    pub reason: String,
}

struct RecordErrors<'a>(&'a [RecordError]);

impl fmt::Display for RecordErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in self.0 {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

/// A record type that can be read from a data file
pub trait Record: Sized {
    /// Name of the array holding the records
    const COLLECTION: &'static str;

    /// Shape of a record on disk
    type Raw: DeserializeOwned;

    fn validate(raw: Self::Raw) -> Result<Self, String>;

    /// Fields that must be unique across the collection, as `(field, value)` pairs
    fn unique_fields(&self) -> Vec<(&'static str, &str)>;
}

/// A count written as a JSON integer or as a decimal string
#[derive(Deserialize)]
#[serde(untagged)]
pub enum Count {
    Integer(i64),
    Text(String),
}

impl Count {
    fn coerce(self, field: &str) -> Result<u32, String> {
        let parsed = match &self {
            Count::Integer(value) => u32::try_from(*value).ok(),
            Count::Text(text) => text.parse::<u32>().ok(),
        };
        parsed.ok_or_else(|| format!("{field} must be a non-negative integer, got {self}"))
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Integer(value) => write!(f, "{value}"),
            Count::Text(text) => write!(f, "{text:?}"),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawClub {
    name: String,
    email: String,
    points: Count,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCompetition {
    name: String,
    date: String,
    number_of_places: Count,
}

fn non_empty(field: &str, value: String) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(value)
}

impl Record for Club {
    const COLLECTION: &'static str = "clubs";
    type Raw = RawClub;

    fn validate(raw: RawClub) -> Result<Self, String> {
        Ok(Club {
            name: non_empty("name", raw.name)?,
            email: non_empty("email", raw.email)?,
            points: raw.points.coerce("points")?,
        })
    }

    fn unique_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("name", self.name.as_str()), ("email", self.email.as_str())]
    }
}

impl Record for Competition {
    const COLLECTION: &'static str = "competitions";
    type Raw = RawCompetition;

    fn validate(raw: RawCompetition) -> Result<Self, String> {
        let date = NaiveDateTime::parse_from_str(&raw.date, DATE_FORMAT).map_err(|err| {
            format!(
                "date {:?} does not match \"{DATE_FORMAT}\": {err}",
                raw.date
            )
        })?;

        Ok(Competition {
            name: non_empty("name", raw.name)?,
            date,
            remaining_places: raw.number_of_places.coerce("number_of_places")?,
        })
    }

    fn unique_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("name", self.name.as_str())]
    }
}

/// Read and validate one collection from `path`
pub fn load<T: Record>(path: impl AsRef<Path>) -> Result<Vec<T>, LoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse(path, &contents)
}

/// Validate one collection from the contents of a data file
///
/// `path` is only used in error messages.
pub fn parse<T: Record>(path: impl AsRef<Path>, contents: &str) -> Result<Vec<T>, LoadError> {
    let path = path.as_ref();
    let document: Value = serde_json::from_str(contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(version) = document.get("schema_version") {
        if version.as_u64() != Some(SCHEMA_VERSION) {
            return Err(LoadError::UnsupportedSchemaVersion {
                path: path.to_path_buf(),
                found: version.clone(),
            });
        }
    }

    let raw_records = document
        .get(T::COLLECTION)
        .and_then(Value::as_array)
        .ok_or_else(|| LoadError::MissingCollection {
            path: path.to_path_buf(),
            collection: T::COLLECTION,
        })?;

    let mut records = Vec::with_capacity(raw_records.len());
    let mut errors = Vec::new();
    for (index, raw) in raw_records.iter().enumerate() {
        let record = serde_json::from_value::<T::Raw>(raw.clone())
            .map_err(|err| err.to_string())
            .and_then(T::validate);
        match record {
            Ok(record) => records.push((index, record)),
            Err(reason) => errors.push(RecordError { index, reason }),
        }
    }

    errors.extend(duplicates(&records));
    if !errors.is_empty() {
        errors.sort_by_key(|error| error.index);
        return Err(LoadError::InvalidRecords {
            path: path.to_path_buf(),
            errors,
        });
    }

    Ok(records.into_iter().map(|(_, record)| record).collect())
}

fn duplicates<T: Record>(records: &[(usize, T)]) -> Vec<RecordError> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();
    for (index, record) in records {
        for (field, value) in record.unique_fields() {
            if !seen.insert((field, value)) {
                errors.push(RecordError {
                    index: *index,
                    reason: format!("duplicate {field} {value:?}"),
                });
            }
        }
    }
    errors
}

/// Load both data files into a new [`MemoryDatabase`]
pub fn load_database(
    clubs_path: impl AsRef<Path>,
    competitions_path: impl AsRef<Path>,
) -> Result<MemoryDatabase, LoadError> {
    let clubs = load::<Club>(clubs_path)?;
    let competitions = load::<Competition>(competitions_path)?;

    tracing::info!(
        clubs = clubs.len(),
        competitions = competitions.len(),
        "data files loaded"
    );

    Ok(MemoryDatabase::new(clubs, competitions))
}
