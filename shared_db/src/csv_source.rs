//! Streams typed rows from a delimited file with a header line.

use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

use crate::error::SourceError;

/// Yields at most `limit` rows of `path` in file order. Columns not named by
/// `T` are ignored; a malformed row is yielded as an error and still counts
/// toward the limit.
pub fn stream<T: DeserializeOwned>(
  path: &Path,
  limit: usize,
) -> Result<impl Iterator<Item = Result<T, SourceError>>, SourceError> {
  let reader = csv::Reader::from_path(path).map_err(|source| SourceError::Open {
    path: path.to_path_buf(),
    source,
  })?;
  tracing::debug!(?path, limit, "streaming rows");
  return Ok(rows(reader, limit));
}

pub fn stream_from_reader<T: DeserializeOwned, R: Read>(
  reader: R,
  limit: usize,
) -> impl Iterator<Item = Result<T, SourceError>> {
  return rows(csv::Reader::from_reader(reader), limit);
}

fn rows<T: DeserializeOwned, R: Read>(
  reader: csv::Reader<R>,
  limit: usize,
) -> impl Iterator<Item = Result<T, SourceError>> {
  return reader
    .into_deserialize::<T>()
    .take(limit)
    .map(|row| row.map_err(SourceError::from));
}
