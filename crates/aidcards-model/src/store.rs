//! JSON collection storage: one pretty-printed array per file.
//!
//! Files are the interface between conversion and validation. Writes replace
//! the whole file through a temp file and rename; reads distinguish a missing
//! file (reported by callers) from an unreadable one (an error).

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// The six published collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    PolicyCards,
    Provinces,
    SourceSites,
    Glossary,
    Faqs,
    Changelog,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::PolicyCards,
        Collection::Provinces,
        Collection::SourceSites,
        Collection::Glossary,
        Collection::Faqs,
        Collection::Changelog,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::PolicyCards => "policycards.json",
            Self::Provinces => "provinces.json",
            Self::SourceSites => "sourcesites.json",
            Self::Glossary => "glossary.json",
            Self::Faqs => "faqs.json",
            Self::Changelog => "changelog.json",
        }
    }

    /// Short label used in reports and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::PolicyCards => "policycards",
            Self::Provinces => "provinces",
            Self::SourceSites => "sourcesites",
            Self::Glossary => "glossary",
            Self::Faqs => "faqs",
            Self::Changelog => "changelog",
        }
    }

    pub fn path_in(self, data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir.as_ref().join(self.file_name())
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors from collection reads and writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a collection as raw JSON. `Ok(None)` when the file does not exist.
pub fn read_collection_value(
    data_dir: impl AsRef<Path>,
    collection: Collection,
) -> Result<Option<Value>, StoreError> {
    let path = collection.path_in(data_dir);
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(&path).map_err(|source| StoreError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let value = serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(value))
}

/// Read a collection into typed records. `Ok(None)` when the file does not exist.
pub fn read_collection<T>(
    data_dir: impl AsRef<Path>,
    collection: Collection,
) -> Result<Option<Vec<T>>, StoreError>
where
    T: DeserializeOwned,
{
    let path = collection.path_in(&data_dir);
    let Some(value) = read_collection_value(&data_dir, collection)? else {
        return Ok(None);
    };
    let records = serde_json::from_value(value).map_err(|source| StoreError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(records))
}

/// Render records the way every collection file is written: 2-space
/// indentation, non-ASCII left literal, trailing newline.
pub fn render_collection<T: Serialize>(records: &[T]) -> Result<String, serde_json::Error> {
    let mut rendered = serde_json::to_string_pretty(records)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Replace a collection file with `records`, creating the directory if needed.
pub fn write_collection<T: Serialize>(
    data_dir: impl AsRef<Path>,
    collection: Collection,
    records: &[T],
) -> Result<PathBuf, StoreError> {
    let data_dir = data_dir.as_ref();
    let path = collection.path_in(data_dir);
    let rendered = render_collection(records).map_err(|source| StoreError::Serialize {
        path: path.display().to_string(),
        source,
    })?;

    fs::create_dir_all(data_dir).map_err(|source| StoreError::Write {
        path: data_dir.display().to_string(),
        source,
    })?;

    let tmp_path = tmp_write_path(&path);
    let write_result = (|| -> std::io::Result<()> {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(rendered.as_bytes())?;
        writer.flush()?;
        Ok(())
    })();

    if let Err(source) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Write {
            path: tmp_path.display().to_string(),
            source,
        });
    }

    fs::rename(&tmp_path, &path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        StoreError::Write {
            path: path.display().to_string(),
            source,
        }
    })?;

    tracing::debug!(
        collection = collection.label(),
        records = records.len(),
        path = %path.display(),
        "wrote collection"
    );
    Ok(path)
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Faq;

    fn temp_dir(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "aidcards-store-{prefix}-{}-{unique}",
            std::process::id()
        ))
    }

    #[test]
    fn missing_collection_reads_as_none() {
        let dir = temp_dir("missing");
        let value = read_collection_value(&dir, Collection::Faqs).expect("read should not fail");
        assert!(value.is_none());
    }

    #[test]
    fn write_creates_directory_and_keeps_non_ascii_literal() {
        let dir = temp_dir("write");
        let faqs = vec![Faq {
            q: "报到当天交不起学费怎么办？".to_string(),
            a: "走绿色通道。".to_string(),
        }];

        let path = write_collection(&dir, Collection::Faqs, &faqs).expect("write should succeed");
        let text = fs::read_to_string(&path).expect("file should be readable");
        assert!(text.contains("报到当天交不起学费怎么办？"));
        assert!(text.starts_with("[\n  {\n    \"q\""));
        assert!(text.ends_with("]\n"));

        let back: Vec<Faq> = read_collection(&dir, Collection::Faqs)
            .expect("read should succeed")
            .expect("file should exist");
        assert_eq!(back, faqs);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn rewrite_replaces_previous_content() {
        let dir = temp_dir("rewrite");
        let first = vec![Faq {
            q: "a".to_string(),
            a: "b".to_string(),
        }];
        write_collection(&dir, Collection::Faqs, &first).expect("first write");
        write_collection::<Faq>(&dir, Collection::Faqs, &[]).expect("second write");

        let text = fs::read_to_string(Collection::Faqs.path_in(&dir)).expect("readable");
        assert_eq!(text, "[]\n");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = temp_dir("malformed");
        fs::create_dir_all(&dir).expect("dir should be created");
        fs::write(Collection::Changelog.path_in(&dir), "{not json").expect("write fixture");

        let err = read_collection_value(&dir, Collection::Changelog)
            .expect_err("malformed file should fail");
        assert!(matches!(err, StoreError::Parse { .. }));

        let _ = fs::remove_dir_all(&dir);
    }
}
