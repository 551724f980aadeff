use std::fs;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::data::score_data::{ScoreArray, ScoreData, ScoreDataError};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScoreDataHeader {
    pub format_version: u32,
    pub scorer: String,
    pub number_of_scores: usize,
    pub sentence_count: usize,
    pub checksum: String,
    pub created_at: DateTime<Utc>, // informational only
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct ScoreDataFile {
    header: ScoreDataHeader,
    arrays: Vec<ScoreArray>,
}

#[derive(serde::Serialize)]
struct ScoreDataFileRef<'a> {
    header: &'a ScoreDataHeader,
    arrays: &'a [ScoreArray],
}

fn checksum(arrays: &[ScoreArray]) -> Result<String, ScoreDataError> {
    let bytes = serde_json::to_vec(arrays)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
}

impl ScoreData {
    /// Header describing this store as it would be persisted now.
    pub fn header(&self) -> Result<ScoreDataHeader, ScoreDataError> {
        Ok(ScoreDataHeader {
            format_version: FORMAT_VERSION,
            scorer: self.scorer().to_string(),
            number_of_scores: self.number_of_scores(),
            sentence_count: self.len(),
            checksum: checksum(self.arrays())?,
            created_at: Utc::now(),
        })
    }

    /// Write the store with a checksummed header. The file is written to a
    /// sibling temp file and renamed into place, so a reader never sees a
    /// partial store.
    pub fn save(&self, path: &Path) -> Result<ScoreDataHeader, ScoreDataError> {
        let header = self.header()?;

        let temp_path = path.with_extension("tmp");
        if temp_path.exists() {
            fs::remove_file(&temp_path)?;
        }

        let f = fs::File::create(&temp_path)?;
        serde_json::to_writer(
            &f,
            &ScoreDataFileRef {
                header: &header,
                arrays: self.arrays(),
            },
        )?;
        f.sync_all()?;
        fs::rename(&temp_path, path)?;

        debug!(
            path = %path.display(),
            sentences = header.sentence_count,
            checksum = %header.checksum,
            "saved score data"
        );
        Ok(header)
    }

    /// Read a store written by [`ScoreData::save`], rejecting unknown format
    /// versions, checksum mismatches, and records whose width or sentence
    /// count disagrees with the header.
    pub fn load(path: &Path) -> Result<Self, ScoreDataError> {
        let f = fs::File::open(path)?;
        let file: ScoreDataFile = serde_json::from_reader(BufReader::new(f))?;
        let header = file.header;

        if header.format_version != FORMAT_VERSION {
            return Err(ScoreDataError::UnsupportedFormat(header.format_version));
        }
        if header.sentence_count != file.arrays.len() {
            return Err(ScoreDataError::SentenceCountMismatch {
                declared: header.sentence_count,
                found: file.arrays.len(),
            });
        }

        let found = checksum(&file.arrays)?;
        if found != header.checksum {
            return Err(ScoreDataError::ChecksumMismatch {
                expected: header.checksum,
                found,
            });
        }

        let data = ScoreData::from_parts(header.scorer, header.number_of_scores, file.arrays);
        data.validate()?;

        debug!(path = %path.display(), sentences = data.len(), "loaded score data");
        Ok(data)
    }
}
