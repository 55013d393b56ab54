//! Record source and sink adapters. The scoring engine itself never
//! touches the filesystem; this module owns the JSON edges around it.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::appetite::{PolicyRecord, PortfolioView, RelevanceAnnotation};

/// Feed ingestion or export failure, tagged with the offending path.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to read feed at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("feed at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write output to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize output for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Integration exports wrap the records in an `output` envelope;
/// ad-hoc extracts ship a bare array. Both load the same way.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Feed {
    Wrapped { output: Vec<FeedBlock> },
    Bare(Vec<PolicyRecord>),
}

#[derive(Debug, Deserialize)]
struct FeedBlock {
    #[serde(default)]
    data: Vec<PolicyRecord>,
}

pub fn load_records(path: &Path) -> Result<Vec<PolicyRecord>, FeedError> {
    let file = File::open(path).map_err(|source| FeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let feed: Feed =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| FeedError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(match feed {
        Feed::Wrapped { output } => output.into_iter().flat_map(|block| block.data).collect(),
        Feed::Bare(records) => records,
    })
}

/// Sidecar produced by the external reranking collaborator: a JSON
/// array of `{index, relevance_score}` entries.
pub fn load_relevance(path: &Path) -> Result<Vec<RelevanceAnnotation>, FeedError> {
    let file = File::open(path).map_err(|source| FeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| FeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_portfolio(path: &Path, view: &PortfolioView) -> Result<(), FeedError> {
    let file = File::create(path).map_err(|source| FeedError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), view).map_err(|source| {
        FeedError::Serialize {
            path: path.to_path_buf(),
            source,
        }
    })
}
