//! Identifiers for the storage format / product variant under test

use std::fmt;
use std::str::FromStr;

use crate::error::SparseError;

/// A benchmarked product method
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    /// Compressed-row product, dense result
    CompressedRow,
    /// Compressed-column product, dense result
    CompressedColumn,
    /// Coordinate triple-list product, dense result
    Coordinate,
    /// List-of-rows product, dense result
    ListOfRows,
    /// Dictionary adjacency, direct nested accumulation
    DictionaryDirect,
    /// Dictionary adjacency, map partial products then reduce by row
    DictionaryMapReduce,
}

impl Method {
    /// Every method, in reporting order
    pub const ALL: [Method; 6] = [
        Method::CompressedRow,
        Method::CompressedColumn,
        Method::Coordinate,
        Method::ListOfRows,
        Method::DictionaryDirect,
        Method::DictionaryMapReduce,
    ];

    /// String tag used in configuration and reports
    pub fn tag(&self) -> &'static str {
        match self {
            Method::CompressedRow => "compressed-row",
            Method::CompressedColumn => "compressed-column",
            Method::Coordinate => "coordinate",
            Method::ListOfRows => "list-of-rows",
            Method::DictionaryDirect => "dictionary-direct",
            Method::DictionaryMapReduce => "dictionary-map-reduce",
        }
    }

    /// True when the product yields a sparse row → value map
    pub fn has_sparse_result(&self) -> bool {
        matches!(self, Method::DictionaryDirect | Method::DictionaryMapReduce)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

impl FromStr for Method {
    type Err = SparseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Method::ALL
            .into_iter()
            .find(|m| m.tag() == tag)
            .ok_or_else(|| SparseError::UnknownMethod(tag.to_string()))
    }
}
