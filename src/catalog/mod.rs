//! Movie catalog: the concrete payload type the index was built for.
//!
//! The catalog side of the system hands the index a finite sequence of
//! unique `(id, movie)` pairs; everything upstream of that (scraping,
//! statistics, charts) lives outside this crate. This module carries
//! the record shape and the bulk-build path:
//! - [`Movie`] - a serde-serializable movie record
//! - [`load_movies`] - read a JSON array of records from a file
//! - [`build_index`] - bulk-insert records into a capacity-11 tree

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::config::MOVIE_INDEX_CAPACITY;
use crate::error::Result;
use crate::index::btree::BTree;

/// A single movie record, keyed by its catalog id (e.g. `"tt0111161"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rating: f64,
    pub votes: u64,
    pub year: u32,
    pub director: String,
    pub stars: Vec<String>,
    pub categories: Vec<String>,
    /// Runtime in minutes.
    pub duration: u32,
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Movie:")?;
        writeln!(f, "\tid: {}", self.id)?;
        writeln!(f, "\tname: {}", self.name)?;
        writeln!(f, "\tdescription: {}", self.description)?;
        writeln!(f, "\trating: {}", self.rating)?;
        writeln!(f, "\tvotes: {}", self.votes)?;
        writeln!(f, "\tyear: {}", self.year)?;
        writeln!(f, "\tdirector: {}", self.director)?;
        writeln!(f, "\tstars: {}", self.stars.join(", "))?;
        writeln!(f, "\tcategories: {}", self.categories.join(", "))?;
        write!(f, "\tduration: {}", self.duration)
    }
}

/// Read a JSON array of movie records from a file.
///
/// # Errors
/// `Error::Io` if the file cannot be opened, `Error::Codec` if the
/// contents are not a valid movie array.
pub fn load_movies<P: AsRef<Path>>(path: P) -> Result<Vec<Movie>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Bulk-insert movies into a fresh index keyed by id.
///
/// Uses [`MOVIE_INDEX_CAPACITY`] (11), the bucket size the catalog has
/// always been indexed with.
///
/// # Errors
/// `Error::DuplicateKey` if two records share an id.
pub fn build_index(movies: Vec<Movie>) -> Result<BTree<String, Movie>> {
    let mut tree = BTree::with_capacity(MOVIE_INDEX_CAPACITY)?;
    for movie in movies {
        tree.insert(movie.id.clone(), movie)?;
    }
    Ok(tree)
}
