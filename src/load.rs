// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Locating and loading terminfo entries by terminal name
//!
//! Follows the terminfo(5) search order and keeps a process-wide
//! cache of decoded entries.

use std::{
    collections::HashMap,
    env, fs, io,
    path::PathBuf,
    sync::{LazyLock, PoisonError, RwLock},
};

use log::{debug, trace};

use crate::decode::{self, Terminfo};

/// System terminfo database, searched after the environment.
const SYSTEM_DIR: &str = "/usr/share/terminfo";

/// Errors reported when looking up a terminal
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The terminal name is empty
    #[error("empty terminal name")]
    EmptyTerm,
    /// No terminfo file exists in any searched directory
    #[error("terminfo entry not found")]
    NotFound,
    /// The terminfo file could not be read
    #[error("I/O error")]
    Io(#[from] io::Error),
    /// The terminfo file could not be decoded
    #[error(transparent)]
    Decode(#[from] decode::Error),
}

/// Decoded entries keyed by terminal name.
static CACHE: LazyLock<RwLock<HashMap<String, Terminfo>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Directories searched for terminfo files, in order: `$TERMINFO`,
/// `$HOME/.terminfo`, the elements of the colon-separated
/// `$TERMINFO_DIRS` (an empty element stands for the system
/// directory), and finally the system directory.
pub fn search_directories() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(dir) = env::var("TERMINFO") {
        dirs.push(PathBuf::from(dir));
    }
    if let Some(home) = env::home_dir() {
        dirs.push(home.join(".terminfo"));
    }
    if let Ok(list) = env::var("TERMINFO_DIRS") {
        for dir in list.split(':') {
            if dir.is_empty() {
                dirs.push(PathBuf::from(SYSTEM_DIR));
            } else {
                dirs.push(PathBuf::from(dir));
            }
        }
    }
    dirs.push(PathBuf::from(SYSTEM_DIR));
    dirs
}

/// Find the terminfo file for `name` following the standard search
/// order. Each directory is tried with the single-letter leaf first
/// and then with the hexadecimal leaf used on case-insensitive
/// filesystems.
pub fn locate(name: &str) -> Result<PathBuf, Error> {
    let Some(&first) = name.as_bytes().first() else {
        return Err(Error::EmptyTerm);
    };
    for dir in search_directories() {
        let letter = dir.join((first as char).to_string()).join(name);
        if letter.exists() {
            return Ok(letter);
        }
        let hex = dir.join(format!("{first:02x}")).join(name);
        if hex.exists() {
            return Ok(hex);
        }
        trace!("no entry for {name} under {}", dir.display());
    }
    Err(Error::NotFound)
}

/// Load and decode the terminfo entry for `name`.
///
/// A process-wide cache is consulted first and filled on success,
/// under every alias of the entry. The returned record is owned by
/// the caller; mutating it does not affect the cached copy.
pub fn load(name: &str) -> Result<Terminfo, Error> {
    {
        let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(ti) = cache.get(name) {
            trace!("cache hit for {name}");
            return Ok(ti.clone());
        }
    }
    let path = locate(name)?;
    debug!("loading {}", path.display());
    let ti = decode::decode(&fs::read(path)?)?;
    let mut cache = CACHE.write().unwrap_or_else(PoisonError::into_inner);
    for alias in &ti.names {
        cache.insert(alias.clone(), ti.clone());
    }
    Ok(ti)
}

/// Load the entry for the terminal named by `$TERM`.
pub fn load_env() -> Result<Terminfo, Error> {
    load(&env::var("TERM").unwrap_or_default())
}
