/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::fs::{self,File};
use std::io::{self,Read,Write,Error as IOError,ErrorKind};
use std::env;
use io::ErrorKind::*;
use regex::Regex;
use std::path::{Path,PathBuf};

use crate::macros::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str())
}

/// case insensitive check if path has given extension (without leading '.')
pub fn has_extension<T: AsRef<Path>> (path: &T, ext: &str)->bool {
    extension(path).map( |e| e.eq_ignore_ascii_case(ext)).unwrap_or(false)
}

pub fn ensure_dir (path: impl AsRef<Path>)->io::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn filepath_contents <P: AsRef<Path>> (path: &P) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    if len > 0 {
        let mut contents: Vec<u8> = Vec::with_capacity(len as usize);
        file.read_to_end(&mut contents)?;
        Ok(contents)

    } else { Err(io_error!(Other, "file empty: {:?}", path.as_ref())) }
}

/// sorted (by filename) list of regular files in `dir` with given extension
pub fn sorted_files_with_extension<P: AsRef<Path>> (dir: &P, ext: &str) -> Result<Vec<PathBuf>> {
    let dir: &Path = dir.as_ref();
    let mut list: Vec<PathBuf> = Vec::new();

    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && has_extension(&path, ext) {
                list.push(path)
            }
        }
    }
    list.sort_by( |a,b| a.file_name().cmp( &b.file_name()));

    Ok(list)
}

/// sorted list of sub-directory names in `dir` that match `dirname_regex`
pub fn matching_subdirs<P: AsRef<Path>> (dir: &P, dirname_regex: &Regex) -> Result<Vec<String>> {
    let dir: &Path = dir.as_ref();
    let mut list: Vec<String> = Vec::new();

    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    if dirname_regex.is_match(name) { list.push( name.to_string()) }
                }
            }
        }
    }
    list.sort();

    Ok(list)
}

/// remove all given files, returning the number of removed files. Stops at the first failure
pub fn remove_files (paths: &[PathBuf]) -> Result<usize> {
    let mut n_removed = 0;
    for p in paths {
        fs::remove_file(p)?;
        n_removed += 1;
    }
    Ok(n_removed)
}

/// unix permissions of files created by [`write_atomically`]
#[cfg(unix)]
pub const RESULT_FILE_MODE: u32 = 0o644;

/// write a file through a temporary file in the same directory that is only renamed to `path` if `write_fn`
/// succeeds. On failure the temporary file is removed, i.e. `path` is never left partially written
pub fn write_atomically<P,F,E> (path: P, write_fn: F) -> std::result::Result<(),E>
    where P: AsRef<Path>, F: FnOnce(&mut File)->std::result::Result<(),E>, E: From<io::Error>
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from(".")
    };

    let mut tmp = tempfile::Builder::new().prefix(".tmp-").tempfile_in(&dir)?;
    write_fn( tmp.as_file_mut())?;
    tmp.as_file_mut().flush()?;

    // temp files are owner-only, results are not
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file().set_permissions( fs::Permissions::from_mode( RESULT_FILE_MODE))?;
    }

    tmp.persist(path).map_err( |e| e.error)?;
    Ok(())
}

/// replace '~/' and '$<name>' path elements
pub fn replace_env_var_path (path: impl AsRef<Path>)->Result<PathBuf> {
    let mut p = PathBuf::new();

    for (n,c) in path.as_ref().iter().enumerate() {
        let e = c.to_str().ok_or( IOError::new(ErrorKind::Other, format!("invalid path: {:?}", path.as_ref())))?;

        if e == "~" && n == 0 {
            p.push( env::var("HOME").map_err( |_| IOError::new(ErrorKind::Other, "HOME not set"))?)
        } else if e.len() > 1 && e.starts_with('$') {
            p.push( env::var( &e[1..]).map_err( |_| IOError::new(ErrorKind::Other, format!("{e} not set")))?)
        } else {
            p.push(e)
        }
    }

    Ok(p)
}

/* #region EnvPathBuf *******************************************************************************/

use serde::ser::{Serialize as SerializeTrait, Serializer};
use serde::de::{Deserialize as DeserializeTrait, Deserializer};
use std::{fmt::Debug,ops::Deref,ffi::OsStr};

// a PathBuf that can use env vars as path elements
#[derive(Clone,PartialEq)]
pub struct EnvPathBuf(PathBuf);

impl EnvPathBuf {
    pub fn new (path: impl AsRef<Path>)->Result<Self> {
        Ok( EnvPathBuf( replace_env_var_path(path)?) )
    }

    pub fn into_path_buf (self)->PathBuf { self.0 }
}

impl Debug for EnvPathBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl Deref for EnvPathBuf {
    type Target = PathBuf;

    fn deref (&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for EnvPathBuf {
    #[inline]
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<OsStr> for EnvPathBuf {
    #[inline]
    fn as_ref(&self) -> &OsStr {
        self.0.as_ref()
    }
}

// note this means we serialize the expanded pathbuf
impl SerializeTrait for EnvPathBuf {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        self.0.serialize( serializer)
    }
}

impl<'de> DeserializeTrait<'de> for EnvPathBuf {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let a = String::deserialize(deserializer)?;
        let ep = PathBuf::from(a);
        let p = replace_env_var_path(&ep).map_err(|e| serde::de::Error::custom(format!("failed to expand path {ep:?}: {e}")))?;
        Ok( EnvPathBuf(p) )
    }
}

/* #endregion EnvPathBuf */
