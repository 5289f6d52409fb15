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

use std::{fs,io};
use std::path::{Path,PathBuf};

use crate::codec::FormatVersion;
use crate::errors::Result;
use crate::trail::AircraftTrail;

/// maps a file suffix to the path of a state file in the application configuration area
pub trait ConfigPathResolver {
    fn config_path (&self, suffix: &str)->PathBuf;
}

impl<F> ConfigPathResolver for F where F: Fn(&str)->PathBuf {
    fn config_path (&self, suffix: &str)->PathBuf { self(suffix) }
}

/// resolver for state files that are kept in a single directory as "<prefix>_<suffix>"
#[derive(Debug,Clone)]
pub struct ConfigDir {
    pub dir: PathBuf,
    pub prefix: String,
}

impl ConfigDir {
    pub fn new (dir: impl AsRef<Path>, prefix: &str)->Self {
        ConfigDir { dir: dir.as_ref().to_path_buf(), prefix: prefix.to_string() }
    }
}

impl ConfigPathResolver for ConfigDir {
    fn config_path (&self, suffix: &str)->PathBuf {
        if self.prefix.is_empty() {
            self.dir.join( suffix)
        } else {
            self.dir.join( format!("{}_{}", self.prefix, suffix))
        }
    }
}

/// keeps up to `num_files` backups of a file as "<file>.1" (newest) to "<file>.<num_files>" (oldest)
#[derive(Debug,Clone,Copy)]
pub struct FileRoller {
    num_files: usize,
}

impl FileRoller {
    pub fn new (num_files: usize)->Self { FileRoller { num_files } }

    pub fn num_files (&self)->usize { self.num_files }

    pub fn backup_path (path: &Path, n: usize)->PathBuf {
        let mut s = path.as_os_str().to_os_string();
        s.push( format!(".{}", n));
        PathBuf::from(s)
    }

    /// shift existing backups up by one and move `path` itself to the first backup slot.
    /// This is a no-op if `path` does not exist yet
    pub fn roll_file (&self, path: impl AsRef<Path>)->io::Result<()> {
        let path = path.as_ref();
        if self.num_files == 0 || !path.is_file() { return Ok(()) }

        let oldest = Self::backup_path( path, self.num_files);
        if oldest.is_file() { fs::remove_file( &oldest)? }

        for n in (1..self.num_files).rev() {
            let p = Self::backup_path( path, n);
            if p.is_file() { fs::rename( &p, Self::backup_path( path, n+1))? }
        }

        fs::rename( path, Self::backup_path( path, 1))
    }
}

impl AircraftTrail {

    pub fn save_to_file (&self, path: impl AsRef<Path>)->Result<()> {
        let path = path.as_ref();
        match fs::write( path, self.to_bytes()) {
            Ok(()) => {
                info!("saved trail with {} samples to {:?}", self.len(), path);
                Ok(())
            }
            Err(e) => {
                warn!("cannot write trail {:?}: {}", path, e);
                Err(e.into())
            }
        }
    }

    /// replace contents with the trail stored in `path`. If the file cannot be read the trail is not changed,
    /// if it can be read but not decoded the trail is empty afterwards
    pub fn load_from_file (&mut self, path: impl AsRef<Path>)->Result<FormatVersion> {
        let path = path.as_ref();
        let bytes = fs::read( path).map_err( |e| {
            warn!("cannot read trail {:?}: {}", path, e);
            e
        })?;

        let version = self.read_from_bytes( &bytes)?;
        info!("loaded trail with {} samples from {:?}", self.len(), path);
        Ok(version)
    }

    /// store the trail in the state file for `suffix`, rolling `num_backup_files` backups of the previous state.
    /// A failure to roll backups is logged but does not prevent the save
    pub fn save_state (&self, resolver: &impl ConfigPathResolver, suffix: &str, num_backup_files: usize)->Result<PathBuf> {
        let path = resolver.config_path( suffix);

        if num_backup_files > 0 {
            if let Err(e) = FileRoller::new( num_backup_files).roll_file( &path) {
                warn!("cannot roll backups of {:?}: {}", path, e);
            }
        }

        self.save_to_file( &path)?;
        Ok(path)
    }

    /// restore the trail from the state file for `suffix`. A missing state file is not an error, the trail
    /// is just empty afterwards and `None` is returned
    pub fn restore_state (&mut self, resolver: &impl ConfigPathResolver, suffix: &str)->Result<Option<FormatVersion>> {
        let path = resolver.config_path( suffix);

        if path.is_file() {
            self.load_from_file( &path).map( Some)
        } else {
            debug!("no trail state {:?}", path);
            self.clear_trail();
            Ok(None)
        }
    }
}
