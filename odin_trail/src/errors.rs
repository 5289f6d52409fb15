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

use thiserror::Error;

pub type Result<T> = std::result::Result<T,OdinTrailError>;

#[derive(Error,Debug)]
pub enum OdinTrailError {

    #[error("invalid trail file magic number {0:#010x}")]
    InvalidMagic(u32),

    #[error("invalid trail file version {0}")]
    InvalidVersion(u16),

    #[error("truncated trail data ({0} bytes)")]
    TruncatedData(usize),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config parse error {0}")]
    ConfigParseError(String),

    #[error("serde error {0}")]
    SerdeError( #[from] serde_json::Error),
}

impl OdinTrailError {
    /// format errors mean the data was read but cannot be interpreted as a trail
    pub fn is_format_error (&self)->bool {
        matches!( self, Self::InvalidMagic(_) | Self::InvalidVersion(_) | Self::TruncatedData(_))
    }
}

macro_rules! config_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::OdinTrailError::ConfigParseError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use config_error;
