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

use std::{fs, path::Path};
use serde::{Serialize,Deserialize};
use uom::si::f64::Length;
use uom::si::length::{meter,nautical_mile};

use crate::errors::{config_error, Result};

/// recording and persistence settings of an [`crate::AircraftTrail`], normally read from `configs/trail.ron`.
/// All fields have defaults so that configs only need to specify what they change
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub max_entries: usize,          // prune once the trail holds more samples than this
    pub prune_block: usize,          // number of oldest samples removed per prune
    pub max_point_distance_nm: f64,  // jumps above this can split the trail

    pub ground_epsilon_m: f64,
    pub flying_epsilon_m: f64,
    pub ground_epsilon_ms: i64,
    pub flying_epsilon_ms: i64,

    pub file_suffix: String,
    pub num_backup_files: usize,
}

impl Default for TrailConfig {
    fn default()->Self {
        TrailConfig {
            max_entries: 20_000,
            prune_block: 200,
            max_point_distance_nm: 5.0,
            ground_epsilon_m: 0.5,
            flying_epsilon_m: 100.0,
            ground_epsilon_ms: 500,
            flying_epsilon_ms: 2000,
            file_suffix: "aircraft_trail".to_string(),
            num_backup_files: 2,
        }
    }
}

impl TrailConfig {
    pub fn max_point_distance (&self)->Length {
        Length::new::<nautical_mile>( self.max_point_distance_nm)
    }

    pub fn max_point_distance_meters (&self)->f64 {
        self.max_point_distance().get::<meter>()
    }

    /// position (meters) and time (milliseconds) thresholds a new sample has to exceed
    pub fn epsilons (&self, on_ground: bool)->(f64,i64) {
        if on_ground {
            (self.ground_epsilon_m, self.ground_epsilon_ms)
        } else {
            (self.flying_epsilon_m, self.flying_epsilon_ms)
        }
    }

    pub fn from_ron_str (s: &str)->Result<Self> {
        ron::from_str(s).map_err( |e| config_error!("{}", e))
    }
}

pub fn load_config (path: impl AsRef<Path>)->Result<TrailConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)?;
    ron::from_str(&s).map_err( |e| config_error!("{:?}: {}", path, e))
}
