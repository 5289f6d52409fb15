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

use std::fmt;
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};

use crate::datetime::EpochMillis;
use crate::geo::GeoPos;

/// the user aircraft state as reported by the simulator or a live data source. Only the 
/// fields the trail needs for recording and split decisions are included
#[derive(Debug,Clone,PartialEq,Default,Serialize,Deserialize)]
pub struct AircraftSnapshot {
    pub position: GeoPos,
    pub on_ground: bool,
    pub zulu_time: DateTime<Utc>,

    // identity - used to detect a changed aircraft between two snapshots
    pub title: String,
    pub registration: String,
    pub aircraft_type: String,
    pub model: String,
}

impl AircraftSnapshot {
    pub fn new (position: GeoPos, on_ground: bool, zulu_time: DateTime<Utc>)->Self {
        AircraftSnapshot { position, on_ground, zulu_time, ..Default::default() }
    }

    pub fn with_identity (mut self, title: &str, registration: &str, aircraft_type: &str, model: &str)->Self {
        self.title = title.to_string();
        self.registration = registration.to_string();
        self.aircraft_type = aircraft_type.to_string();
        self.model = model.to_string();
        self
    }

    /// minimally valid: we have a position within range
    pub fn is_valid (&self)->bool { self.position.is_valid() }

    /// some simulators report 0/0 positions while loading or repositioning. We do not
    /// start a trail from such a position
    pub fn is_fully_valid (&self)->bool {
        self.is_valid() && !self.position.is_null()
    }

    pub fn has_aircraft_changed (&self, other: &AircraftSnapshot)->bool {
        self.title != other.title || self.registration != other.registration ||
        self.aircraft_type != other.aircraft_type || self.model != other.model
    }

    pub fn timestamp (&self)->EpochMillis { self.zulu_time.into() }
}

impl fmt::Display for AircraftSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Aircraft( {} {}, pos: {}, ground: {}, time: {})", 
               self.aircraft_type, self.registration, self.position, self.on_ground, self.zulu_time)
    }
}
