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
use serde::{Serialize,Deserialize};
use uom::si::f64::Length;

use crate::datetime::EpochMillis;
use crate::geo::GeoPos;

/// a single recorded aircraft observation. Samples with an invalid position are break markers
/// that only carry timestamp and ground flag
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct TrailSample {
    pos: GeoPos,
    timestamp: EpochMillis,
    on_ground: bool,
}

impl TrailSample {
    pub fn new (pos: GeoPos, timestamp: EpochMillis, on_ground: bool)->Self {
        TrailSample { pos, timestamp, on_ground }
    }

    pub fn new_break (timestamp: EpochMillis, on_ground: bool)->Self {
        TrailSample { pos: GeoPos::INVALID, timestamp, on_ground }
    }

    #[inline] pub fn position (&self)->&GeoPos { &self.pos }
    #[inline] pub fn timestamp (&self)->EpochMillis { self.timestamp }
    #[inline] pub fn is_on_ground (&self)->bool { self.on_ground }
    #[inline] pub fn altitude (&self)->Length { self.pos.altitude() }

    #[inline] pub fn is_valid (&self)->bool { self.pos.is_valid() }
    #[inline] pub fn is_break (&self)->bool { !self.pos.is_valid() }
}

impl fmt::Display for TrailSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrailSample( pos: {}, time: {}, ground: {})", self.pos, self.timestamp, self.on_ground)
    }
}
