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

use std::{fmt, ops::{Add,Sub}};
use chrono::{DateTime,TimeZone,Utc};
use serde::{Serialize,Deserialize};

/// signed milliseconds since the unix epoch. This is what trail samples store, the full
/// `DateTime<Utc>` is only used at the boundaries (aircraft snapshots, display)
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Default,Serialize,Deserialize)]
#[serde(transparent)]
pub struct EpochMillis(i64);

impl EpochMillis {
    pub fn now ()->Self { EpochMillis( Utc::now().timestamp_millis()) }

    pub const fn new (millis: i64)->Self { EpochMillis(millis) }

    /// used to convert legacy second based timestamps
    pub const fn from_secs (secs: i64)->Self { EpochMillis(secs * 1000) }

    #[inline] pub fn millis (&self)->i64 { self.0 }

    /// signed number of milliseconds from `earlier` to self
    #[inline] pub fn millis_since (&self, earlier: EpochMillis)->i64 { self.0 - earlier.0 }

    pub fn to_utc (&self)->Option<DateTime<Utc>> { DateTime::<Utc>::from_timestamp_millis(self.0) }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{}ms", self.0)
        }
    }
}

impl<Tz> From<DateTime<Tz>> for EpochMillis where Tz: TimeZone {
    fn from (date: DateTime<Tz>)->Self { EpochMillis( date.timestamp_millis()) }
}

impl Add<i64> for EpochMillis {
    type Output = EpochMillis;
    fn add (self, millis: i64)->EpochMillis { EpochMillis( self.0 + millis) }
}

impl Sub for EpochMillis {
    type Output = i64;
    fn sub (self, rhs: EpochMillis)->i64 { self.0 - rhs.0 }
}
