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

//! recording, persistence and picking of an aircraft position history ("trail").
//! 
//! An [`AircraftTrail`] is a flat, time ordered sequence of [`TrailSample`]s. Samples with an invalid
//! position are break markers that split the sequence into disjoint polylines without deleting history.
//! Consumers should not have to deal with break markers themselves - [`TrailGeometry`] provides the
//! polyline view that is used for export and for the nearest point search of [`AircraftTrail::find_nearest`].

/*
 * we intercept logging/tracing macros here to have a central place where we can remove/replace them.
 * Note these have to be defined before the module declarations so that they are in textual scope
 */

macro_rules! debug {
    ( $( $e: expr ),* ) => { tracing::debug!( $( $e ),* ) }
}

macro_rules! info {
    ( $( $e: expr ),* ) => { tracing::info!( $( $e ),* ) }
}

macro_rules! warn {
    ( $( $e: expr ),* ) => { tracing::warn!( $( $e ),* ) }
}

pub mod errors;
pub mod datetime;
pub mod geo;
pub mod sample;
pub mod aircraft;
pub mod config;
pub mod trail;
pub mod codec;
pub mod geometry;
pub mod nearest;
pub mod export;
pub mod persist;

pub use crate::errors::{OdinTrailError, Result};
pub use crate::datetime::EpochMillis;
pub use crate::geo::{GeoPos, GeoPos32, GeoRect, LineDistance, LineStatus};
pub use crate::sample::TrailSample;
pub use crate::aircraft::AircraftSnapshot;
pub use crate::config::{TrailConfig, load_config};
pub use crate::trail::AircraftTrail;
pub use crate::codec::{FormatVersion, Decoded};
pub use crate::geometry::TrailGeometry;
pub use crate::nearest::{ScreenPoint, TrailHit};
pub use crate::export::{TrackPoint, TrackExport};
pub use crate::persist::{ConfigPathResolver, ConfigDir, FileRoller};
