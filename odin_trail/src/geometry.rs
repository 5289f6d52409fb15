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

use crate::datetime::EpochMillis;
use crate::geo::{GeoPos,GeoRect};
use crate::trail::AircraftTrail;

/// the polyline view of an [`AircraftTrail`], computed in a single pass that splits at break markers.
/// 
/// `polylines`, `timestamps` and `start_indices` are index aligned. A break directly following another
/// break (or at the start) yields an empty polyline, which consumers skip. Geometries are not updated
/// when the trail changes - use [`TrailGeometry::is_current`] before re-using one
#[derive(Debug,Clone,Default)]
pub struct TrailGeometry {
    revision: u64,
    polylines: Vec<Vec<GeoPos>>,
    timestamps: Vec<Vec<EpochMillis>>,
    start_indices: Vec<usize>, // index of the first polyline sample within the trail
}

impl TrailGeometry {
    pub fn new (trail: &AircraftTrail)->Self {
        let mut polylines = Vec::new();
        let mut timestamps = Vec::new();
        let mut start_indices = Vec::new();

        let mut line: Vec<GeoPos> = Vec::new();
        let mut times: Vec<EpochMillis> = Vec::new();
        let mut start = 0;

        for (i,sample) in trail.samples().iter().enumerate() {
            if sample.is_break() {
                polylines.push( std::mem::take( &mut line));
                timestamps.push( std::mem::take( &mut times));
                start_indices.push( start);
                start = i+1;
            } else {
                line.push( *sample.position());
                times.push( sample.timestamp());
            }
        }

        if !line.is_empty() {
            polylines.push( line);
            timestamps.push( times);
            start_indices.push( start);
        }

        TrailGeometry { revision: trail.revision(), polylines, timestamps, start_indices }
    }

    /// true if the trail did not change since this geometry was computed from it
    pub fn is_current (&self, trail: &AircraftTrail)->bool { self.revision == trail.revision() }

    #[inline] pub fn revision (&self)->u64 { self.revision }

    #[inline] pub fn len (&self)->usize { self.polylines.len() }
    #[inline] pub fn is_empty (&self)->bool { self.polylines.is_empty() }

    pub fn polylines (&self)->&[Vec<GeoPos>] { &self.polylines }
    pub fn timestamps (&self)->&[Vec<EpochMillis>] { &self.timestamps }
    pub fn start_indices (&self)->&[usize] { &self.start_indices }

    pub fn into_polylines (self)->Vec<Vec<GeoPos>> { self.polylines }

    /// all non-empty polylines as (trail index of first sample, positions, timestamps)
    pub fn iter (&self)->impl Iterator<Item=(usize,&[GeoPos],&[EpochMillis])> {
        self.start_indices.iter()
            .zip( self.polylines.iter().zip( self.timestamps.iter()))
            .filter( |(_,(line,_))| !line.is_empty())
            .map( |(i,(line,times))| (*i, line.as_slice(), times.as_slice()))
    }

    /// bounding rect of all polyline positions
    pub fn bounds (&self)->Option<GeoRect> {
        GeoRect::from_positions( self.polylines.iter().flatten())
    }

    pub fn n_points (&self)->usize { self.polylines.iter().map( |l| l.len()).sum() }
}

impl AircraftTrail {
    /// polylines of valid positions, split at breaks
    pub fn line_strings (&self)->Vec<Vec<GeoPos>> { self.geometry().into_polylines() }

    /// timestamps in the same structure as [`AircraftTrail::line_strings`]
    pub fn timestamps (&self)->Vec<Vec<EpochMillis>> { self.geometry().timestamps }
}
