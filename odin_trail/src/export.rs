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

//! conversion between trails and the minimal point list shape of track exchange formats (GPX et al.)

use serde::{Serialize,Deserialize};

use crate::datetime::EpochMillis;
use crate::geo::{GeoPos,GeoRect,extend_rect};
use crate::sample::TrailSample;
use crate::trail::AircraftTrail;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct TrackPoint {
    pub pos: GeoPos,
    pub timestamp: EpochMillis,
}

impl TrackPoint {
    pub fn new (pos: GeoPos, timestamp: EpochMillis)->Self { TrackPoint { pos, timestamp } }
}

/// what track exchange encoders get from a trail. The route is opaque to us and passed through unchanged
#[derive(Debug,Clone,Serialize)]
pub struct TrackExport<R> {
    pub tracks: Vec<Vec<TrackPoint>>,
    pub track_rect: Option<GeoRect>,
    pub route: R,
    pub route_rect: Option<GeoRect>,
}

impl<R> TrackExport<R> {
    pub fn n_points (&self)->usize { self.tracks.iter().map( |t| t.len()).sum() }
}

impl AircraftTrail {

    /// one track per non-empty polyline
    pub fn to_track_export<R: AsRef<[GeoPos]>> (&self, route: R)->TrackExport<R> {
        let mut tracks: Vec<Vec<TrackPoint>> = Vec::new();
        let mut track_rect: Option<GeoRect> = None;

        for (_, line, timestamps) in self.geometry().iter() {
            let track: Vec<TrackPoint> = line.iter().zip( timestamps.iter())
                .map( |(pos,ts)| {
                    extend_rect( &mut track_rect, pos);
                    TrackPoint::new( *pos, *ts)
                })
                .collect();
            tracks.push( track);
        }

        let mut route_rect: Option<GeoRect> = None;
        for pos in route.as_ref() { extend_rect( &mut route_rect, pos) }

        TrackExport { tracks, track_rect, route, route_rect }
    }

    /// replace contents with imported tracks. Each track becomes its own polyline, terminated by a break.
    /// Imported points are always considered to be airborne
    pub fn fill_from_tracks (&mut self, tracks: &[Vec<TrackPoint>]) {
        let n = tracks.iter().map( |t| t.len() + 1).sum();
        let mut samples: Vec<TrailSample> = Vec::with_capacity(n);

        for track in tracks {
            let mut last = EpochMillis::default();
            for tp in track {
                samples.push( TrailSample::new( tp.pos, tp.timestamp, false));
                last = tp.timestamp;
            }
            samples.push( TrailSample::new_break( last, false));
        }

        debug!("filled trail from {} tracks with {} samples", tracks.len(), samples.len());
        self.set_samples( samples);
    }
}
