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

use serde::Serialize;
use uom::si::f64::{Length,Velocity};
use uom::si::length::meter;
use uom::si::velocity::meter_per_second;

use crate::datetime::EpochMillis;
use crate::geo::{self,GeoPos,GeoRect,LineDistance};
use crate::trail::AircraftTrail;

/// integer screen (pixel) coordinates
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new (x: i32, y: i32)->Self { ScreenPoint { x, y } }
}

/// the interpolated trail sample at a picked location
#[derive(Debug,Clone,Serialize)]
pub struct TrailHit {
    pub position: GeoPos,
    /// trail index of the segment end, i.e. where a point would have to be inserted
    pub index: usize,
    pub from: GeoPos,
    pub to: GeoPos,
    pub length_m: f64,
    pub distance_from_start_m: f64,
    pub altitude_m: f64,
    pub on_ground: bool,
    pub timestamp: EpochMillis,
    /// `None` if the segment has no positive duration
    pub speed_mps: Option<f64>,
}

impl TrailHit {
    pub fn length (&self)->Length { Length::new::<meter>( self.length_m) }
    pub fn distance_from_start (&self)->Length { Length::new::<meter>( self.distance_from_start_m) }
    pub fn altitude (&self)->Length { Length::new::<meter>( self.altitude_m) }
    pub fn speed (&self)->Option<Velocity> { self.speed_mps.map( Velocity::new::<meter_per_second>) }
}

impl AircraftTrail {
    /// find the interpolated trail location that is closest to `position` and within `max_screen_distance` 
    /// (manhattan) of `screen_point`.
    /// 
    /// The search is geometric: only polylines overlapping `viewport` are considered and only results that
    /// fall along a segment (not beyond its endpoints) qualify. The winner is then projected with `project`,
    /// which maps a geographic position to screen coordinates (or `None` if it is not visible), and rejected
    /// if it is too far from `screen_point`. Note this means a geometrically closer but visually rejected
    /// candidate can hide a visually closer one on another polyline
    pub fn find_nearest<F> (&self, screen_point: ScreenPoint, position: &GeoPos, max_screen_distance: i32,
                            viewport: &GeoRect, mut project: F)->Option<TrailHit>
        where F: FnMut(&GeoPos)->Option<(f64,f64)>
    {
        if self.len() < 2 { return None }

        let geometry = self.geometry();
        let mut closest: Option<(LineDistance,usize)> = None;

        for (start_index, line, _) in geometry.iter() {
            let overlaps = GeoRect::from_positions( line).map( |r| r.overlaps( viewport)).unwrap_or(false);
            if !overlaps { continue }

            if let Some((ld,idx)) = geo::distance_to_polyline( position, line, Some(viewport)) {
                let is_closer = closest.as_ref().map( |(best,_)| ld.distance.abs() < best.distance.abs()).unwrap_or(true);
                if ld.is_along_track() && is_closer {
                    closest = Some((ld, start_index + idx));
                }
            }
        }

        let (ld, index) = closest?;
        let samples = self.samples();
        let (from, to) = (&samples[index], &samples[index+1]);

        let length = from.position().distance_meters( to.position());
        let fraction = if length > 0.0 { (ld.distance_from_start / length).clamp( 0.0, 1.0) } else { 0.0 };
        let pos = from.position().interpolate( to.position(), fraction);

        // projected coordinates can be far outside of the i32 range, compare in f64
        let (xs,ys) = project( &pos)?;
        if !(xs.is_finite() && ys.is_finite()) { return None }

        let screen_distance = (xs.round() - screen_point.x as f64).abs() + (ys.round() - screen_point.y as f64).abs();
        if screen_distance > max_screen_distance as f64 { 
            return None 
        }

        let travel_time = to.timestamp().millis_since( from.timestamp()) as f64;
        let speed_mps = if travel_time > 0.0 { Some( length / travel_time * 1000.0) } else { None };
        let ground = lerp( from.is_on_ground() as u8 as f64, to.is_on_ground() as u8 as f64, fraction);

        Some( TrailHit {
            position: pos,
            index: index + 1,
            from: *from.position(),
            to: *to.position(),
            length_m: length,
            distance_from_start_m: ld.distance_from_start,
            altitude_m: lerp( from.position().alt_meters(), to.position().alt_meters(), fraction),
            on_ground: ground > 0.5,
            timestamp: from.timestamp() + (travel_time * fraction).round() as i64,
            speed_mps,
        })
    }
}

#[inline]
fn lerp (a: f64, b: f64, fraction: f64)->f64 { a + (b - a) * fraction }
