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
#![allow(non_snake_case,uncommon_codepoints)]

//! positions, rectangles and point-to-line distances on the earth sphere.
//! 
//! We use the [geo](https://docs.rs/geo/latest/geo/index.html) crate metric spaces for the basic
//! distance/bearing/interpolation primitives. All trail computations use the same spherical (haversine)
//! model so that segment lengths, along track distances and interpolated points are consistent.

use std::fmt;
use serde::{Serialize,Deserialize};
use geo::{Bearing, Coord, Distance, Haversine, InterpolatePoint, Intersects, Point, Rect};
use uom::si::f64::Length;
use uom::si::length::meter;

/// mean earth radius in meters (the sphere used by [`Haversine`])
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// positions closer than this (in degrees) to lon=0,lat=0 are considered to be null
const NULL_EPSILON: f64 = 1e-7;

/* #region GeoPos ***********************************************************************************************/

/// double precision geodetic position: longitude and latitude in degrees, altitude in meters.
/// Positions outside of the valid lon/lat range are used as break markers, the canonical one
/// is [`GeoPos::INVALID`]
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoPos {
    lon: f64,
    lat: f64,
    alt: f64,
}

impl GeoPos {
    pub const INVALID: GeoPos = GeoPos { lon: f64::MAX, lat: f64::MAX, alt: f64::MAX };

    pub const fn from_lon_lat_degrees (lon: f64, lat: f64)->Self {
        GeoPos { lon, lat, alt: 0.0 }
    }

    pub const fn from_lon_lat_degrees_alt_meters (lon: f64, lat: f64, alt: f64)->Self {
        GeoPos { lon, lat, alt }
    }

    pub fn from_lon_lat_alt (lon: f64, lat: f64, alt: Length)->Self {
        GeoPos { lon, lat, alt: alt.get::<meter>() }
    }

    #[inline] pub fn lon_degrees (&self)->f64 { self.lon }
    #[inline] pub fn lat_degrees (&self)->f64 { self.lat }
    #[inline] pub fn alt_meters (&self)->f64 { self.alt }
    #[inline] pub fn altitude (&self)->Length { Length::new::<meter>(self.alt) }

    pub fn with_alt_meters (self, alt: f64)->Self { GeoPos { alt, ..self } }

    pub fn is_valid_range (&self)->bool {
        self.lon.is_finite() && self.lat.is_finite() 
            && (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }

    /// the "null island" position that some data sources report while they are not initialized
    pub fn is_null (&self)->bool {
        self.lon.abs() < NULL_EPSILON && self.lat.abs() < NULL_EPSILON
    }

    /// a position is valid if it is within range. The sentinel [`GeoPos::INVALID`] is not
    #[inline] pub fn is_valid (&self)->bool { self.is_valid_range() }

    #[inline] pub fn point (&self)->Point { Point::new( self.lon, self.lat) }

    pub fn distance_meters (&self, other: &GeoPos)->f64 {
        Haversine.distance( self.point(), other.point())
    }

    pub fn distance (&self, other: &GeoPos)->Length {
        Length::new::<meter>( self.distance_meters(other))
    }

    /// initial great circle bearing towards `other` in degrees
    pub fn bearing_degrees (&self, other: &GeoPos)->f64 {
        Haversine.bearing( self.point(), other.point())
    }

    /// the great circle point at `fraction` of the way to `other`. Altitude is interpolated linearly
    pub fn interpolate (&self, other: &GeoPos, fraction: f64)->GeoPos {
        let p = Haversine.point_at_ratio_between( self.point(), other.point(), fraction);
        GeoPos { lon: p.x(), lat: p.y(), alt: self.alt + (other.alt - self.alt) * fraction }
    }

    /// narrowing conversion as used by legacy storage formats, keeps invalid positions invalid
    pub fn to_single_precision (&self)->GeoPos32 {
        if self.is_valid() {
            GeoPos32::from_lon_lat_degrees_alt_meters( self.lon as f32, self.lat as f32, self.alt as f32)
        } else {
            GeoPos32::INVALID
        }
    }
}

impl Default for GeoPos {
    fn default()->Self { GeoPos::INVALID }
}

impl fmt::Display for GeoPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "[{},{},{}]", self.lon, self.lat, self.alt)
        } else {
            write!(f, "[invalid]")
        }
    }
}

/* #endregion GeoPos */

/* #region GeoPos32 *********************************************************************************************/

/// single precision position of older storage formats. Its invalid sentinel is `f32::MAX`
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPos32 {
    lon: f32,
    lat: f32,
    alt: f32,
}

impl GeoPos32 {
    pub const INVALID: GeoPos32 = GeoPos32 { lon: f32::MAX, lat: f32::MAX, alt: f32::MAX };

    pub const fn from_lon_lat_degrees_alt_meters (lon: f32, lat: f32, alt: f32)->Self {
        GeoPos32 { lon, lat, alt }
    }

    #[inline] pub fn lon_degrees (&self)->f32 { self.lon }
    #[inline] pub fn lat_degrees (&self)->f32 { self.lat }
    #[inline] pub fn alt_meters (&self)->f32 { self.alt }

    pub fn is_valid (&self)->bool {
        self.lon != f32::MAX && self.lat != f32::MAX && self.lon.is_finite() && self.lat.is_finite()
    }
}

/// widening has to map the single precision sentinel to the double precision one - a plain
/// `as f64` would turn `f32::MAX` into a (out of range but) different value 
impl From<GeoPos32> for GeoPos {
    fn from (p: GeoPos32)->Self {
        if p.is_valid() {
            GeoPos::from_lon_lat_degrees_alt_meters( p.lon as f64, p.lat as f64, p.alt as f64)
        } else {
            GeoPos::INVALID
        }
    }
}

/* #endregion GeoPos32 */

/* #region GeoRect **********************************************************************************************/

/// a lon/lat aligned rectangle in degrees. West can be greater than east, in which case the
/// rectangle crosses the antimeridian
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoRect {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoRect {
    pub fn from_wsen (west: f64, south: f64, east: f64, north: f64)->Self {
        GeoRect { west, south, east, north }
    }

    pub fn from_pos (p: &GeoPos)->Self {
        GeoRect { west: p.lon, south: p.lat, east: p.lon, north: p.lat }
    }

    /// bounding rect of all valid positions, `None` if there are none
    pub fn from_positions<'a> (ps: impl IntoIterator<Item=&'a GeoPos>)->Option<Self> {
        let mut rect: Option<GeoRect> = None;
        for p in ps {
            extend_rect( &mut rect, p);
        }
        rect
    }

    /// grow to include `p`. Invalid positions are ignored
    pub fn extend (&mut self, p: &GeoPos) {
        if p.is_valid() {
            self.west = self.west.min(p.lon);
            self.east = self.east.max(p.lon);
            self.south = self.south.min(p.lat);
            self.north = self.north.max(p.lat);
        }
    }

    #[inline] pub fn crosses_antimeridian (&self)->bool { self.west > self.east }

    pub fn width_degrees (&self)->f64 {
        if self.crosses_antimeridian() { 360.0 - (self.west - self.east) } else { self.east - self.west }
    }

    pub fn height_degrees (&self)->f64 { self.north - self.south }

    /// `geo` rects cannot represent antimeridian crossings so we split at 180°
    fn rects (&self)->Vec<Rect> {
        let rect = |w: f64, e: f64| Rect::new( Coord{ x: w, y: self.south }, Coord{ x: e, y: self.north });
        if self.crosses_antimeridian() {
            vec![ rect( self.west, 180.0), rect( -180.0, self.east) ]
        } else {
            vec![ rect( self.west, self.east) ]
        }
    }

    pub fn overlaps (&self, other: &GeoRect)->bool {
        let others = other.rects();
        self.rects().iter().any( |r| others.iter().any( |o| r.intersects(o)))
    }

    pub fn contains (&self, p: &GeoPos)->bool {
        p.is_valid() && p.lat >= self.south && p.lat <= self.north && 
        if self.crosses_antimeridian() { p.lon >= self.west || p.lon <= self.east } else { p.lon >= self.west && p.lon <= self.east }
    }
}

/// the accumulator version of [`GeoRect::extend`] for optional (not yet initialized) rects
pub fn extend_rect (rect: &mut Option<GeoRect>, p: &GeoPos) {
    if p.is_valid() {
        match rect {
            Some(r) => r.extend(p),
            None => *rect = Some( GeoRect::from_pos(p))
        }
    }
}

/* #endregion GeoRect */

/* #region line distance ****************************************************************************************/

/// where the closest point of a segment lies relative to the segment endpoints
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum LineStatus {
    AlongTrack,
    BeforeStart,
    AfterEnd,
}

/// result of a point to segment distance computation. All distances are in meters
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct LineDistance {
    pub status: LineStatus,
    /// cross track distance if along track, distance to the closer endpoint otherwise
    pub distance: f64,
    /// along track distance of the projected point from the segment start, negative if before start
    pub distance_from_start: f64,
    pub distance_from_end: f64,
}

impl LineDistance {
    #[inline] pub fn is_along_track (&self)->bool { self.status == LineStatus::AlongTrack }
}

/// spherical cross track / along track distance of `p` relative to the segment `start`-`end`
pub fn distance_to_segment (p: &GeoPos, start: &GeoPos, end: &GeoPos)->LineDistance {
    let length = start.distance_meters(end);
    let d13 = start.distance_meters(p);

    if length <= 0.0 { // degenerated segment has no along track
        return LineDistance { status: LineStatus::BeforeStart, distance: d13, distance_from_start: 0.0, distance_from_end: d13 }
    }

    let δ13 = d13 / MEAN_EARTH_RADIUS;
    let Δθ = (start.bearing_degrees(p) - start.bearing_degrees(end)).to_radians();
    let δxt = (δ13.sin() * Δθ.sin()).asin();
    let mut along = (δ13.cos() / δxt.cos()).clamp(-1.0, 1.0).acos() * MEAN_EARTH_RADIUS;
    if Δθ.cos() < 0.0 { along = -along }

    if along < 0.0 {
        LineDistance { status: LineStatus::BeforeStart, distance: d13, distance_from_start: along, distance_from_end: length - along }
    } else if along > length {
        LineDistance { status: LineStatus::AfterEnd, distance: end.distance_meters(p), distance_from_start: along, distance_from_end: length - along }
    } else {
        LineDistance { status: LineStatus::AlongTrack, distance: δxt.abs() * MEAN_EARTH_RADIUS, distance_from_start: along, distance_from_end: length - along }
    }
}

/// closest segment of a polyline. Segments whose bounds do not overlap `clip` are skipped.
/// Returns the distance result together with the index of the segment start within `points`,
/// or `None` if no segment was evaluated
pub fn distance_to_polyline (p: &GeoPos, points: &[GeoPos], clip: Option<&GeoRect>)->Option<(LineDistance,usize)> {
    let mut closest: Option<(LineDistance,usize)> = None;

    for (i,seg) in points.windows(2).enumerate() {
        let (start,end) = (&seg[0], &seg[1]);

        if let Some(clip) = clip {
            let bounds = GeoRect::from_wsen( start.lon.min(end.lon), start.lat.min(end.lat), start.lon.max(end.lon), start.lat.max(end.lat));
            if !bounds.overlaps(clip) { continue }
        }

        let ld = distance_to_segment( p, start, end);
        match &closest {
            Some((best,_)) if best.distance <= ld.distance => {}
            _ => closest = Some((ld,i))
        }
    }

    closest
}

/* #endregion line distance */
