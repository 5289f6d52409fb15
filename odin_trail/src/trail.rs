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

use bytes::Bytes;
use uom::si::f64::Length;
use uom::si::length::meter;

use crate::aircraft::AircraftSnapshot;
use crate::codec::{self,FormatVersion};
use crate::config::TrailConfig;
use crate::errors::Result;
use crate::geometry::TrailGeometry;
use crate::sample::TrailSample;

/// the recorded position history of the user aircraft.
/// 
/// Samples are kept in insertion order, which is assumed to be chronological. Invalid samples
/// are break markers between polylines. The trail owns the ingestion policy (noise filter, split
/// and prune rules) and tracks the maximum altitude of its valid samples.
/// 
/// Every content change increments [`AircraftTrail::revision`], which is what derived data such as
/// [`TrailGeometry`] uses to detect staleness. Clones are deep.
#[derive(Debug,Clone)]
pub struct AircraftTrail {
    samples: Vec<TrailSample>,
    config: TrailConfig,
    max_altitude: f64, // meters
    last_aircraft: AircraftSnapshot, // last accepted snapshot, only used for split decisions
    revision: u64,
}

impl AircraftTrail {
    pub fn new (config: TrailConfig)->Self {
        AircraftTrail {
            samples: Vec::new(),
            config,
            max_altitude: 0.0,
            last_aircraft: AircraftSnapshot::default(),
            revision: 0,
        }
    }

    pub fn with_max_entries (max_entries: usize)->Self {
        AircraftTrail::new( TrailConfig { max_entries, ..TrailConfig::default() })
    }

    //--- accessors

    #[inline] pub fn samples (&self)->&[TrailSample] { self.samples.as_slice() }
    #[inline] pub fn len (&self)->usize { self.samples.len() }
    #[inline] pub fn is_empty (&self)->bool { self.samples.is_empty() }
    #[inline] pub fn revision (&self)->u64 { self.revision }
    #[inline] pub fn config (&self)->&TrailConfig { &self.config }

    #[inline] pub fn max_entries (&self)->usize { self.config.max_entries }
    pub fn set_max_entries (&mut self, max_entries: usize) { self.config.max_entries = max_entries }

    #[inline] pub fn max_altitude_meters (&self)->f64 { self.max_altitude }
    pub fn max_altitude (&self)->Length { Length::new::<meter>( self.max_altitude) }

    pub fn last_aircraft (&self)->&AircraftSnapshot { &self.last_aircraft }

    pub fn first_valid (&self)->Option<&TrailSample> { self.samples.iter().find( |s| s.is_valid()) }
    pub fn last_valid (&self)->Option<&TrailSample> { self.samples.iter().rev().find( |s| s.is_valid()) }

    /// the polyline view of the current contents
    pub fn geometry (&self)->TrailGeometry { TrailGeometry::new( self) }

    //--- ingestion

    /// record a new aircraft snapshot. Snapshots that are too close in both position and time to the last
    /// sample are dropped. Large jumps on the ground or with a changed aircraft insert a break if `allow_split`
    /// is set, jumps while flying (e.g. simulator time warp) do not.
    /// Returns true if old samples were pruned, which means caches that depend on the trail contents are invalid
    pub fn append_sample (&mut self, aircraft: &AircraftSnapshot, allow_split: bool)->bool {
        if !aircraft.is_valid() {
            debug!("ignoring invalid aircraft {}", aircraft);
            return false
        }

        if !self.last_aircraft.is_valid() && !aircraft.is_fully_valid() {
            debug!("ignoring not fully valid aircraft {}", aircraft);
            return false
        }

        let mut pruned = false;
        let pos = aircraft.position;
        let timestamp = aircraft.timestamp();
        let on_ground = aircraft.on_ground;

        match self.samples.last().copied() {
            None => {
                self.samples.push( TrailSample::new( pos, timestamp, on_ground));
                self.last_aircraft = aircraft.clone();
                self.revision += 1;
            }

            // only after imports - the break is already there
            Some(last) if last.is_break() => {
                pruned = self.prune_if_full();
                self.samples.push( TrailSample::new( pos, timestamp, on_ground));
                self.last_aircraft = aircraft.clone();
                self.revision += 1;
            }

            Some(last) => {
                let (epsilon_pos, epsilon_time) = self.config.epsilons( on_ground);
                let distance = pos.distance_meters( last.position());
                let dt = timestamp.millis_since( last.timestamp()).abs();

                if distance > epsilon_pos && dt > epsilon_time {
                    let aircraft_changed = self.last_aircraft.is_valid() && self.last_aircraft.has_aircraft_changed( aircraft);
                    let jumped = distance > self.config.max_point_distance_meters();

                    if allow_split && jumped && (last.is_on_ground() || on_ground || aircraft_changed) {
                        debug!("splitting trail after jump of {:.0}m (last on ground: {}, on ground: {}, aircraft changed: {})",
                               distance, last.is_on_ground(), on_ground, aircraft_changed);
                        self.samples.push( TrailSample::new_break( timestamp, on_ground));
                        self.samples.push( TrailSample::new( pos, timestamp, on_ground));
                    } else {
                        pruned = self.prune_if_full();
                        self.samples.push( TrailSample::new( pos, timestamp, on_ground));
                    }

                    self.last_aircraft = aircraft.clone();
                    self.revision += 1;
                }
            }
        }

        if pruned {
            self.calculate_max_altitude(); // pruned samples might have held the maximum
        } else if let Some(last) = self.samples.last() {
            if last.is_valid() {
                self.max_altitude = self.max_altitude.max( last.position().alt_meters());
            }
        }

        pruned
    }

    /// remove a block of the oldest samples if we are above the configured limit. This also removes
    /// any breaks the new head would start with
    fn prune_if_full (&mut self)->bool {
        if self.samples.len() > self.config.max_entries {
            let n = self.config.prune_block.min( self.samples.len());
            self.samples.drain( ..n);

            let n_breaks = self.samples.iter().take_while( |s| s.is_break()).count();
            self.samples.drain( ..n_breaks);

            debug!("pruned {} trail samples, {} remaining", n + n_breaks, self.samples.len());
            true
        } else {
            false
        }
    }

    //--- bulk mutation

    /// remove all samples. The last aircraft is kept so that a following append can still detect aircraft changes
    pub fn clear_trail (&mut self) {
        self.samples.clear();
        self.max_altitude = 0.0;
        self.revision += 1;
    }

    /// replace contents with the given samples (e.g. from a decoder) and recompute the maximum altitude
    pub fn set_samples (&mut self, samples: Vec<TrailSample>) {
        self.samples = samples;
        self.calculate_max_altitude();
        self.revision += 1;
    }

    pub fn calculate_max_altitude (&mut self) {
        self.max_altitude = self.samples.iter()
            .filter( |s| s.is_valid())
            .fold( 0.0, |max,s| f64::max( max, s.position().alt_meters()));
    }

    //--- serialization

    /// serialize all samples in the current format version
    pub fn to_bytes (&self)->Bytes { codec::encode( &self.samples) }

    /// replace contents by decoding `bytes`. If the data cannot be decoded the trail is left empty
    pub fn read_from_bytes (&mut self, bytes: &[u8])->Result<FormatVersion> {
        self.clear_trail();

        match codec::decode( bytes) {
            Ok(decoded) => {
                if decoded.version != FormatVersion::CURRENT {
                    info!("converting trail from format version {}", decoded.version.tag());
                }
                self.set_samples( decoded.samples);
                Ok(decoded.version)
            }
            Err(e) => {
                warn!("cannot read trail: {}", e);
                Err(e)
            }
        }
    }
}

impl Default for AircraftTrail {
    fn default()->Self { AircraftTrail::new( TrailConfig::default()) }
}
