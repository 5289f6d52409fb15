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

use chrono::{DateTime,Utc};
use odin_trail::{AircraftSnapshot, AircraftTrail, EpochMillis, GeoPos, TrailConfig};

/// ingestion tests for AircraftTrail
/// run with "cargo test --test test_trail -- --nocapture"

const T0: i64 = 1_700_000_000_000;

fn aircraft (lon: f64, lat: f64, alt: f64, dt_ms: i64, on_ground: bool)->AircraftSnapshot {
    let t = DateTime::<Utc>::from_timestamp_millis( T0 + dt_ms).unwrap();
    AircraftSnapshot::new( GeoPos::from_lon_lat_degrees_alt_meters( lon, lat, alt), on_ground, t)
        .with_identity( "Cessna 172SP", "N172SP", "C172", "C172")
}

#[test]
fn test_first_sample () {
    let mut trail = AircraftTrail::default();
    assert!( trail.is_empty());

    let pruned = trail.append_sample( &aircraft( -122.0, 37.0, 100.0, 0, true), true);
    assert!( !pruned);
    assert_eq!( trail.len(), 1);
    assert_eq!( trail.samples()[0].timestamp(), EpochMillis::new(T0));
    assert_eq!( trail.max_altitude_meters(), 100.0);
    assert_eq!( trail.last_aircraft().registration, "N172SP");
}

#[test]
fn test_rejected_snapshots () {
    let mut trail = AircraftTrail::default();

    // invalid position
    let invalid = AircraftSnapshot::new( GeoPos::INVALID, false, DateTime::<Utc>::from_timestamp_millis(T0).unwrap());
    trail.append_sample( &invalid, true);
    assert!( trail.is_empty());

    // null position without prior valid aircraft
    trail.append_sample( &aircraft( 0.0, 0.0, 0.0, 0, true), true);
    assert!( trail.is_empty());
    assert_eq!( trail.revision(), 0);
}

#[test]
fn test_noise_filter () {
    let mut trail = AircraftTrail::default();
    trail.append_sample( &aircraft( -122.0, 37.0, 10.0, 0, true), true);

    // ~0.5m apart and 100ms later while on ground
    trail.append_sample( &aircraft( -122.0, 37.0000045, 10.0, 100, true), true);
    assert_eq!( trail.len(), 1);

    // far enough in space but not in time
    trail.append_sample( &aircraft( -122.0, 37.001, 10.0, 200, true), true);
    assert_eq!( trail.len(), 1);

    // far enough in both
    trail.append_sample( &aircraft( -122.0, 37.001, 10.0, 1000, true), true);
    assert_eq!( trail.len(), 2);

    // airborne thresholds are larger: ~55m in 3s is dropped
    trail.append_sample( &aircraft( -122.0, 37.0015, 500.0, 4000, false), true);
    assert_eq!( trail.len(), 2);
}

#[test]
fn test_split_on_ground () {
    let mut trail = AircraftTrail::default();
    trail.append_sample( &aircraft( -122.0, 37.0, 10.0, 0, true), true);

    // ~22km teleport on ground
    trail.append_sample( &aircraft( -122.0, 37.2, 10.0, 10_000, true), true);
    assert_eq!( trail.len(), 3);
    assert!( trail.samples()[1].is_break());
    assert!( trail.samples()[2].is_valid());
    assert_eq!( trail.geometry().iter().count(), 2);
}

#[test]
fn test_no_split_when_not_allowed () {
    let mut trail = AircraftTrail::default();
    trail.append_sample( &aircraft( -122.0, 37.0, 10.0, 0, true), false);
    trail.append_sample( &aircraft( -122.0, 37.2, 10.0, 10_000, true), false);
    assert_eq!( trail.len(), 2);
    assert!( trail.samples().iter().all( |s| s.is_valid()));
}

#[test]
fn test_no_split_while_flying () {
    let mut trail = AircraftTrail::default();
    trail.append_sample( &aircraft( -122.0, 37.0, 3000.0, 0, false), true);

    // time warp at altitude with the same aircraft
    trail.append_sample( &aircraft( -122.0, 37.5, 3000.0, 10_000, false), true);
    assert_eq!( trail.len(), 2);
    assert!( trail.samples().iter().all( |s| s.is_valid()));
}

#[test]
fn test_split_on_aircraft_change () {
    let mut trail = AircraftTrail::default();
    trail.append_sample( &aircraft( -122.0, 37.0, 3000.0, 0, false), true);

    let other = aircraft( -122.0, 37.5, 3000.0, 10_000, false).with_identity( "Boeing 737-800", "N737BA", "B738", "B738");
    trail.append_sample( &other, true);
    assert_eq!( trail.len(), 3);
    assert!( trail.samples()[1].is_break());
    assert_eq!( trail.last_aircraft().registration, "N737BA");
}

#[test]
fn test_prune () {
    let config = TrailConfig { max_entries: 5, prune_block: 2, ..TrailConfig::default() };
    let mut trail = AircraftTrail::new( config);

    for i in 0..6 {
        let pruned = trail.append_sample( &aircraft( -122.0, 37.0 + i as f64 * 0.01, 1000.0 + i as f64, i * 10_000, false), true);
        assert!( !pruned);
    }
    assert_eq!( trail.len(), 6);

    let pruned = trail.append_sample( &aircraft( -122.0, 37.06, 1006.0, 60_000, false), true);
    assert!( pruned);
    assert_eq!( trail.len(), 5); // 6 - 2 + 1
    assert_eq!( trail.samples()[0].timestamp(), EpochMillis::new( T0 + 20_000));
}

#[test]
fn test_prune_strips_leading_breaks () {
    let config = TrailConfig { max_entries: 3, prune_block: 1, ..TrailConfig::default() };
    let mut trail = AircraftTrail::new( config);

    trail.append_sample( &aircraft( -122.0, 37.0, 10.0, 0, true), true);
    trail.append_sample( &aircraft( -122.0, 37.2, 10.0, 10_000, true), true); // splits: [a, break, b]
    trail.append_sample( &aircraft( -122.0, 37.201, 10.0, 20_000, true), true);
    assert_eq!( trail.len(), 4);

    // removes a, then the now leading break
    let pruned = trail.append_sample( &aircraft( -122.0, 37.202, 10.0, 30_000, true), true);
    assert!( pruned);
    assert_eq!( trail.len(), 3);
    assert!( trail.samples().iter().all( |s| s.is_valid()));
}

#[test]
fn test_prune_block_clamped () {
    let config = TrailConfig { max_entries: 2, ..TrailConfig::default() }; // prune_block 200 > len
    let mut trail = AircraftTrail::new( config);

    for i in 0..3 {
        trail.append_sample( &aircraft( -122.0, 37.0 + i as f64 * 0.01, 1000.0, i * 10_000, false), true);
    }
    assert_eq!( trail.len(), 3);

    let pruned = trail.append_sample( &aircraft( -122.0, 37.03, 1000.0, 30_000, false), true);
    assert!( pruned);
    assert_eq!( trail.len(), 1);
}

#[test]
fn test_default_prune_block () {
    let config = TrailConfig { max_entries: 250, ..TrailConfig::default() };
    assert_eq!( config.prune_block, 200);
    let mut trail = AircraftTrail::new( config);

    for i in 0..251 {
        let pruned = trail.append_sample( &aircraft( -122.0, 30.0 + i as f64 * 0.01, 1000.0, i * 10_000, false), true);
        assert!( !pruned);
    }
    assert_eq!( trail.len(), 251);

    let pruned = trail.append_sample( &aircraft( -122.0, 32.51, 1000.0, 2_510_000, false), true);
    assert!( pruned);
    assert_eq!( trail.len(), 251 - 200 + 1);
    assert_eq!( trail.samples()[0].timestamp(), EpochMillis::new( T0 + 200 * 10_000));
}

#[test]
fn test_max_altitude () {
    let config = TrailConfig { max_entries: 3, prune_block: 2, ..TrailConfig::default() };
    let mut trail = AircraftTrail::new( config);

    let alts = [ 5000.0, 1000.0, 2000.0, 1500.0 ];
    for (i,alt) in alts.iter().enumerate() {
        trail.append_sample( &aircraft( -122.0, 37.0 + i as f64 * 0.01, *alt, i as i64 * 10_000, false), true);
    }
    assert_eq!( trail.max_altitude_meters(), 5000.0);

    // this prunes the 5000m sample
    trail.append_sample( &aircraft( -122.0, 37.05, 1200.0, 50_000, false), true);
    let expected = trail.samples().iter().filter( |s| s.is_valid()).map( |s| s.position().alt_meters()).fold( 0.0, f64::max);
    assert_eq!( trail.max_altitude_meters(), expected);
    assert_eq!( expected, 2000.0);

    trail.clear_trail();
    assert_eq!( trail.max_altitude_meters(), 0.0);
}

#[test]
fn test_clear_keeps_last_aircraft () {
    let mut trail = AircraftTrail::default();
    trail.append_sample( &aircraft( -122.0, 37.0, 10.0, 0, true), true);
    let rev = trail.revision();

    trail.clear_trail();
    assert!( trail.is_empty());
    assert!( trail.revision() > rev);
    assert!( trail.last_aircraft().is_valid());
}

#[test]
fn test_clone_is_deep () {
    let mut trail = AircraftTrail::with_max_entries( 100);
    trail.append_sample( &aircraft( -122.0, 37.0, 10.0, 0, true), true);
    trail.append_sample( &aircraft( -122.0, 37.01, 10.0, 10_000, true), true);

    let copy = trail.clone();
    trail.clear_trail();

    assert_eq!( copy.len(), 2);
    assert_eq!( copy.max_entries(), 100);
    assert_eq!( copy.last_aircraft().registration, "N172SP");
    assert!( trail.is_empty());
}
