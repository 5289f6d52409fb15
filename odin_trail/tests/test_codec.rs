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

use bytes::{BufMut,BytesMut};
use odin_trail::{codec::{self, FILE_MAGIC_NUMBER}, AircraftTrail, EpochMillis, FormatVersion, GeoPos, OdinTrailError, TrailSample};

/// binary format tests
/// run with "cargo test --test test_codec -- --nocapture"

fn sample (lon: f64, lat: f64, alt: f64, ms: i64, on_ground: bool)->TrailSample {
    TrailSample::new( GeoPos::from_lon_lat_degrees_alt_meters( lon, lat, alt), EpochMillis::new(ms), on_ground)
}

fn filled_trail ()->AircraftTrail {
    let mut trail = AircraftTrail::default();
    trail.set_samples( vec![
        sample( -122.4194155, 37.7749295, 12.5, 1_700_000_000_123, true),
        sample( -122.3750, 37.6190, 1500.25, 1_700_000_060_000, false),
        TrailSample::new_break( EpochMillis::new( 1_700_000_060_000), false),
        sample( -121.9000, 37.3600, 3048.0, 1_700_000_120_500, false),
    ]);
    trail
}

fn header (buf: &mut BytesMut, version: u16) {
    buf.put_u32( FILE_MAGIC_NUMBER);
    buf.put_u16( version);
}

#[test]
fn test_round_trip () {
    let trail = filled_trail();
    let bytes = trail.to_bytes();
    assert_eq!( bytes.len(), 6 + trail.len() * FormatVersion::CURRENT.sample_len());

    let mut restored = AircraftTrail::default();
    let version = restored.read_from_bytes( &bytes).unwrap();
    assert_eq!( version, FormatVersion::CURRENT);
    assert_eq!( restored.len(), trail.len());

    for (a,b) in trail.samples().iter().zip( restored.samples().iter()) {
        assert_eq!( a.is_valid(), b.is_valid());
        assert_eq!( a.timestamp(), b.timestamp());
        assert_eq!( a.is_on_ground(), b.is_on_ground());
        if a.is_valid() {
            assert_eq!( a.position(), b.position());
        }
    }
    assert_eq!( restored.max_altitude_meters(), 3048.0);
}

#[test]
fn test_v2_seconds () {
    let mut buf = BytesMut::new();
    header( &mut buf, 2);
    buf.put_f32( -122.5); buf.put_f32( 37.25); buf.put_f32( 1000.0);
    buf.put_u32( 1_700_000_000);
    buf.put_u8( 0);
    buf.put_f32( f32::MAX); buf.put_f32( f32::MAX); buf.put_f32( f32::MAX); // break
    buf.put_u32( 1_700_000_010);
    buf.put_u8( 1);

    let mut trail = AircraftTrail::default();
    let version = trail.read_from_bytes( &buf).unwrap();
    assert_eq!( version, FormatVersion::SecondsSingle);
    assert_eq!( trail.len(), 2);

    let s = &trail.samples()[0];
    assert!( s.is_valid());
    assert_eq!( s.timestamp().millis(), 1_700_000_000 * 1000);
    assert_eq!( s.position().lon_degrees(), -122.5);
    assert_eq!( s.position().lat_degrees(), 37.25);
    assert!( !s.is_on_ground());

    let s = &trail.samples()[1];
    assert!( s.is_break());
    assert_eq!( s.timestamp().millis(), 1_700_000_010_000);
    assert!( s.is_on_ground());

    assert_eq!( trail.max_altitude_meters(), 1000.0);
}

#[test]
fn test_v3_millis () {
    let mut buf = BytesMut::new();
    header( &mut buf, 3);
    buf.put_f32( 8.5); buf.put_f32( 47.25); buf.put_f32( 420.0);
    buf.put_i64( 1_700_000_000_250);
    buf.put_u8( 1);

    let mut trail = AircraftTrail::default();
    assert_eq!( trail.read_from_bytes( &buf).unwrap(), FormatVersion::MillisSingle);
    assert_eq!( trail.len(), 1);
    assert_eq!( trail.samples()[0].timestamp().millis(), 1_700_000_000_250);
    assert_eq!( trail.samples()[0].position().alt_meters(), 420.0);
    assert!( trail.samples()[0].is_on_ground());
}

#[test]
fn test_v4_repair () {
    let mut buf = BytesMut::new();
    header( &mut buf, 4);
    for (lon,lat) in [(8.5, 47.25), (0.0, 0.0), (500.0, 47.0)] {
        buf.put_f64( lon); buf.put_f64( lat); buf.put_f64( 100.0);
        buf.put_i64( 1_700_000_000_000);
        buf.put_u8( 0);
    }

    let decoded = codec::decode( &buf).unwrap();
    assert_eq!( decoded.samples.len(), 3);
    assert!( decoded.samples[0].is_valid());
    assert!( decoded.samples[1].is_break());
    assert!( decoded.samples[2].is_break());
}

#[test]
fn test_invalid_magic () {
    let mut trail = filled_trail();

    let mut buf = BytesMut::new();
    buf.put_u32( 0xDEADBEEF);
    buf.put_u16( 4);

    match trail.read_from_bytes( &buf) {
        Err(OdinTrailError::InvalidMagic(magic)) => assert_eq!( magic, 0xDEADBEEF),
        other => panic!("unexpected result {:?}", other)
    }
    assert!( trail.is_empty());
    assert_eq!( trail.max_altitude_meters(), 0.0);
}

#[test]
fn test_invalid_version () {
    let mut trail = filled_trail();

    let mut buf = BytesMut::new();
    header( &mut buf, 7);
    buf.put_bytes( 0, 33);

    match trail.read_from_bytes( &buf) {
        Err(e @ OdinTrailError::InvalidVersion(7)) => assert!( e.is_format_error()),
        other => panic!("unexpected result {:?}", other)
    }
    assert!( trail.is_empty());
}

#[test]
fn test_truncated () {
    let mut trail = AircraftTrail::default();
    assert!( matches!( trail.read_from_bytes( &[0x5B, 0x6C]), Err(OdinTrailError::TruncatedData(2))));

    // incomplete last sample is dropped
    let bytes = filled_trail().to_bytes();
    let cut = &bytes[..bytes.len() - 5];
    assert_eq!( trail.read_from_bytes( cut).unwrap(), FormatVersion::CURRENT);
    assert_eq!( trail.len(), 3);
    assert_eq!( trail.max_altitude_meters(), 1500.25);
}
