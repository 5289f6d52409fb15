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

//! versioned binary format of persisted trails.
//! 
//! Layout (big endian): `[magic: u32][version: u16][sample]*` without length prefix or checksum. The
//! end of the data is the end of the sample sequence. Per sample layouts are
//! 
//! | version | position              | timestamp         | ground |
//! |---------|-----------------------|-------------------|--------|
//! | 2       | lon,lat,alt as f32    | u32 epoch seconds | u8     |
//! | 3       | lon,lat,alt as f32    | i64 epoch millis  | u8     |
//! | 4       | lon,lat,alt as f64    | i64 epoch millis  | u8     |
//! 
//! We can read all versions but always write the newest one.

use bytes::{Buf,BufMut,Bytes,BytesMut};

use crate::datetime::EpochMillis;
use crate::errors::{OdinTrailError,Result};
use crate::geo::{GeoPos,GeoPos32};
use crate::sample::TrailSample;

pub const FILE_MAGIC_NUMBER: u32 = 0x5B6C1A2B;

const HEADER_LEN: usize = 6;

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
#[repr(u16)]
pub enum FormatVersion {
    /// single precision coordinates, 32 bit second timestamps
    SecondsSingle = 2,
    /// single precision coordinates, 64 bit millisecond timestamps
    MillisSingle = 3,
    /// double precision coordinates, 64 bit millisecond timestamps
    MillisDouble = 4,
}

impl FormatVersion {
    pub const CURRENT: FormatVersion = FormatVersion::MillisDouble;

    #[inline] pub fn tag (&self)->u16 { *self as u16 }

    /// number of bytes per sample
    pub fn sample_len (&self)->usize {
        match self {
            FormatVersion::SecondsSingle => 12 + 4 + 1,
            FormatVersion::MillisSingle => 12 + 8 + 1,
            FormatVersion::MillisDouble => 24 + 8 + 1,
        }
    }
}

impl TryFrom<u16> for FormatVersion {
    type Error = OdinTrailError;

    fn try_from (tag: u16)->Result<Self> {
        match tag {
            2 => Ok(FormatVersion::SecondsSingle),
            3 => Ok(FormatVersion::MillisSingle),
            4 => Ok(FormatVersion::MillisDouble),
            _ => Err(OdinTrailError::InvalidVersion(tag))
        }
    }
}

/// the result of decoding a trail. The version is returned explicitly so that callers (e.g. converters)
/// can see which format generation they read
#[derive(Debug,Clone)]
pub struct Decoded {
    pub version: FormatVersion,
    pub samples: Vec<TrailSample>,
}

pub fn encode (samples: &[TrailSample])->Bytes {
    let version = FormatVersion::CURRENT;
    let mut buf = BytesMut::with_capacity( HEADER_LEN + samples.len() * version.sample_len());

    buf.put_u32( FILE_MAGIC_NUMBER);
    buf.put_u16( version.tag());
    for sample in samples {
        write_sample( &mut buf, sample);
    }

    buf.freeze()
}

fn write_sample (buf: &mut BytesMut, sample: &TrailSample) {
    let pos = sample.position();
    buf.put_f64( pos.lon_degrees());
    buf.put_f64( pos.lat_degrees());
    buf.put_f64( pos.alt_meters());
    buf.put_i64( sample.timestamp().millis());
    buf.put_u8( sample.is_on_ground() as u8);
}

/// decode a complete trail. Bad magic numbers and unknown versions are errors, an incomplete
/// trailing sample is dropped
pub fn decode (mut buf: &[u8])->Result<Decoded> {
    if buf.remaining() < HEADER_LEN { 
        return Err( OdinTrailError::TruncatedData( buf.remaining())) 
    }

    let magic = buf.get_u32();
    if magic != FILE_MAGIC_NUMBER {
        return Err( OdinTrailError::InvalidMagic(magic))
    }
    let version = FormatVersion::try_from( buf.get_u16())?;

    let mut samples = Vec::with_capacity( buf.remaining() / version.sample_len());
    while let Some(sample) = read_sample( &mut buf, version) {
        samples.push( sample);
    }

    if buf.has_remaining() {
        warn!("ignoring {} bytes of incomplete trail sample", buf.remaining());
    }

    Ok( Decoded { version, samples })
}

/// read the next sample in the given format version, or `None` if there are not enough bytes left.
/// Positions are converted to the current double precision representation
pub fn read_sample (buf: &mut &[u8], version: FormatVersion)->Option<TrailSample> {
    if buf.remaining() < version.sample_len() { return None }

    let sample = match version {
        FormatVersion::MillisDouble => {
            let pos = GeoPos::from_lon_lat_degrees_alt_meters( buf.get_f64(), buf.get_f64(), buf.get_f64());
            let timestamp = EpochMillis::new( buf.get_i64());
            let on_ground = buf.get_u8() != 0;

            // earlier writers did store garbage and 0/0 positions - turn them into breaks
            if !pos.is_valid_range() || pos.is_null() {
                TrailSample::new_break( timestamp, on_ground)
            } else {
                TrailSample::new( pos, timestamp, on_ground)
            }
        }
        FormatVersion::MillisSingle => {
            let pos = read_pos32( buf);
            let timestamp = EpochMillis::new( buf.get_i64());
            let on_ground = buf.get_u8() != 0;
            TrailSample::new( pos.into(), timestamp, on_ground)
        }
        FormatVersion::SecondsSingle => {
            let pos = read_pos32( buf);
            let timestamp = EpochMillis::from_secs( buf.get_u32() as i64);
            let on_ground = buf.get_u8() != 0;
            TrailSample::new( pos.into(), timestamp, on_ground)
        }
    };

    Some(sample)
}

fn read_pos32 (buf: &mut &[u8])->GeoPos32 {
    GeoPos32::from_lon_lat_degrees_alt_meters( buf.get_f32(), buf.get_f32(), buf.get_f32())
}
