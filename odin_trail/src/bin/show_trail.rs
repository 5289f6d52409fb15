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

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use odin_trail::{load_config, AircraftTrail, FileRoller, FormatVersion, GeoPos, TrailConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "show summary of an aircraft trail file, optionally convert it to the current format")]
pub struct Args {
    /// export trail as JSON track list
    #[arg(long)]
    pub json: bool,

    /// rewrite file in current format version
    #[arg(long)]
    pub convert: bool,

    /// number of backups to keep when converting (defaults to config)
    #[arg(long)]
    pub backups: Option<usize>,

    /// trail config (RON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// trail file to read
    pub path: PathBuf,
}

fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config( path)?,
        None => TrailConfig::default()
    };
    let num_backups = args.backups.unwrap_or( config.num_backup_files);

    let mut trail = AircraftTrail::new( config);
    let version = trail.load_from_file( &args.path)?;

    if args.json {
        let export = trail.to_track_export( Vec::<GeoPos>::new());
        println!("{}", serde_json::to_string_pretty( &export)?);
    } else {
        let geometry = trail.geometry();
        println!("file:          {:?}", args.path);
        println!("version:       {}", version.tag());
        println!("samples:       {}", trail.len());
        println!("polylines:     {}", geometry.iter().count());
        println!("points:        {}", geometry.n_points());
        println!("max altitude:  {:.0} m", trail.max_altitude_meters());
        if let (Some(first),Some(last)) = (trail.first_valid(), trail.last_valid()) {
            println!("time range:    {} - {}", first.timestamp(), last.timestamp());
        }
        if let Some(bounds) = geometry.bounds() {
            println!("bounds:        {:?}", bounds);
        }
    }

    if args.convert {
        if version == FormatVersion::CURRENT {
            println!("{:?} already in current format", args.path);
        } else {
            FileRoller::new( num_backups).roll_file( &args.path)?;
            trail.save_to_file( &args.path)?;
            println!("converted {:?} to format version {}", args.path, FormatVersion::CURRENT.tag());
        }
    }

    Ok(())
}
