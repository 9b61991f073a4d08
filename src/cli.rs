//! Command-line flags and the one-shot query mode.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use std::{io::Write, path::PathBuf};

use crate::iss::{
    client::IssApi,
    types::{CrewMember, Observer},
};

#[derive(Debug, Parser)]
#[command(
    name = "iss_tracker",
    about = "Track the International Space Station on a small monochrome panel",
    version
)]
pub struct Cli {
    /// Print the current ISS position and exit.
    #[arg(short, long)]
    pub location: bool,

    /// Print the people currently in space, grouped by craft, and exit.
    #[arg(short, long)]
    pub people: bool,

    /// Print upcoming pass times over LAT LONG and exit.
    #[arg(
        short = 't',
        long,
        num_args = 2,
        value_names = ["LAT", "LONG"],
        allow_negative_numbers = true
    )]
    pub passtime: Option<Vec<f64>>,

    /// Config file to load (created with defaults when missing).
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

impl Cli {
    /// Any query flag switches from the panel to a one-shot print.
    pub fn is_query(&self) -> bool {
        self.location || self.people || self.passtime.is_some()
    }

    fn pass_observer(&self) -> Option<Observer> {
        match self.passtime.as_deref() {
            Some([latitude, longitude]) => Some(Observer {
                latitude: *latitude,
                longitude: *longitude,
            }),
            _ => None,
        }
    }
}

/// Run every requested query in flag order and print the results.
pub async fn run_query<W: Write>(cli: &Cli, api: &dyn IssApi, out: &mut W) -> Result<()> {
    if cli.location {
        let pos = api.position().await?;
        writeln!(
            out,
            "The ISS current location at {} UTC is {} lat, {} long",
            utc_stamp(&pos.timestamp),
            pos.latitude,
            pos.longitude
        )?;
    }

    if cli.people {
        let crew = api.crew().await?;
        writeln!(out, "People in the ISS:")?;
        for (craft, names) in group_by_craft(&crew) {
            writeln!(out, "CRAFT: {craft}")?;
            for name in names {
                writeln!(out, "- {name}")?;
            }
        }
    }

    if let Some(observer) = cli.pass_observer() {
        let passes = api.passes(observer).await?;
        writeln!(
            out,
            "ISS will be seen on {} lat, {} long during this times:",
            observer.latitude, observer.longitude
        )?;
        for pass in passes {
            writeln!(
                out,
                "time: {} - duration: {} seconds",
                utc_stamp(&pass.rise_time),
                pass.duration_secs
            )?;
        }
    }

    Ok(())
}

fn utc_stamp(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Consecutive runs of the same craft, in API order.
fn group_by_craft(crew: &[CrewMember]) -> Vec<(&str, Vec<&str>)> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for member in crew {
        match groups.last_mut() {
            Some((craft, names)) if *craft == member.craft => names.push(member.name.as_str()),
            _ => groups.push((member.craft.as_str(), vec![member.name.as_str()])),
        }
    }
    groups
}
