//! Command line definitions

use clap::{Parser, Subcommand};
use rclink::Command;
use std::path::PathBuf;

/// Drive the car and read its telemetry over TCP
#[derive(Parser, Debug)]
#[command(name = "rclink", version, about, long_about = None)]
pub struct Cli {
    /// Config file (JSON or TOML); defaults to the user config directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Device host, overriding the config file
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Device port, overriding the config file
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one directional command (forward, w, 87, ...)
    Send {
        /// Command name, key letter or key code
        command: Command,
    },

    /// Request a single telemetry snapshot
    Poll {
        /// Request text (defaults to the configured request)
        #[arg(short, long)]
        message: Option<String>,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Poll telemetry on an interval until Ctrl-C
    Watch {
        /// Interval between polls in milliseconds
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Request text (defaults to the configured request)
        #[arg(short, long)]
        message: Option<String>,

        /// Print snapshots as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read w/a/s/d/x keystrokes from stdin and send them
    Drive,

    /// Write a config file with default values
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
