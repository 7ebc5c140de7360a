use clap::{Parser, Subcommand};
use rackplan::commands::grid::parse_width;
use std::path::PathBuf;

fn width_arg(raw: &str) -> Result<f64, String> {
    parse_width(raw).map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "rackplan", version)]
#[command(about = "Lay out warehouse shelves on a square grid", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $RACKPLAN_HOME, then the platform data dir)
    #[arg(long, global = true, env = "RACKPLAN_HOME")]
    pub dir: Option<PathBuf>,

    /// Available surface width in pixels (overrides config)
    #[arg(long, global = true, allow_hyphen_values = true, value_parser = width_arg)]
    pub width: Option<f64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Define the warehouse grid (N x N cells)
    #[command(alias = "g")]
    Grid {
        /// Cells per side
        #[arg(allow_hyphen_values = true)]
        size: String,
    },

    /// Add a shelf at the first free cell
    #[command(alias = "a")]
    Add {
        /// horizontal (h) or vertical (v)
        orientation: String,
    },

    /// Add a door unit (always vertical) at the first free cell
    Door,

    /// Drop a shelf with its top-left corner at pixel (x, y)
    #[command(alias = "mv")]
    Move {
        /// Shelf id or unique id prefix
        shelf: String,
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
    },

    /// Drag whatever shelf is under (x0, y0) and release it at (x1, y1)
    Drag {
        #[arg(allow_hyphen_values = true)]
        x0: f64,
        #[arg(allow_hyphen_values = true)]
        y0: f64,
        #[arg(allow_hyphen_values = true)]
        x1: f64,
        #[arg(allow_hyphen_values = true)]
        y1: f64,
    },

    /// List shelves
    #[command(alias = "ls")]
    List,

    /// Draw the layout
    Show {
        /// Hide the grid overlay
        #[arg(long)]
        no_grid: bool,

        /// Turn the view clockwise by 0, 90, 180 or 270 degrees
        #[arg(long, default_value_t = 0)]
        rotate: u16,
    },

    /// Remove the grid and every shelf
    Reset,

    /// Get or set configuration
    Config {
        /// Configuration key (width, revert-ms)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_accepts_positive_values() {
        let cli = Cli::try_parse_from(["rackplan", "--width", "640", "list"]).unwrap();
        assert_eq!(cli.width, Some(640.0));
    }

    #[test]
    fn width_rejects_negative_and_zero() {
        for args in [
            vec!["rackplan", "--width", "-300", "list"],
            vec!["rackplan", "--width=-300", "list"],
            vec!["rackplan", "--width", "0", "show"],
            vec!["rackplan", "--width", "NaN", "show"],
        ] {
            let err = Cli::try_parse_from(args.iter().copied()).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{args:?}");
        }
    }
}
