use std::path::PathBuf;
use std::str::FromStr;

use ambience_common::ThemeMode;
use clap::{Parser, Subcommand, ValueEnum};

/// Ambience: inspect and edit persisted visitor display preferences.
#[derive(Parser, Debug)]
#[command(name = "ambience", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Preference store path override.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Log level override (e.g. debug, ambience=trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every preference as currently resolved.
    Show {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Set the color theme (light, dark, auto).
    Theme { mode: ThemeMode },
    /// Set the accent hue in degrees.
    Hue {
        #[arg(allow_negative_numbers = true)]
        degrees: i32,
    },
    /// Set the background blur radius in pixels.
    Blur {
        #[arg(allow_negative_numbers = true)]
        px: i32,
    },
    /// Select or toggle the background: next, prev, on, off or an index.
    Background {
        #[arg(allow_negative_numbers = true)]
        target: BackgroundTarget,
    },
    /// Turn rainbow hue cycling on or off.
    Rainbow {
        state: Toggle,
        /// Run the animation for this many milliseconds and report the hue.
        #[arg(long)]
        preview_ms: Option<u64>,
    },
    /// Turn the rain overlay on or off.
    Rain { state: Toggle },
    /// Adjust rain parameters; omitted fields keep their current value.
    RainConfig {
        #[arg(long)]
        count: Option<f64>,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        length: Option<f64>,
        #[arg(long)]
        speed: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        angle: Option<f64>,
    },
    /// Forget every stored preference.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundTarget {
    Next,
    Prev,
    On,
    Off,
    Index(i64),
}

impl FromStr for BackgroundTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" => Ok(BackgroundTarget::Next),
            "prev" | "previous" => Ok(BackgroundTarget::Prev),
            "on" => Ok(BackgroundTarget::On),
            "off" => Ok(BackgroundTarget::Off),
            other => other.parse().map(BackgroundTarget::Index).map_err(|_| {
                format!("expected next, prev, on, off or an index, got '{s}'")
            }),
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_target_parsing() {
        assert_eq!("next".parse::<BackgroundTarget>(), Ok(BackgroundTarget::Next));
        assert_eq!("Previous".parse::<BackgroundTarget>(), Ok(BackgroundTarget::Prev));
        assert_eq!("off".parse::<BackgroundTarget>(), Ok(BackgroundTarget::Off));
        assert_eq!("-1".parse::<BackgroundTarget>(), Ok(BackgroundTarget::Index(-1)));
        assert!("sideways".parse::<BackgroundTarget>().is_err());
    }

    #[test]
    fn parses_subcommands_with_globals() {
        let args = Args::try_parse_from([
            "ambience",
            "--store",
            "/tmp/prefs.json",
            "rain-config",
            "--count",
            "300",
            "--angle",
            "-0.3",
        ])
        .unwrap();
        assert_eq!(args.store, Some(PathBuf::from("/tmp/prefs.json")));
        match args.command {
            Command::RainConfig { count, angle, width, .. } => {
                assert_eq!(count, Some(300.0));
                assert_eq!(angle, Some(-0.3));
                assert_eq!(width, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_negative_hue_and_theme() {
        let args = Args::try_parse_from(["ambience", "hue", "-20"]).unwrap();
        assert!(matches!(args.command, Command::Hue { degrees: -20 }));

        let args = Args::try_parse_from(["ambience", "theme", "dark"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Theme {
                mode: ThemeMode::Dark
            }
        ));
        assert!(Args::try_parse_from(["ambience", "theme", "sepia"]).is_err());
    }

    #[test]
    fn parses_rainbow_preview() {
        let args =
            Args::try_parse_from(["ambience", "rainbow", "on", "--preview-ms", "500"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Rainbow {
                state: Toggle::On,
                preview_ms: Some(500)
            }
        ));
    }
}
