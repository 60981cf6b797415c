// main.rs
//
// Command line front end: generate one profile from flags and print or write it.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use solid_profile::annotations::{Detail, annotate};
use solid_profile::io::{self, ProfileDocument};
use solid_profile::{ParameterSet, Preset, ProfileGenerator, ShapeConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Showcase,
    NarrowStraight,
    Straight,
    StraightTipTilt,
}

impl From<PresetArg> for Preset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Showcase => Preset::Showcase,
            PresetArg::NarrowStraight => Preset::NarrowStraight,
            PresetArg::Straight => Preset::Straight,
            PresetArg::StraightTipTilt => Preset::StraightTipTilt,
        }
    }
}

/// Generate the half-silhouette of a parametric solid of revolution.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Horizontal distance from the base to the rim
    #[arg(long, default_value_t = 140.0, allow_negative_numbers = true)]
    length: f64,
    /// Outer circumference of the shaft
    #[arg(long, default_value_t = 140.0, allow_negative_numbers = true)]
    circumference: f64,
    /// Bend along the middle of the shaft, degrees
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    shaft_curve: f64,
    /// Rigid bend at the base of the shaft, degrees
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    shaft_angle: f64,
    /// Tilt of the tip, degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    head_angle: f64,
    /// Radial scale of the shaft, percent
    #[arg(long, default_value_t = 100.0)]
    shaft_expansion: f64,
    /// Radial scale of the head, percent
    #[arg(long, default_value_t = 100.0)]
    head_expansion: f64,
    /// Pin a subset of the parameters before generating
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
    /// Reject out-of-range parameters and self-intersecting output
    #[arg(long)]
    strict: bool,
    /// Log the parameter callouts at info level
    #[arg(long)]
    describe: bool,
    /// Write to this file instead of stdout
    #[arg(long, short)]
    out: Option<PathBuf>,
}

impl Cli {
    fn parameters(&self) -> ParameterSet {
        let params = ParameterSet {
            length: self.length,
            circumference: self.circumference,
            shaft_curve: self.shaft_curve,
            shaft_angle: self.shaft_angle,
            head_angle: self.head_angle,
            shaft_expansion: self.shaft_expansion,
            head_expansion: self.head_expansion,
            ..ParameterSet::default()
        };
        match self.preset {
            Some(preset) => Preset::from(preset).apply(&params),
            None => params,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ShapeConfig::standard();
    let params = cli.parameters();

    if cli.strict {
        params.validate(config).context("parameters rejected")?;
    }

    let generator = ProfileGenerator::new(config);
    let profile = generator.generate(&params);

    if cli.strict {
        profile.validate().context("generated profile rejected")?;
    } else if let Err(err) = profile.validate() {
        tracing::warn!("{err}");
    }

    if cli.describe {
        for line in params.describe() {
            tracing::info!("{line}");
        }
        for note in annotate(&profile, &params, Detail::Full) {
            tracing::info!(
                x = note.anchor.x,
                y = note.anchor.y,
                "{}: {}",
                note.parameter,
                note.text
            );
        }
    }

    let text = match cli.format {
        Format::Csv => io::to_csv(&profile),
        Format::Json => io::to_json(&ProfileDocument {
            parameters: params,
            profile,
        })?,
    };

    match &cli.out {
        Some(path) => {
            io::write_text(path, &text).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        },
        None => print!("{text}"),
    }
    Ok(())
}
