/// Command line configuration
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use wirecube_core::{Axis, SceneConfig};

use crate::error::{AppError, Result};

/// Frames advanced by `--headless` when `--frames` is not given
pub const DEFAULT_HEADLESS_FRAMES: u64 = 600;

#[derive(Debug, Parser)]
#[clap(name = "wirecube", version, about = "Animated wireframe cube in the terminal")]
pub struct Cli {
    /// Target frames per second
    #[clap(long, default_value = "60")]
    pub fps: f32,

    /// Distance each point moves per axis per frame
    #[clap(long, default_value = "0.01")]
    pub step: f32,

    /// Display rotation axis: x, y, y-observed or z
    #[clap(long, default_value = "z")]
    pub axis: Axis,

    /// Offset the cube slides to, as x,y,z (points only move toward larger coordinates)
    #[clap(long, default_value = "5,0,0", allow_hyphen_values = true)]
    pub translate: Translation,

    /// Half the side length of the cube faces
    #[clap(long, default_value = "2")]
    pub size: f32,

    /// Distance between the front and back faces
    #[clap(long, default_value = "5")]
    pub depth: f32,

    /// Initial display rotation in degrees
    #[clap(long, default_value = "0", allow_hyphen_values = true)]
    pub start_angle: f32,

    /// Stop after this many frames
    #[clap(long)]
    pub frames: Option<u64>,

    /// Advance the scene without a terminal and print the final points
    #[clap(long)]
    pub headless: bool,
}

impl Cli {
    pub fn validate(&self) -> Result<()> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(AppError::InvalidArgument(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        if self.frames == Some(0) {
            return Err(AppError::InvalidArgument(
                "frames must be at least 1".to_string(),
            ));
        }
        self.run_settings()?;
        Ok(())
    }

    pub fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            half_extent: self.size,
            depth: self.depth,
            translation: self.translate.0,
            step: self.step,
            axis: self.axis,
            start_angle: self.start_angle,
            ..SceneConfig::default()
        }
    }

    pub fn run_settings(&self) -> Result<RunSettings> {
        let frame_interval = Duration::try_from_secs_f32(1.0 / self.fps).map_err(|e| {
            AppError::InvalidArgument(format!(
                "fps {} gives no usable frame interval: {}",
                self.fps, e
            ))
        })?;
        Ok(RunSettings {
            frame_interval,
            frame_limit: self.frames,
        })
    }

    pub fn headless_frames(&self) -> u64 {
        self.frames.unwrap_or(DEFAULT_HEADLESS_FRAMES)
    }
}

/// Frame loop timing for the interactive front end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSettings {
    pub frame_interval: Duration,
    pub frame_limit: Option<u64>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(1000 / 60),
            frame_limit: None,
        }
    }
}

/// Translation vector parsed from `x,y,z`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation(pub [f32; 3]);

impl FromStr for Translation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected x,y,z but got '{}'", s));
        }
        let mut values = [0.0f32; 3];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part
                .parse()
                .map_err(|e| format!("invalid component '{}': {}", part, e))?;
        }
        Ok(Translation(values))
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0[0], self.0[1], self.0[2])
    }
}
