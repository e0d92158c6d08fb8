//! Viewer configuration loaded from environment variables.

use std::str::FromStr;

use crate::projection::ProjectionMode;

/// Viewer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Degrees per rotate key press.
    pub rotate_step: f32,
    /// Normalized units per move key press.
    pub move_step: f32,
    /// Factor applied by the scale-up key; scale-down uses its inverse.
    pub scale_step: f32,
    /// Target frames per second.
    pub fps: u32,
    /// Projection used on startup.
    pub projection: ProjectionMode,
    /// Whether vertices are marked on startup.
    pub show_vertices: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            rotate_step: 5.0,
            move_step: 0.1,
            scale_step: 1.1,
            fps: 30,
            projection: ProjectionMode::Parallel,
            show_vertices: false,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from `OBJVIEW_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup. Missing or unparseable
    /// values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let scale_step = parse_or(&lookup, "OBJVIEW_SCALE_STEP", defaults.scale_step);

        Self {
            rotate_step: parse_or(&lookup, "OBJVIEW_ROTATE_STEP", defaults.rotate_step),
            move_step: parse_or(&lookup, "OBJVIEW_MOVE_STEP", defaults.move_step),
            // A step of 1 or less would make scale-up shrink the mesh.
            scale_step: if scale_step > 1.0 {
                scale_step
            } else {
                defaults.scale_step
            },
            fps: parse_or(&lookup, "OBJVIEW_FPS", defaults.fps).clamp(1, 120),
            projection: match lookup("OBJVIEW_PROJECTION").as_deref() {
                Some("central") | Some("perspective") => ProjectionMode::Central,
                Some("parallel") | Some("orthographic") => ProjectionMode::Parallel,
                _ => defaults.projection,
            },
            show_vertices: match lookup("OBJVIEW_SHOW_VERTICES").as_deref() {
                Some("1") | Some("true") | Some("yes") => true,
                Some("0") | Some("false") | Some("no") => false,
                _ => defaults.show_vertices,
            },
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
