/// Camera and projection onto terminal cells
use nalgebra::{Matrix4, Point3, Vector3};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Half-height of the parallel view volume; a normalized mesh fits in the
/// unit sphere so this leaves a small margin.
const PARALLEL_HALF_HEIGHT: f32 = 1.2;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Orthographic: parallel lines stay parallel
    Parallel,
    /// Perspective: distant geometry shrinks
    Central,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Parallel => Self::Central,
            Self::Central => Self::Parallel,
        }
    }
}

/// Camera looking at the origin down the negative Z axis
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u16, height: u16, mode: ProjectionMode) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 3.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: std::f32::consts::FRAC_PI_4,
            aspect: cell_aspect(width, height),
            near: 0.1,
            far: 100.0,
            mode,
        }
    }

    /// Track a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.aspect = cell_aspect(width, height);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Central => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Parallel => {
                let half_width = PARALLEL_HALF_HEIGHT * self.aspect;
                Matrix4::new_orthographic(
                    -half_width,
                    half_width,
                    -PARALLEL_HALF_HEIGHT,
                    PARALLEL_HALF_HEIGHT,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a world-space point to (column, row, depth). Points outside
    /// the view volume yield `None`.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        width: usize,
        height: usize,
    ) -> Option<(f32, f32, f32)> {
        let view_projection = self.projection_matrix() * self.view_matrix();
        project(&view_projection, point, width, height)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(80, 24, ProjectionMode::Parallel)
    }
}

/// Project with a precomputed view-projection matrix.
pub fn project(
    view_projection: &Matrix4<f32>,
    point: &Point3<f32>,
    width: usize,
    height: usize,
) -> Option<(f32, f32, f32)> {
    let ndc = view_projection.transform_point(point);
    if !ndc.iter().all(|c| c.is_finite()) {
        return None;
    }
    if !(-1.0..=1.0).contains(&ndc.x)
        || !(-1.0..=1.0).contains(&ndc.y)
        || !(-1.0..=1.0).contains(&ndc.z)
    {
        return None;
    }

    let column = (ndc.x + 1.0) * 0.5 * (width.saturating_sub(1)) as f32;
    let row = (1.0 - ndc.y) * 0.5 * (height.saturating_sub(1)) as f32;
    Some((column, row, ndc.z))
}

fn cell_aspect(width: u16, height: u16) -> f32 {
    f32::from(width.max(1)) / (f32::from(height.max(1)) * CELL_ASPECT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(80, 20, ProjectionMode::Central);
        assert_eq!(camera.mode, ProjectionMode::Central);
        assert!((camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(ProjectionMode::Parallel.toggled(), ProjectionMode::Central);
        assert_eq!(ProjectionMode::Central.toggled(), ProjectionMode::Parallel);
    }

    #[test]
    fn test_origin_projects_to_center() {
        for mode in [ProjectionMode::Parallel, ProjectionMode::Central] {
            let camera = Camera::new(81, 41, mode);
            let (x, y, _) = camera
                .project_to_screen(&Point3::origin(), 81, 41)
                .unwrap();
            assert!((x - 40.0).abs() < 1e-3);
            assert!((y - 20.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_up_is_up_on_screen() {
        let camera = Camera::default();
        let (_, top, _) = camera
            .project_to_screen(&Point3::new(0.0, 0.5, 0.0), 80, 24)
            .unwrap();
        let (_, bottom, _) = camera
            .project_to_screen(&Point3::new(0.0, -0.5, 0.0), 80, 24)
            .unwrap();
        assert!(top < bottom);
    }

    #[test]
    fn test_behind_camera_is_clipped() {
        let camera = Camera::new(80, 24, ProjectionMode::Central);
        assert!(camera
            .project_to_screen(&Point3::new(0.0, 0.0, 10.0), 80, 24)
            .is_none());
    }
}
