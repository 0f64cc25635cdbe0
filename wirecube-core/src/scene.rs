/// Wireframe cube scene: geometry, targets and per-frame animation
use nalgebra::Point3;

use crate::animation::{RotationAngle, Stepper, Tracked, DEFAULT_STEP};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::rotation::Axis;

/// Corner of a cube face, in drawing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomRight => 2,
            Corner::BottomLeft => 3,
        }
    }

    /// Object-space (x, y) of this corner for a square of half side `half`
    fn xy(self, half: f32) -> (f32, f32) {
        match self {
            Corner::TopLeft => (-half, half),
            Corner::TopRight => (half, half),
            Corner::BottomRight => (half, -half),
            Corner::BottomLeft => (-half, -half),
        }
    }
}

/// Edge joining matching front and back corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::TopLeft, Edge::TopRight, Edge::BottomLeft, Edge::BottomRight];

    pub fn corner(self) -> Corner {
        match self {
            Edge::TopLeft => Corner::TopLeft,
            Edge::TopRight => Corner::TopRight,
            Edge::BottomLeft => Corner::BottomLeft,
            Edge::BottomRight => Corner::BottomRight,
        }
    }
}

/// How a renderer should join a primitive's points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Consecutive points joined, last back to first
    LineLoop,
    /// Points taken in independent pairs
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    FrontFace,
    BackFace,
    Edge(Edge),
}

impl Role {
    pub fn kind(self) -> PrimitiveKind {
        match self {
            Role::FrontFace | Role::BackFace => PrimitiveKind::LineLoop,
            Role::Edge(_) => PrimitiveKind::Lines,
        }
    }
}

/// A set of animated points drawn as one primitive
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub role: Role,
    pub points: Vec<Tracked>,
}

impl Primitive {
    pub fn new(role: Role, points: Vec<Tracked>) -> Self {
        Self { role, points }
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.role.kind()
    }
}

/// Cube dimensions and animation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Half the side length of each square face
    pub half_extent: f32,
    /// Distance from the front face (z = 0) back to the back face
    pub depth: f32,
    /// Offset added to every point to get its target
    pub translation: [f32; 3],
    /// Transform applied to points when computing targets and on every step
    pub basis: Matrix,
    pub step: f32,
    pub axis: Axis,
    pub start_angle: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            half_extent: 2.0,
            depth: 5.0,
            translation: [5.0, 0.0, 0.0],
            basis: Matrix::identity(3),
            step: DEFAULT_STEP,
            axis: Axis::Z,
            start_angle: 0.0,
        }
    }
}

/// A primitive ready to draw, already rotated
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPrimitive {
    pub role: Role,
    pub kind: PrimitiveKind,
    pub points: Vec<Point3<f32>>,
}

/// Everything produced by one call to [`SceneModel::advance`]
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Angle the display rotation was built from
    pub angle: f32,
    pub primitives: Vec<DrawPrimitive>,
    /// Primitives left out of this frame because stepping or rotating failed
    pub skipped: Vec<Role>,
}

/// Owned animation state for the whole scene
#[derive(Debug, Clone)]
pub struct SceneModel {
    primitives: Vec<Primitive>,
    stepper: Stepper,
    axis: Axis,
    angle: RotationAngle,
    rotation: Matrix,
    frames: u64,
    settled: bool,
}

impl SceneModel {
    /// Cube with the default configuration
    pub fn reference() -> Result<Self> {
        Self::new(&SceneConfig::default())
    }

    pub fn new(config: &SceneConfig) -> Result<Self> {
        let translation = Matrix::point(
            config.translation[0],
            config.translation[1],
            config.translation[2],
        );
        let track = |x: f32, y: f32, z: f32| -> Result<Tracked> {
            let start = Matrix::point(x, y, z);
            let target = start.dot(&config.basis)?.add(&translation)?;
            Ok(Tracked::new(start, target))
        };

        let half = config.half_extent;
        let back_z = -config.depth;
        let face = |z: f32| -> Result<Vec<Tracked>> {
            Corner::ALL
                .iter()
                .map(|corner| {
                    let (x, y) = corner.xy(half);
                    track(x, y, z)
                })
                .collect()
        };

        let mut primitives = vec![
            Primitive::new(Role::FrontFace, face(0.0)?),
            Primitive::new(Role::BackFace, face(back_z)?),
        ];
        for edge in Edge::ALL {
            let (x, y) = edge.corner().xy(half);
            primitives.push(Primitive::new(
                Role::Edge(edge),
                vec![track(x, y, 0.0)?, track(x, y, back_z)?],
            ));
        }

        for primitive in &primitives {
            for point in &primitive.points {
                log::debug!(
                    "{:?}: start {:?} target {:?}",
                    primitive.role,
                    point.current.to_point3()?,
                    point.target.to_point3()?
                );
            }
        }

        let stepper = Stepper::new(config.step, config.basis.clone())?;
        Ok(Self::with_primitives(
            primitives,
            stepper,
            config.axis,
            RotationAngle::new(config.start_angle),
        ))
    }

    /// Scene over arbitrary primitives
    pub fn with_primitives(
        primitives: Vec<Primitive>,
        stepper: Stepper,
        axis: Axis,
        angle: RotationAngle,
    ) -> Self {
        let rotation = axis.rotation(angle.degrees());
        Self {
            primitives,
            stepper,
            axis,
            angle,
            rotation,
            frames: 0,
            settled: false,
        }
    }

    /// Run one frame and return what to draw.
    ///
    /// The display rotation is built fresh from the current angle and applied
    /// to the freshly stepped points. A primitive that fails is skipped for
    /// this frame and its points are left as they were.
    pub fn advance(&mut self) -> Frame {
        let angle = self.angle.degrees();
        self.rotation = self.axis.rotation(angle);
        self.angle.tick();

        let mut primitives = Vec::with_capacity(self.primitives.len());
        let mut skipped = Vec::new();
        for primitive in &mut self.primitives {
            let drawn = self
                .stepper
                .advance(&mut primitive.points)
                .and_then(|_| rotate_all(&primitive.points, &self.rotation));
            match drawn {
                Ok(points) => primitives.push(DrawPrimitive {
                    role: primitive.role,
                    kind: primitive.kind(),
                    points,
                }),
                Err(e) => {
                    log::warn!("skipping {:?} this frame: {}", primitive.role, e);
                    skipped.push(primitive.role);
                }
            }
        }

        self.frames += 1;
        if !self.settled && matches!(self.is_settled(), Ok(true)) {
            self.settled = true;
            log::info!("scene settled after {} frames", self.frames);
        }

        Frame {
            angle,
            primitives,
            skipped,
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn primitive(&self, role: Role) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.role == role)
    }

    pub fn front_corner(&self, corner: Corner) -> Option<&Tracked> {
        self.primitive(Role::FrontFace)?.points.get(corner.index())
    }

    pub fn back_corner(&self, corner: Corner) -> Option<&Tracked> {
        self.primitive(Role::BackFace)?.points.get(corner.index())
    }

    /// Front and back end of an edge
    pub fn edge(&self, edge: Edge) -> Option<&[Tracked]> {
        self.primitive(Role::Edge(edge)).map(|p| p.points.as_slice())
    }

    pub fn tracked(&self) -> impl Iterator<Item = &Tracked> {
        self.primitives.iter().flat_map(|p| p.points.iter())
    }

    pub fn angle(&self) -> f32 {
        self.angle.degrees()
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Display rotation used by the last frame
    pub fn rotation(&self) -> &Matrix {
        &self.rotation
    }

    pub fn step(&self) -> f32 {
        self.stepper.step()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// True when no point can advance on any axis
    pub fn is_settled(&self) -> Result<bool> {
        self.tracked()
            .try_fold(true, |settled, t| Ok(t.is_settled()? && settled))
    }

    /// Largest per-axis distance from any point to its target
    pub fn max_deviation(&self) -> Result<f32> {
        self.tracked()
            .try_fold(0.0f32, |max, t| Ok(max.max(t.deviation()?)))
    }
}

fn rotate_all(points: &[Tracked], rotation: &Matrix) -> Result<Vec<Point3<f32>>> {
    points
        .iter()
        .map(|t| t.current.dot(rotation)?.to_point3())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::rotation::rotation_z;

    #[test]
    fn test_reference_layout() {
        let scene = SceneModel::reference().unwrap();
        assert_eq!(scene.primitives().len(), 6);
        assert_eq!(scene.tracked().count(), 16);

        let front = scene.front_corner(Corner::TopLeft).unwrap();
        assert_eq!(front.current, Matrix::point(-2.0, 2.0, 0.0));
        assert_eq!(front.target, Matrix::point(3.0, 2.0, 0.0));

        let back = scene.back_corner(Corner::BottomRight).unwrap();
        assert_eq!(back.current, Matrix::point(2.0, -2.0, -5.0));
        assert_eq!(back.target, Matrix::point(7.0, -2.0, -5.0));

        let edge = scene.edge(Edge::BottomLeft).unwrap();
        assert_eq!(edge.len(), 2);
        assert_eq!(edge[0].current, Matrix::point(-2.0, -2.0, 0.0));
        assert_eq!(edge[1].current, Matrix::point(-2.0, -2.0, -5.0));
    }

    #[test]
    fn test_primitive_kinds() {
        let mut scene = SceneModel::reference().unwrap();
        let frame = scene.advance();
        let kinds: Vec<_> = frame.primitives.iter().map(|p| (p.kind, p.points.len())).collect();
        assert_eq!(
            kinds,
            vec![
                (PrimitiveKind::LineLoop, 4),
                (PrimitiveKind::LineLoop, 4),
                (PrimitiveKind::Lines, 2),
                (PrimitiveKind::Lines, 2),
                (PrimitiveKind::Lines, 2),
                (PrimitiveKind::Lines, 2),
            ]
        );
        assert!(frame.skipped.is_empty());
    }

    #[test]
    fn test_first_frame() {
        let mut scene = SceneModel::reference().unwrap();
        let frame = scene.advance();
        assert_eq!(frame.angle, 0.0);
        assert_eq!(scene.angle(), 1.0);

        // Angle 0 means no rotation, so drawn points are the stepped points
        let top_left = frame.primitives[0].points[0];
        assert!((top_left - Point3::new(-1.99, 2.01, 0.01)).norm() < 1e-5);
    }

    #[test]
    fn test_rotation_is_recomputed_each_frame() {
        let mut scene = SceneModel::reference().unwrap();
        for _ in 0..91 {
            scene.advance();
        }
        assert!(scene.rotation().approx_eq(&rotation_z(90.0), 1e-5));

        let front = scene.front_corner(Corner::TopRight).unwrap().current.clone();
        let frame = scene.advance();
        let expected = front
            .add(&Matrix::point(0.01, 0.0, 0.0))
            .unwrap()
            .dot(&rotation_z(91.0))
            .unwrap()
            .to_point3()
            .unwrap();
        assert!((frame.primitives[0].points[1] - expected).norm() < 1e-4);
    }

    #[test]
    fn test_reference_scene_converges() {
        let mut scene = SceneModel::reference().unwrap();
        for _ in 0..600 {
            scene.advance();
        }
        for tracked in scene.tracked() {
            assert!(tracked.deviation().unwrap() <= scene.step() + 1e-3);
        }
        assert!(scene.is_settled().unwrap());
        assert!(scene.max_deviation().unwrap() <= 0.011);
        assert_eq!(scene.frames(), 600);
    }

    #[test]
    fn test_not_settled_early() {
        let mut scene = SceneModel::reference().unwrap();
        for _ in 0..100 {
            scene.advance();
        }
        assert!(!scene.is_settled().unwrap());
        assert!(scene.max_deviation().unwrap() > 3.0);
    }

    #[test]
    fn test_custom_config() {
        let config = SceneConfig {
            half_extent: 1.0,
            depth: 2.0,
            translation: [0.0, 3.0, 0.0],
            axis: Axis::X,
            start_angle: 45.0,
            ..SceneConfig::default()
        };
        let mut scene = SceneModel::new(&config).unwrap();
        let back = scene.back_corner(Corner::TopLeft).unwrap();
        assert_eq!(back.current, Matrix::point(-1.0, 1.0, -2.0));
        assert_eq!(back.target, Matrix::point(-1.0, 4.0, -2.0));

        let frame = scene.advance();
        assert_eq!(frame.angle, 45.0);
        assert_eq!(scene.axis(), Axis::X);
    }

    #[test]
    fn test_bad_basis_is_rejected() {
        let config = SceneConfig {
            basis: Matrix::identity(2),
            ..SceneConfig::default()
        };
        assert!(SceneModel::new(&config).is_err());

        let config = SceneConfig {
            step: 0.0,
            ..SceneConfig::default()
        };
        assert!(SceneModel::new(&config).is_err());
    }

    #[test]
    fn test_malformed_primitive_is_skipped() {
        let good = Primitive::new(
            Role::FrontFace,
            vec![Tracked::new(Matrix::point(0.0, 0.0, 0.0), Matrix::point(1.0, 1.0, 1.0))],
        );
        let bad = Primitive::new(
            Role::Edge(Edge::TopLeft),
            vec![Tracked::new(Matrix::identity(3), Matrix::point(1.0, 1.0, 1.0))],
        );
        let stepper = Stepper::new(DEFAULT_STEP, Matrix::identity(3)).unwrap();
        let mut scene = SceneModel::with_primitives(vec![good, bad], stepper, Axis::Z, RotationAngle::default());

        let frame = scene.advance();
        assert_eq!(frame.primitives.len(), 1);
        assert_eq!(frame.primitives[0].role, Role::FrontFace);
        assert_eq!(frame.skipped, vec![Role::Edge(Edge::TopLeft)]);
        assert!(matches!(scene.is_settled(), Err(Error::ShapeError(_))));
        assert!(scene.max_deviation().is_err());
    }

    #[test]
    fn test_skipped_primitive_keeps_its_points() {
        let good = Tracked::new(Matrix::point(0.0, 0.0, 0.0), Matrix::point(1.0, 1.0, 1.0));
        let bad = Tracked::new(Matrix::identity(3), Matrix::point(1.0, 1.0, 1.0));
        let face = Primitive::new(Role::BackFace, vec![good.clone(), bad, good.clone()]);
        let before = face.clone();
        let stepper = Stepper::new(DEFAULT_STEP, Matrix::identity(3)).unwrap();
        let mut scene = SceneModel::with_primitives(vec![face], stepper, Axis::Z, RotationAngle::default());

        for _ in 0..5 {
            let frame = scene.advance();
            assert!(frame.primitives.is_empty());
            assert_eq!(frame.skipped, vec![Role::BackFace]);
        }
        assert_eq!(scene.primitive(Role::BackFace), Some(&before));
    }
}
