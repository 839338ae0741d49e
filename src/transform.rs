use serde::{ Serialize, Deserialize };

use crate::tuple::Tuple4D;
use crate::matrix::Matrix;

/// A single primitive affine transformation.
///
/// Scene files list these in the order they should happen to an object, e.g.
///
/// ```json
/// [
///     { "op": "scale", "x": 0.5, "y": 1.0, "z": 1.0 },
///     { "op": "translate", "x": 0.0, "y": 1.0, "z": 0.0 }
/// ]
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Transformation {
    Translate { x: f64, y: f64, z: f64 },
    Scale { x: f64, y: f64, z: f64 },
    RotateX { radians: f64 },
    RotateY { radians: f64 },
    RotateZ { radians: f64 },
    Shear { xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64 },
}

impl Transformation {
    /// The 4x4 matrix performing this transformation.
    pub fn matrix(&self) -> Matrix {
        use Transformation::*;
        match *self {
            Translate { x, y, z } => Matrix::translation(x, y, z),
            Scale { x, y, z } => Matrix::scaling(x, y, z),
            RotateX { radians } => Matrix::rotation_x(radians),
            RotateY { radians } => Matrix::rotation_y(radians),
            RotateZ { radians } => Matrix::rotation_z(radians),
            Shear { xy, xz, yx, yz, zx, zy }
                => Matrix::shearing(xy, xz, yx, yz, zx, zy),
        }
    }
}

/// Folds a list of transformations into one matrix.
///
/// Each step is multiplied onto the *left* of what has accumulated so far, so
/// the resulting matrix applies the transformations in list order: the first
/// one listed happens to a point first.
///
/// ```
/// # use ray_caster::tuple::Tuple4D;
/// # use ray_caster::transform::{ compose, Transformation };
/// let m = compose(&[
///     Transformation::Scale { x: 2.0, y: 2.0, z: 2.0 },
///     Transformation::Translate { x: 1.0, y: 0.0, z: 0.0 },
/// ]);
/// let p = m.mul_tuple(Tuple4D::point(1.0, 1.0, 1.0)).unwrap();
/// assert_eq!(p, Tuple4D::point(3.0, 2.0, 2.0));
/// ```
pub fn compose(ops: &[Transformation]) -> Matrix {
    ops.iter().fold(Matrix::identity(4), |acc, op| {
        op.matrix()
            .mul_matrix(&acc)
            .expect("4x4 transformation matrices always compose")
    })
}

/// A fluent builder for transforming a single tuple.
///
/// Operations chain in the order they happen, which is the reverse of how the
/// matrices would be written out by hand:
///
/// ```
/// # use ray_caster::tuple::Tuple4D;
/// # use ray_caster::transform::Transform;
/// let p = Transform::new(Tuple4D::point(1.0, 0.0, 1.0))
///     .rotate_x(std::f64::consts::FRAC_PI_2)
///     .scale(5.0, 5.0, 5.0)
///     .translate(10.0, 5.0, 7.0)
///     .value();
/// assert_eq!(p, Tuple4D::point(15.0, 0.0, 7.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    tuple: Tuple4D,
    ops: Vec<Transformation>,
}

impl Transform {
    /// Starts an identity transformation of `tuple`.
    pub fn new(tuple: Tuple4D) -> Transform {
        Transform { tuple, ops: Vec::new() }
    }

    /// Appends an arbitrary transformation.
    pub fn then(mut self, op: Transformation) -> Transform {
        self.ops.push(op);
        self
    }

    pub fn translate(self, x: f64, y: f64, z: f64) -> Transform {
        self.then(Transformation::Translate { x, y, z })
    }

    pub fn scale(self, x: f64, y: f64, z: f64) -> Transform {
        self.then(Transformation::Scale { x, y, z })
    }

    pub fn rotate_x(self, radians: f64) -> Transform {
        self.then(Transformation::RotateX { radians })
    }

    pub fn rotate_y(self, radians: f64) -> Transform {
        self.then(Transformation::RotateY { radians })
    }

    pub fn rotate_z(self, radians: f64) -> Transform {
        self.then(Transformation::RotateZ { radians })
    }

    pub fn shear(self, xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Transform {
        self.then(Transformation::Shear { xy, xz, yx, yz, zx, zy })
    }

    /// The transformations chained so far, in application order.
    pub fn ops(&self) -> &[Transformation] {
        &self.ops
    }

    /// The combined matrix of every chained transformation.
    pub fn matrix(&self) -> Matrix {
        compose(&self.ops)
    }

    /// Applies the combined matrix to the wrapped tuple.
    pub fn value(&self) -> Tuple4D {
        self.matrix()
            .mul_tuple(self.tuple)
            .expect("composed transformations are always 4x4")
    }
}

#[test]
fn no_ops_is_identity() {
    let p = Tuple4D::point(1.5, -2.0, 3.25);
    let v = Tuple4D::vector(1.5, -2.0, 3.25);

    assert_eq!(Transform::new(p).value(), p);
    assert_eq!(Transform::new(v).value(), v);
    assert_eq!(compose(&[]), Matrix::identity(4));
}

#[test]
fn individual_steps_in_sequence() {
    let p = Tuple4D::point(1.0, 0.0, 1.0);
    let a = Matrix::rotation_x(std::f64::consts::FRAC_PI_2);
    let b = Matrix::scaling(5.0, 5.0, 5.0);
    let c = Matrix::translation(10.0, 5.0, 7.0);

    let p2 = a.mul_tuple(p).unwrap();
    assert_eq!(p2, Tuple4D::point(1.0, -1.0, 0.0));
    let p3 = b.mul_tuple(p2).unwrap();
    assert_eq!(p3, Tuple4D::point(5.0, -5.0, 0.0));
    let p4 = c.mul_tuple(p3).unwrap();
    assert_eq!(p4, Tuple4D::point(15.0, 0.0, 7.0));
}

#[test]
fn chained_matches_reversed_product() {
    let a = Matrix::rotation_x(std::f64::consts::FRAC_PI_2);
    let b = Matrix::scaling(5.0, 5.0, 5.0);
    let c = Matrix::translation(10.0, 5.0, 7.0);
    let by_hand = c.mul_matrix(&b).unwrap().mul_matrix(&a).unwrap();

    let chained = Transform::new(Tuple4D::point(1.0, 0.0, 1.0))
        .rotate_x(std::f64::consts::FRAC_PI_2)
        .scale(5.0, 5.0, 5.0)
        .translate(10.0, 5.0, 7.0);

    assert_eq!(chained.matrix(), by_hand);
    assert_eq!(chained.value(), Tuple4D::point(15.0, 0.0, 7.0));
}

#[test]
fn order_matters() {
    let p = Tuple4D::point(1.0, 0.0, 0.0);

    let scale_first = Transform::new(p).scale(2.0, 2.0, 2.0).translate(1.0, 0.0, 0.0);
    let translate_first = Transform::new(p).translate(1.0, 0.0, 0.0).scale(2.0, 2.0, 2.0);

    assert_eq!(scale_first.value(), Tuple4D::point(3.0, 0.0, 0.0));
    assert_eq!(translate_first.value(), Tuple4D::point(4.0, 0.0, 0.0));
}

#[test]
fn builder_and_compose_agree() {
    let t = Transform::new(Tuple4D::point(2.0, 3.0, 4.0))
        .shear(1.0, 0.0, 0.0, 0.0, 0.0, 0.0)
        .rotate_y(0.3)
        .rotate_z(-1.2);

    assert_eq!(t.ops().len(), 3);
    assert_eq!(t.matrix(), compose(t.ops()));
}

#[test]
fn translation_leaves_vectors() {
    let v = Tuple4D::vector(-3.0, 4.0, 5.0);

    assert_eq!(Transform::new(v).translate(5.0, -3.0, 2.0).value(), v);
}

#[test]
fn deserialize_ops() {
    let json = r#"[
        { "op": "rotate_z", "radians": 1.5 },
        { "op": "scale", "x": 1.0, "y": 2.0, "z": 3.0 },
        { "op": "shear", "xy": 1.0, "xz": 0.0, "yx": 0.0,
          "yz": 0.0, "zx": 0.0, "zy": 0.0 }
    ]"#;
    let ops: Vec<Transformation> = serde_json::from_str(json).unwrap();

    assert_eq!(ops, vec![
        Transformation::RotateZ { radians: 1.5 },
        Transformation::Scale { x: 1.0, y: 2.0, z: 3.0 },
        Transformation::Shear { xy: 1.0, xz: 0.0, yx: 0.0, yz: 0.0, zx: 0.0, zy: 0.0 },
    ]);
}
