use crate::error::Result;
use crate::tuple::Tuple4D;
use crate::matrix::Matrix;

/// A ray; a point of origin and a direction to travel in.
///
/// Rays are values. Transforming one produces a new ray.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray4D {
    pub origin: Tuple4D,
    pub direction: Tuple4D,
}

impl Ray4D {
    /// Creates a ray.
    ///
    /// The origin is forced to be a point and the direction a vector.
    pub fn new(mut origin: Tuple4D, mut direction: Tuple4D) -> Ray4D {
        if !origin.is_point() {
            origin.w = 1.0;
        }

        if !direction.is_vector() {
            direction.w = 0.0;
        }

        Ray4D { origin, direction }
    }

    /// The point `t` units of `direction` away from the origin.
    pub fn position(&self, t: f64) -> Tuple4D {
        self.origin + (t * self.direction)
    }

    /// Applies a matrix to both the origin and direction.
    ///
    /// Since the direction has `w == 0.0`, translations don't affect it.
    pub fn transform(&self, m: &Matrix) -> Result<Ray4D> {
        Ok(Ray4D {
            origin: m.mul_tuple(self.origin)?,
            direction: m.mul_tuple(self.direction)?,
        })
    }

    pub fn translate(&self, x: f64, y: f64, z: f64) -> Result<Ray4D> {
        self.transform(&Matrix::translation(x, y, z))
    }

    pub fn scale(&self, x: f64, y: f64, z: f64) -> Result<Ray4D> {
        self.transform(&Matrix::scaling(x, y, z))
    }
}

#[test]
fn ray_new_fixes_w() {
    let r = Ray4D::new(
                Tuple4D::tuple(1.0, 2.0, 3.0, 0.0),
                Tuple4D::tuple(4.0, 5.0, 6.0, 1.0)
            );

    assert_eq!(r.origin, Tuple4D::point(1.0, 2.0, 3.0));
    assert_eq!(r.direction, Tuple4D::vector(4.0, 5.0, 6.0));
}

#[test]
fn ray_position() {
    let r = Ray4D::new(
                Tuple4D::point(2.0, 3.0, 4.0),
                Tuple4D::vector(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Tuple4D::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple4D::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple4D::point(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple4D::point(4.5, 3.0, 4.0));
}

#[test]
fn ray_translation() {
    let r = Ray4D::new(
                Tuple4D::point(1.0, 2.0, 3.0),
                Tuple4D::vector(0.0, 1.0, 0.0)
            );
    let t = r.translate(3.0, 4.0, 5.0).unwrap();

    assert_eq!(t.origin, Tuple4D::point(4.0, 6.0, 8.0));
    assert_eq!(t.direction, Tuple4D::vector(0.0, 1.0, 0.0));
    // the input ray is untouched
    assert_eq!(r.origin, Tuple4D::point(1.0, 2.0, 3.0));
}

#[test]
fn ray_scaling() {
    let r = Ray4D::new(
                Tuple4D::point(1.0, 2.0, 3.0),
                Tuple4D::vector(0.0, 1.0, 0.0)
            );
    let t = r.scale(2.0, 3.0, 4.0).unwrap();

    assert_eq!(t.origin, Tuple4D::point(2.0, 6.0, 12.0));
    assert_eq!(t.direction, Tuple4D::vector(0.0, 3.0, 0.0));
}

#[test]
fn ray_transform_needs_4x4() {
    let r = Ray4D::new(
                Tuple4D::point(1.0, 2.0, 3.0),
                Tuple4D::vector(0.0, 1.0, 0.0)
            );

    assert!(r.transform(&Matrix::identity(3)).is_err());
}
