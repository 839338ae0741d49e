use crate::error::Result;
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::matrix::Matrix;
use crate::light::Material;
use crate::intersect::{ Intersection, Intersections };

/// A sphere.
///
/// In object space every sphere is the unit sphere at the origin. `transform`
/// maps object space into world space, so moving, stretching or rotating a
/// sphere is done by changing its transform. The transform must be
/// invertible; intersecting or shading a sphere with a singular transform is
/// an error.
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub transform: Matrix,
    pub material: Material,
}

impl Default for Sphere {
    fn default() -> Sphere {
        Sphere {
            transform: Matrix::identity(4),
            material: Default::default(),
        }
    }
}

impl Sphere {
    /// Creates a unit sphere with identity transform and default material.
    pub fn new() -> Sphere {
        Default::default()
    }

    pub fn with_transform(self, transform: Matrix) -> Sphere {
        Sphere { transform, ..self }
    }

    pub fn with_material(self, material: Material) -> Sphere {
        Sphere { material, ..self }
    }

    /// Intersects a ray with the sphere.
    ///
    /// The ray is moved into object space with the inverse transform, then
    /// tested against the unit sphere. A miss gives an empty list; a hit
    /// (including a tangent hit) gives two intersections, nearest first.
    ///
    /// ```
    /// # use ray_caster::tuple::Tuple4D;
    /// # use ray_caster::ray::Ray4D;
    /// # use ray_caster::sphere::Sphere;
    /// let r = Ray4D::new(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));
    /// let s = Sphere::new();
    /// let xs = s.intersect(&r).unwrap();
    /// assert_eq!(xs.intersections[0].t, 4.0);
    /// assert_eq!(xs.intersections[1].t, 6.0);
    /// ```
    pub fn intersect(&self, ray: &Ray4D) -> Result<Intersections> {
        let r = ray.transform(&self.transform.inverse()?)?;

        let sphere_to_ray = r.origin - Tuple4D::origin();
        let a = r.direction.dot(&r.direction);
        let b = 2.0 * r.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b.powi(2) - 4.0 * a * c;
        if discriminant < 0.0 {
            return Ok(Intersections::new());
        }

        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

        Ok(vec![Intersection::new(t1, self), Intersection::new(t2, self)].into())
    }

    /// The world-space surface normal at a world-space point.
    ///
    /// The point is moved into object space, where the normal is just the
    /// vector from the origin. That normal goes back to world space through
    /// the inverse-transpose of the transform, which keeps it perpendicular
    /// to the surface under non-uniform scaling. The inverse-transpose can
    /// leave junk in `w`, so it is zeroed before normalizing.
    pub fn normal_at(&self, world_point: Tuple4D) -> Result<Tuple4D> {
        let inverse = self.transform.inverse()?;

        let object_point = inverse.mul_tuple(world_point)?;
        let object_normal = object_point - Tuple4D::origin();

        let mut world_normal = inverse.transpose()?.mul_tuple(object_normal)?;
        world_normal.w = 0.0;

        Ok(world_normal.normalize())
    }
}

#[cfg(test)]
fn ray(origin: Tuple4D, direction: Tuple4D) -> Ray4D {
    Ray4D::new(origin, direction)
}

#[cfg(test)]
fn ts(xs: &Intersections) -> Vec<f64> {
    xs.iter().map(|i| i.t).collect()
}

#[test]
fn default_sphere() {
    let s = Sphere::new();

    assert_eq!(s.transform, Matrix::identity(4));
    assert_eq!(s.material, Material::default());
}

#[test]
fn ray_through_center() {
    let r = ray(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));
    let s = Sphere::new();

    let xs = s.intersect(&r).unwrap();
    assert_eq!(ts(&xs), vec![4.0, 6.0]);
    assert!(xs.iter().all(|i| std::ptr::eq(i.what, &s)));
}

#[test]
fn ray_tangent() {
    let r = ray(Tuple4D::point(0.0, 1.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));

    assert_eq!(ts(&Sphere::new().intersect(&r).unwrap()), vec![5.0, 5.0]);
}

#[test]
fn ray_misses() {
    let r = ray(Tuple4D::point(0.0, 2.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));

    assert!(Sphere::new().intersect(&r).unwrap().is_empty());
}

#[test]
fn ray_inside_sphere() {
    let r = ray(Tuple4D::point(0.0, 0.0, 0.0), Tuple4D::vector(0.0, 0.0, 1.0));

    assert_eq!(ts(&Sphere::new().intersect(&r).unwrap()), vec![-1.0, 1.0]);
}

#[test]
fn sphere_behind_ray() {
    let r = ray(Tuple4D::point(0.0, 0.0, 5.0), Tuple4D::vector(0.0, 0.0, 1.0));
    let s = Sphere::new();
    let xs = s.intersect(&r).unwrap();

    assert_eq!(ts(&xs), vec![-6.0, -4.0]);
    assert_eq!(xs.hit(), None);
}

#[test]
fn scaled_sphere() {
    let r = ray(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));
    let s = Sphere::new().with_transform(Matrix::scaling(2.0, 2.0, 2.0));

    assert_eq!(ts(&s.intersect(&r).unwrap()), vec![3.0, 7.0]);
}

#[test]
fn translated_sphere() {
    let r = ray(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));
    let s = Sphere::new().with_transform(Matrix::translation(5.0, 0.0, 0.0));

    assert!(s.intersect(&r).unwrap().is_empty());
}

#[test]
fn singular_transform_is_an_error() {
    let r = ray(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));
    let s = Sphere::new().with_transform(Matrix::scaling(0.0, 1.0, 1.0));

    assert!(s.intersect(&r).is_err());
    assert!(s.normal_at(Tuple4D::point(0.0, 1.0, 0.0)).is_err());
}

#[test]
fn normals_on_axes() {
    let s = Sphere::new();

    assert_eq!(s.normal_at(Tuple4D::point(1.0, 0.0, 0.0)).unwrap(),
        Tuple4D::vector(1.0, 0.0, 0.0));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 1.0, 0.0)).unwrap(),
        Tuple4D::vector(0.0, 1.0, 0.0));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 0.0, 1.0)).unwrap(),
        Tuple4D::vector(0.0, 0.0, 1.0));
}

#[test]
fn normal_nonaxial_is_normalized() {
    let k = 3.0f64.sqrt() / 3.0;
    let n = Sphere::new().normal_at(Tuple4D::point(k, k, k)).unwrap();

    assert_eq!(n, Tuple4D::vector(k, k, k));
    assert_eq!(n, n.normalize());
}

#[test]
fn normal_translated_sphere() {
    let s = Sphere::new().with_transform(Matrix::translation(0.0, 1.0, 0.0));
    let n = s.normal_at(Tuple4D::point(0.0, 1.70711, -0.70711)).unwrap();

    assert_eq!(n, Tuple4D::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn normal_transformed_sphere() {
    let m = Matrix::scaling(1.0, 0.5, 1.0)
        .mul_matrix(&Matrix::rotation_z(std::f64::consts::PI / 5.0))
        .unwrap();
    let s = Sphere::new().with_transform(m);
    let k = 2.0f64.sqrt() / 2.0;
    let n = s.normal_at(Tuple4D::point(0.0, k, -k)).unwrap();

    assert_eq!(n, Tuple4D::vector(0.0, 0.97014, -0.24254));
}

#[test]
fn with_material() {
    let mut m = Material::default();
    m.ambient = 1.0;
    let s = Sphere::new().with_material(m);

    assert_eq!(s.material.ambient, 1.0);
    assert_eq!(s.transform, Matrix::identity(4));
}
