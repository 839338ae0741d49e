use crate::color::Color;
use crate::tuple::Tuple4D;

/// A point light.
///
/// A very simple light source with a color and a position where light is
/// produced from. There is no falloff with distance.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Tuple4D,
}

impl PointLight {
    /// Creates a point light.
    ///
    /// If `position` isn't a point, it is converted to a point automatically.
    pub fn new(intensity: Color, mut position: Tuple4D) -> PointLight {
        if !position.is_point() {
            position.w = 1.0;
        }

        PointLight { intensity, position }
    }
}

/// A material record.
///
/// Materials use attributes from the Phong reflection model; ambient, diffuse,
/// specular and shininess.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::rgb(1.0, 1.0, 1.0),

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
        }
    }
}

impl Material {
    /// Calculates the color of a point on a surface with this material.
    ///
    /// Takes a single light, the point being shaded, the vector towards the
    /// eye and the surface normal at the point, and combines the ambient,
    /// diffuse and specular contributions. The result is not clamped.
    ///
    /// The specular term reflects the light vector as-is (not negated) and
    /// measures that reflection against `-eyev`, the viewing direction.
    /// Dotting it with `eyev` directly gives 1.0 instead of 1.9 for an eye
    /// lined up with the light, and 0.7364 instead of 1.6364 for an eye in
    /// the mirror path; keep the `-eyev`.
    pub fn lighting(&self, light: &PointLight, position: Tuple4D,
        eyev: Tuple4D, normalv: Tuple4D) -> Color {
        // Combine surface color with light's color
        let effective_color = self.color * light.intensity;

        // Find direction to light source
        let lightv = (light.position - position).normalize();

        // Compute ambient light
        let ambient = effective_color * self.ambient;

        // A negative cosine means the light is on the other side of the
        // surface, so only ambient light reaches it
        let light_dot_normal = lightv.dot(&normalv);
        if light_dot_normal < 0.0 {
            return ambient;
        }

        let diffuse = effective_color * self.diffuse * light_dot_normal;

        // The light vector itself is reflected, not its negation. Its mirror
        // image is measured against the viewing direction, which is `-eyev`.
        let reflectv = lightv.reflect(&normalv);
        let reflect_dot_eye = reflectv.dot(&-eyev);

        // Light reflecting away from the eye has no specular highlight
        let specular = if reflect_dot_eye <= 0.0 {
            Color::black()
        } else {
            let factor = reflect_dot_eye.powf(self.shininess);
            light.intensity * self.specular * factor
        };

        ambient + diffuse + specular
    }
}

#[cfg(test)]
fn white_light_at(x: f64, y: f64, z: f64) -> PointLight {
    PointLight::new(Color::white(), Tuple4D::point(x, y, z))
}

#[test]
fn point_light_fields() {
    let light = PointLight::new(Color::white(), Tuple4D::vector(1.0, 2.0, 3.0));

    assert_eq!(light.intensity, Color::white());
    assert_eq!(light.position, Tuple4D::point(1.0, 2.0, 3.0));
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::rgb(1.0, 1.0, 1.0));
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
}

#[test]
fn eye_between_light_and_surface() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&white_light_at(0.0, 0.0, -10.0), position, eyev, normalv);
    assert_eq!(res, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt()) / 2.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&white_light_at(0.0, 0.0, -10.0), position, eyev, normalv);
    assert_eq!(res, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn eye_opposite_surface_light_offset_45() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&white_light_at(0.0, 10.0, -10.0), position, eyev, normalv);
    assert_eq!(res, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, -(2.0f64.sqrt()) / 2.0, -(2.0f64.sqrt()) / 2.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&white_light_at(0.0, 10.0, -10.0), position, eyev, normalv);
    assert_eq!(res, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&white_light_at(0.0, 0.0, 10.0), position, eyev, normalv);
    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn colored_light_filters_surface() {
    let m = Material { color: Color::rgb(1.0, 0.5, 0.0), ..Default::default() };
    let light = PointLight::new(Color::rgb(0.5, 1.0, 1.0), Tuple4D::point(0.0, 0.0, 10.0));
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    // Only ambient reaches the eye; (1.0 * 0.5, 0.5 * 1.0, 0.0) * 0.1
    let res = m.lighting(&light, Tuple4D::origin(), eyev, normalv);
    assert_eq!(res, Color::rgb(0.05, 0.05, 0.0));
}
