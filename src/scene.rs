use std::fs;
use std::path::Path;

use log::{ debug, info, trace, warn };
use serde::{ Serialize, Deserialize };

use crate::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT, WALL_Z, WALL_SIZE };
use crate::error::{ Error, Result };
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::color::Color;
use crate::light::{ PointLight, Material };
use crate::sphere::Sphere;
use crate::intersect::Intersections;
use crate::canvas::Canvas;
use crate::transform::{ compose, Transformation };

/// Everything needed to render an image.
///
/// Rays start at `eye` and pass through a square "wall" of side `wall_size`
/// that sits perpendicular to the z axis at `wall_z`. Each canvas pixel maps
/// to one point on that wall.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub canvas_width: usize,
    pub canvas_height: usize,

    pub eye: Tuple4D,
    pub wall_z: f64,
    pub wall_size: f64,

    pub light: PointLight,
    pub spheres: Vec<Sphere>,
}

/// The built-in scene: a single purple unit sphere, lit from above and to the
/// left of the eye.
impl Default for Scene {
    fn default() -> Scene {
        let mut material = Material::default();
        material.color = Color::rgb(1.0, 0.2, 1.0);

        Scene {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            eye: Tuple4D::point(0.0, 0.0, -5.0),
            wall_z: WALL_Z,
            wall_size: WALL_SIZE,

            light: PointLight::new(Color::white(), Tuple4D::point(-10.0, 10.0, -10.0)),
            spheres: vec![Sphere::new().with_material(material)],
        }
    }
}

impl Scene {
    /// Parses a scene from its JSON description.
    ///
    /// The result is validated before it is returned.
    pub fn from_json(json: &str) -> Result<Scene> {
        let scene_json: SceneJson = serde_json::from_str(json)?;
        let scene: Scene = scene_json.into();
        debug!("parsed scene: {}x{} canvas, {} sphere(s), light at {:?}",
            scene.canvas_width, scene.canvas_height, scene.spheres.len(),
            scene.light.position);
        scene.validate()?;

        Ok(scene)
    }

    /// Reads and parses a JSON scene file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let path = path.as_ref();
        debug!("reading scene from {}", path.display());

        Scene::from_json(&fs::read_to_string(path)?)
    }

    /// Checks that every sphere can be rendered.
    ///
    /// A sphere whose transform has no inverse can be neither intersected nor
    /// shaded, so it is rejected up front instead of halfway into a render.
    pub fn validate(&self) -> Result<()> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !sphere.transform.is_invertible()? {
                return Err(Error::SingularTransform(index));
            }
        }

        if self.spheres.is_empty() {
            warn!("scene has no spheres; the image will be black");
        }

        Ok(())
    }

    /// The ray from the eye through the center of pixel `(x, y)`.
    ///
    /// The pixel size comes from the larger canvas dimension, so pixels stay
    /// square on non-square canvases. The shorter dimension covers only the
    /// middle of the wall, and both are centered on the z axis. `y` grows
    /// downward on the canvas but upward in the world, hence the flip.
    pub fn ray_for_pixel(&self, x: usize, y: usize) -> Ray4D {
        let canvas_size = self.canvas_width.max(self.canvas_height).max(1);
        let pixel_size = self.wall_size / canvas_size as f64;
        let half_width = pixel_size * self.canvas_width as f64 / 2.0;
        let half_height = pixel_size * self.canvas_height as f64 / 2.0;

        let world_x = -half_width + pixel_size * (x as f64 + 0.5);
        let world_y = half_height - pixel_size * (y as f64 + 0.5);
        let target = Tuple4D::point(world_x, world_y, self.wall_z);

        Ray4D::new(self.eye, (target - self.eye).normalize())
    }

    /// The color seen along a ray, or black if the ray hits nothing.
    pub fn color_at(&self, ray: &Ray4D) -> Result<Color> {
        let mut xs = Intersections::new();
        for sphere in &self.spheres {
            xs.append(sphere.intersect(ray)?);
        }

        let hit = match xs.hit() {
            Some(hit) => hit,
            None => return Ok(Color::black()),
        };

        let point = ray.position(hit.t);
        let normal = hit.what.normal_at(point)?;
        let eye = -ray.direction;

        Ok(hit.what.material.lighting(&self.light, point, eye, normal))
    }

    /// Renders the scene to a new canvas, pixel by pixel.
    pub fn render(&self) -> Result<Canvas> {
        info!("rendering {}x{} canvas with {} sphere(s)",
            self.canvas_width, self.canvas_height, self.spheres.len());

        let mut canvas = Canvas::new(self.canvas_width, self.canvas_height);
        let mut hits = 0;

        for y in 0..self.canvas_height {
            trace!("row {}/{}", y + 1, self.canvas_height);
            for x in 0..self.canvas_width {
                let color = self.color_at(&self.ray_for_pixel(x, y))?;
                if color != Color::black() {
                    hits += 1;
                }

                canvas.write_pixel(x, y, color);
            }
        }

        info!("render finished, {} of {} pixels lit",
            hits, self.canvas_width * self.canvas_height);
        Ok(canvas)
    }
}

impl From<SceneJson> for Scene {
    fn from(scene_json: SceneJson) -> Scene {
        Scene {
            canvas_width: scene_json.canvas_width,
            canvas_height: scene_json.canvas_height,

            eye: point(scene_json.eye),
            wall_z: scene_json.wall_z,
            wall_size: scene_json.wall_size,

            light: scene_json.light.into(),
            spheres: scene_json.spheres.into_iter().map(|x| x.into()).collect(),
        }
    }
}

fn point(p: [f64; 3]) -> Tuple4D {
    Tuple4D::point(p[0], p[1], p[2])
}

fn default_canvas_width() -> usize { CANVAS_WIDTH }
fn default_canvas_height() -> usize { CANVAS_HEIGHT }
fn default_eye() -> [f64; 3] { [0.0, 0.0, -5.0] }
fn default_wall_z() -> f64 { WALL_Z }
fn default_wall_size() -> f64 { WALL_SIZE }

/// A scene as written in a JSON file.
///
/// Everything except the light is optional and falls back to the built-in
/// defaults.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneJson {
    #[serde(default = "default_canvas_width")]
    canvas_width: usize,
    #[serde(default = "default_canvas_height")]
    canvas_height: usize,

    #[serde(default = "default_eye")]
    eye: [f64; 3],
    #[serde(default = "default_wall_z")]
    wall_z: f64,
    #[serde(default = "default_wall_size")]
    wall_size: f64,

    light: LightJson,
    #[serde(default)]
    spheres: Vec<SphereJson>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LightJson {
    intensity: [f64; 3],
    position: [f64; 3],
}

impl From<LightJson> for PointLight {
    fn from(light_json: LightJson) -> PointLight {
        PointLight::new(light_json.intensity.into(), point(light_json.position))
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SphereJson {
    #[serde(default)]
    transform: Vec<Transformation>,
    #[serde(default)]
    material: MaterialJson,
}

impl From<SphereJson> for Sphere {
    fn from(sphere_json: SphereJson) -> Sphere {
        Sphere::new()
            .with_transform(compose(&sphere_json.transform))
            .with_material(sphere_json.material.into())
    }
}

/// Material fields; any that are left out take `Material::default()` values.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MaterialJson {
    color: [f64; 3],
    ambient: f64,
    diffuse: f64,
    specular: f64,
    shininess: f64,
}

impl Default for MaterialJson {
    fn default() -> MaterialJson {
        let m = Material::default();

        MaterialJson {
            color: [m.color.r, m.color.g, m.color.b],
            ambient: m.ambient,
            diffuse: m.diffuse,
            specular: m.specular,
            shininess: m.shininess,
        }
    }
}

impl From<MaterialJson> for Material {
    fn from(material_json: MaterialJson) -> Material {
        Material {
            color: material_json.color.into(),
            ambient: material_json.ambient,
            diffuse: material_json.diffuse,
            specular: material_json.specular,
            shininess: material_json.shininess,
        }
    }
}

#[cfg(test)]
fn small_scene(size: usize) -> Scene {
    Scene { canvas_width: size, canvas_height: size, ..Default::default() }
}

#[test]
fn default_scene() {
    let s = Scene::default();

    assert_eq!(s.canvas_width, 100);
    assert_eq!(s.canvas_height, 100);
    assert_eq!(s.eye, Tuple4D::point(0.0, 0.0, -5.0));
    assert_eq!(s.spheres.len(), 1);
    assert_eq!(s.spheres[0].material.color, Color::rgb(1.0, 0.2, 1.0));
    assert!(s.validate().is_ok());
}

#[test]
fn parse_full_scene() {
    let json = r#"{
        "canvas_width": 40,
        "canvas_height": 20,
        "eye": [0.0, 1.0, -6.0],
        "wall_z": 8.0,
        "wall_size": 5.0,
        "light": { "intensity": [1.0, 1.0, 1.0], "position": [10.0, 10.0, -10.0] },
        "spheres": [
            {
                "transform": [
                    { "op": "scale", "x": 2.0, "y": 2.0, "z": 2.0 },
                    { "op": "translate", "x": 1.0, "y": 0.0, "z": 0.0 }
                ],
                "material": { "color": [0.2, 0.4, 1.0], "shininess": 50.0 }
            },
            {}
        ]
    }"#;
    let s = Scene::from_json(json).unwrap();

    assert_eq!(s.canvas_width, 40);
    assert_eq!(s.canvas_height, 20);
    assert_eq!(s.eye, Tuple4D::point(0.0, 1.0, -6.0));
    assert_eq!(s.wall_z, 8.0);
    assert_eq!(s.wall_size, 5.0);
    assert_eq!(s.light.position, Tuple4D::point(10.0, 10.0, -10.0));
    assert_eq!(s.spheres.len(), 2);

    let first = &s.spheres[0];
    assert_eq!(first.material.color, Color::rgb(0.2, 0.4, 1.0));
    assert_eq!(first.material.shininess, 50.0);
    assert_eq!(first.material.diffuse, 0.9);
    let p = first.transform.mul_tuple(Tuple4D::point(1.0, 1.0, 1.0)).unwrap();
    assert_eq!(p, Tuple4D::point(3.0, 2.0, 2.0));

    assert_eq!(s.spheres[1], Sphere::new());
}

#[test]
fn parse_minimal_scene_uses_defaults() {
    let json = r#"{ "light": { "intensity": [1, 1, 1], "position": [-10, 10, -10] } }"#;
    let s = Scene::from_json(json).unwrap();

    assert_eq!(s.canvas_width, CANVAS_WIDTH);
    assert_eq!(s.canvas_height, CANVAS_HEIGHT);
    assert_eq!(s.wall_z, WALL_Z);
    assert_eq!(s.wall_size, WALL_SIZE);
    assert!(s.spheres.is_empty());
}

#[test]
fn malformed_scene_is_an_error() {
    assert!(matches!(Scene::from_json("{ \"light\": 3 }"), Err(Error::Scene(_))));
    assert!(matches!(Scene::from_json("not json"), Err(Error::Scene(_))));
}

#[test]
fn singular_sphere_is_rejected() {
    let json = r#"{
        "light": { "intensity": [1, 1, 1], "position": [-10, 10, -10] },
        "spheres": [
            {},
            { "transform": [ { "op": "scale", "x": 0.0, "y": 1.0, "z": 1.0 } ] }
        ]
    }"#;

    assert!(matches!(Scene::from_json(json), Err(Error::SingularTransform(1))));
}

#[test]
fn center_pixel_ray() {
    let s = small_scene(101);
    let r = s.ray_for_pixel(50, 50);

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, -5.0));
    assert_eq!(r.direction, Tuple4D::vector(0.0, 0.0, 1.0));
}

#[test]
fn center_pixel_ray_wide_canvas() {
    let s = Scene { canvas_width: 201, canvas_height: 101, ..Default::default() };
    let r = s.ray_for_pixel(100, 50);

    assert_eq!(r.direction, Tuple4D::vector(0.0, 0.0, 1.0));
}

#[test]
fn center_pixel_ray_tall_canvas() {
    let s = Scene { canvas_width: 101, canvas_height: 201, ..Default::default() };
    let r = s.ray_for_pixel(50, 100);

    assert_eq!(r.direction, Tuple4D::vector(0.0, 0.0, 1.0));
}

#[test]
fn wide_canvas_edges_are_symmetric() {
    let s = Scene { canvas_width: 200, canvas_height: 100, ..Default::default() };
    let top_left = s.ray_for_pixel(0, 0).direction;
    let bottom_right = s.ray_for_pixel(199, 99).direction;

    assert_eq!(top_left, Tuple4D::vector(-bottom_right.x, -bottom_right.y, bottom_right.z));
}

#[test]
fn render_wide_canvas_is_centered() {
    let s = Scene {
        canvas_width: 21,
        canvas_height: 11,
        wall_size: 14.0,
        ..Default::default()
    };
    let canvas = s.render().unwrap();

    // The sphere at the origin lands in the middle, clear of every edge.
    assert_ne!(canvas.pixel_at(10, 5), Some(Color::black()));
    assert_eq!(canvas.pixel_at(10, 0), Some(Color::black()));
    assert_eq!(canvas.pixel_at(10, 10), Some(Color::black()));
    assert_eq!(canvas.pixel_at(0, 5), Some(Color::black()));
    assert_eq!(canvas.pixel_at(20, 5), Some(Color::black()));
}

#[test]
fn corner_pixel_ray() {
    let s = small_scene(100);
    let r = s.ray_for_pixel(0, 0);

    // Top-left pixel center sits at (-3.465, 3.465) on the wall.
    let expected = (Tuple4D::point(-3.465, 3.465, 10.0) - s.eye).normalize();
    assert_eq!(r.direction, expected);
}

#[test]
fn color_at_miss_is_black() {
    let s = Scene::default();
    let r = Ray4D::new(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 1.0, 0.0));

    assert_eq!(s.color_at(&r).unwrap(), Color::black());
}

#[test]
fn color_at_hit_is_shaded() {
    let s = Scene {
        light: PointLight::new(Color::white(), Tuple4D::point(0.0, 0.0, -10.0)),
        spheres: vec![Sphere::new()],
        ..Default::default()
    };
    let r = Ray4D::new(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));

    // Eye, light and normal line up; full ambient + diffuse + specular.
    assert_eq!(s.color_at(&r).unwrap(), Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn color_at_uses_nearest_sphere() {
    let mut far = Material::default();
    far.color = Color::red();
    let mut near = Material::default();
    near.color = Color::blue();
    near.ambient = 1.0;
    near.diffuse = 0.0;
    near.specular = 0.0;

    let s = Scene {
        spheres: vec![
            Sphere::new().with_material(far),
            Sphere::new()
                .with_transform(crate::matrix::Matrix::scaling(2.0, 2.0, 2.0))
                .with_material(near),
        ],
        ..Default::default()
    };
    let r = Ray4D::new(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));

    assert_eq!(s.color_at(&r).unwrap(), Color::blue());
}

#[test]
fn render_small_canvas() {
    let s = small_scene(11);
    let canvas = s.render().unwrap();

    assert_eq!(canvas.width, 11);
    assert_eq!(canvas.height, 11);
    assert_ne!(canvas.pixel_at(5, 5), Some(Color::black()));
    assert_eq!(canvas.pixel_at(0, 0), Some(Color::black()));
    assert_eq!(canvas.pixel_at(10, 10), Some(Color::black()));
}

#[test]
fn render_empty_scene_is_black() {
    let s = Scene { spheres: Vec::new(), ..small_scene(4) };
    let canvas = s.render().unwrap();

    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(canvas.pixel_at(x, y), Some(Color::black()));
        }
    }
}
