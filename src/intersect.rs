use crate::sphere::Sphere;

/// An intersection.
///
/// Records that some ray hit the sphere `what` at offset `t` along the ray.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub what: &'a Sphere,
}

/// Two `Intersection`s are equal if their offsets `t` are equal and they
/// point at the *same* sphere (not merely an identical one).
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.what, other.what)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, what: &'a Sphere) -> Intersection<'a> {
        Intersection { t, what }
    }
}

/// A collection of intersections.
///
/// Intersections are kept in the order they were found, typically sphere by
/// sphere. Nothing here depends on that order being sorted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Intersections<'a> {
    pub intersections: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    /// Creates a new, empty list of intersections.
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    pub fn push(&mut self, i: Intersection<'a>) {
        self.intersections.push(i);
    }

    /// Moves every intersection of `other` onto the end of this list.
    pub fn append(&mut self, other: Intersections<'a>) {
        self.intersections.extend(other.intersections);
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intersection<'a>> {
        self.intersections.iter()
    }

    /// The visible intersection, if any.
    ///
    /// This is the intersection with the lowest nonnegative `t`. Intersections
    /// behind the ray origin (negative `t`) are never hits; if there are only
    /// those, or none at all, this returns `None`.
    pub fn hit(&self) -> Option<Intersection<'a>> {
        self.intersections.iter()
            .filter(|i| i.t >= 0.0)
            .fold(None, |best: Option<Intersection<'a>>, i| match best {
                Some(b) if b.t <= i.t => Some(b),
                _ => Some(*i),
            })
    }
}

impl<'a> From<Vec<Intersection<'a>>> for Intersections<'a> {
    fn from(intersections: Vec<Intersection<'a>>) -> Intersections<'a> {
        Intersections { intersections }
    }
}

#[test]
fn hit_all_positive() {
    let s = Sphere::new();
    let i1 = Intersection::new(1.0, &s);
    let i2 = Intersection::new(2.0, &s);
    let xs: Intersections = vec![i2, i1].into();

    assert_eq!(xs.hit(), Some(i1));
}

#[test]
fn hit_some_negative() {
    let s = Sphere::new();
    let i1 = Intersection::new(-1.0, &s);
    let i2 = Intersection::new(1.0, &s);
    let xs: Intersections = vec![i2, i1].into();

    assert_eq!(xs.hit(), Some(i2));
}

#[test]
fn hit_all_negative() {
    let s = Sphere::new();
    let xs: Intersections = vec![
        Intersection::new(-2.0, &s),
        Intersection::new(-1.0, &s),
    ].into();

    assert_eq!(xs.hit(), None);
}

#[test]
fn hit_empty() {
    assert_eq!(Intersections::new().hit(), None);
}

#[test]
fn hit_lowest_nonnegative() {
    let s = Sphere::new();
    let i1 = Intersection::new(5.0, &s);
    let i2 = Intersection::new(7.0, &s);
    let i3 = Intersection::new(-3.0, &s);
    let i4 = Intersection::new(2.0, &s);
    let xs: Intersections = vec![i1, i2, i3, i4].into();

    assert_eq!(xs.hit(), Some(i4));
}

#[test]
fn hit_at_zero_counts() {
    let s = Sphere::new();
    let i1 = Intersection::new(0.0, &s);
    let i2 = Intersection::new(3.0, &s);
    let xs: Intersections = vec![i2, i1].into();

    assert_eq!(xs.hit(), Some(i1));
}

#[test]
fn hit_ignores_order() {
    let s = Sphere::new();
    let ts = [5.0, 7.0, -3.0, 2.0];

    let forward: Intersections = ts.iter()
        .map(|&t| Intersection::new(t, &s)).collect::<Vec<_>>().into();
    let backward: Intersections = ts.iter().rev()
        .map(|&t| Intersection::new(t, &s)).collect::<Vec<_>>().into();

    assert_eq!(forward.hit().map(|i| i.t), Some(2.0));
    assert_eq!(backward.hit().map(|i| i.t), Some(2.0));
}

#[test]
fn hit_tracks_object() {
    let s1 = Sphere::new();
    let s2 = Sphere::new();
    let mut xs = Intersections::new();
    xs.push(Intersection::new(4.0, &s1));
    xs.push(Intersection::new(3.0, &s2));

    let hit = xs.hit().unwrap();
    assert!(std::ptr::eq(hit.what, &s2));
    assert_ne!(hit, Intersection::new(3.0, &s1));
}
