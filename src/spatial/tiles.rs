//! Tile definitions and their transformed variants
//!
//! A [`TileDefinition`] is authored data: edge tags, a weight and the set of
//! transforms the author allows. Expansion turns every definition into
//! immutable [`TileState`] values, one untransformed variant plus one clone
//! per requested rotation or reflection. Rotations and reflections are never
//! combined.
//!
//! Edge tags are read clockwise around the tile: top left to right, right top
//! to bottom, bottom right to left, left bottom to top. Under that reading two
//! faces meet when one sequence equals the other reversed, a rotation is a
//! cyclic shift of the faces, and a reflection reverses every face.

use crate::io::configuration::{DEFAULT_TILE_WEIGHT, FALLBACK_TILE_WEIGHT};
use crate::spatial::grid::{DIRECTIONS_2D, Direction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One symbol of an edge tag sequence
///
/// Numeric tags compare by their printed form, so `1` and `1.0` name the same
/// tag while text never equals a number.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeTag {
    /// Integral tag
    Number(i64),
    /// Fractional tag
    Float(f64),
    /// Textual tag
    Text(String),
}

impl PartialEq for EdgeTag {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Text(_), _) | (_, Self::Text(_)) => false,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for EdgeTag {}

impl Hash for EdgeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Text(text) => {
                0_u8.hash(state);
                text.hash(state);
            }
            Self::Number(_) | Self::Float(_) => {
                1_u8.hash(state);
                self.to_string().hash(state);
            }
        }
    }
}

impl fmt::Display for EdgeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Float(value) => fmt::Display::fmt(value, f),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for EdgeTag {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<f64> for EdgeTag {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for EdgeTag {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Clockwise rotation in quarter turns
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    /// No rotation
    #[default]
    None,
    /// 90 degrees clockwise
    Quarter,
    /// 180 degrees
    Half,
    /// 270 degrees clockwise
    ThreeQuarter,
}

impl Rotation {
    /// Number of clockwise quarter turns
    pub const fn quarter_turns(self) -> usize {
        match self {
            Self::None => 0,
            Self::Quarter => 1,
            Self::Half => 2,
            Self::ThreeQuarter => 3,
        }
    }

    /// Rotation angle in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::None => 0,
            Self::Quarter => 90,
            Self::Half => 180,
            Self::ThreeQuarter => 270,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::None),
            90 => Ok(Self::Quarter),
            180 => Ok(Self::Half),
            270 => Ok(Self::ThreeQuarter),
            other => Err(format!("rotation must be 0, 90, 180 or 270 degrees, got {other}")),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// The transform that produced a tile state from its definition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Transform {
    /// Clockwise rotation
    pub rotation: Rotation,
    /// Mirrored left to right
    pub reflect_x: bool,
    /// Mirrored top to bottom
    pub reflect_y: bool,
}

impl Transform {
    /// The untransformed variant
    pub const IDENTITY: Self = Self {
        rotation: Rotation::None,
        reflect_x: false,
        reflect_y: false,
    };

    /// Rotation-only transform
    pub const fn rotated(rotation: Rotation) -> Self {
        Self {
            rotation,
            reflect_x: false,
            reflect_y: false,
        }
    }

    /// Test whether this is the identity
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Suffix appended to the definition name for this variant
    pub fn suffix(&self) -> String {
        let mut suffix = String::new();
        if self.rotation != Rotation::None {
            suffix.push_str(&format!("-rot-{}", self.rotation.quarter_turns()));
        }
        if self.reflect_x {
            suffix.push_str("-ref-x");
        }
        if self.reflect_y {
            suffix.push_str("-ref-y");
        }
        suffix
    }
}

const fn default_weight() -> f64 {
    DEFAULT_TILE_WEIGHT
}

/// Author-supplied tile template before transform expansion
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileDefinition {
    /// Opaque reference to the tile's visual content
    #[serde(default)]
    pub content: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Relative selection weight
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Top edge tags, left to right
    #[serde(default)]
    pub top: Vec<EdgeTag>,
    /// Right edge tags, top to bottom
    #[serde(default)]
    pub right: Vec<EdgeTag>,
    /// Bottom edge tags, right to left
    #[serde(default)]
    pub bottom: Vec<EdgeTag>,
    /// Left edge tags, bottom to top
    #[serde(default)]
    pub left: Vec<EdgeTag>,
    /// Additional rotated variants to generate
    #[serde(default)]
    pub rotations: Vec<Rotation>,
    /// Generate a left-right mirrored variant
    #[serde(default, alias = "reflectX")]
    pub reflect_x: bool,
    /// Generate a top-bottom mirrored variant
    #[serde(default, alias = "reflectY")]
    pub reflect_y: bool,
}

impl Default for TileDefinition {
    fn default() -> Self {
        Self {
            content: String::new(),
            name: String::new(),
            weight: DEFAULT_TILE_WEIGHT,
            top: Vec::new(),
            right: Vec::new(),
            bottom: Vec::new(),
            left: Vec::new(),
            rotations: Vec::new(),
            reflect_x: false,
            reflect_y: false,
        }
    }
}

impl TileDefinition {
    /// Definition with the same tags on all four edges
    pub fn uniform(name: &str, tags: &[EdgeTag]) -> Self {
        Self {
            name: name.to_string(),
            top: tags.to_vec(),
            right: tags.to_vec(),
            bottom: tags.to_vec(),
            left: tags.to_vec(),
            ..Self::default()
        }
    }

    /// Set the weight
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the four edges
    #[must_use]
    pub fn with_edges(
        mut self,
        top: Vec<EdgeTag>,
        right: Vec<EdgeTag>,
        bottom: Vec<EdgeTag>,
        left: Vec<EdgeTag>,
    ) -> Self {
        self.top = top;
        self.right = right;
        self.bottom = bottom;
        self.left = left;
        self
    }

    /// Set the allowed rotations
    #[must_use]
    pub fn with_rotations(mut self, rotations: &[Rotation]) -> Self {
        self.rotations = rotations.to_vec();
        self
    }

    /// Set the allowed reflections
    #[must_use]
    pub fn with_reflections(mut self, reflect_x: bool, reflect_y: bool) -> Self {
        self.reflect_x = reflect_x;
        self.reflect_y = reflect_y;
        self
    }

    /// Test whether the authored weight is finite and positive
    pub const fn has_valid_weight(&self) -> bool {
        self.weight.is_finite() && self.weight > 0.0
    }

    /// Weight actually used by the solver
    pub const fn effective_weight(&self) -> f64 {
        if self.has_valid_weight() {
            self.weight
        } else {
            FALLBACK_TILE_WEIGHT
        }
    }

    /// Requested transforms in generation order, excluding the identity
    ///
    /// Repeated rotations are dropped, keeping the first occurrence.
    pub fn transforms(&self) -> Vec<Transform> {
        let mut transforms: Vec<Transform> = Vec::new();
        for &rotation in &self.rotations {
            let transform = Transform::rotated(rotation);
            if rotation != Rotation::None && !transforms.contains(&transform) {
                transforms.push(transform);
            }
        }
        if self.reflect_x {
            transforms.push(Transform {
                reflect_x: true,
                ..Transform::IDENTITY
            });
        }
        if self.reflect_y {
            transforms.push(Transform {
                reflect_y: true,
                ..Transform::IDENTITY
            });
        }
        transforms
    }

    /// Edges indexed by [`Direction::index`]
    fn edges(&self) -> [Vec<EdgeTag>; DIRECTIONS_2D] {
        [
            self.top.clone(),
            self.bottom.clone(),
            self.left.clone(),
            self.right.clone(),
        ]
    }
}

/// One concrete, indexed tile variant
#[derive(Clone, Debug, PartialEq)]
pub struct TileState {
    /// Index of the definition this state was produced from
    pub base: usize,
    /// Transform applied to the definition
    pub transform: Transform,
    /// Selection weight, always positive
    pub weight: f64,
    /// Display name including the transform suffix
    pub name: String,
    edges: [Vec<EdgeTag>; DIRECTIONS_2D],
}

impl TileState {
    /// Build the variant of `definition` (at index `base`) under `transform`
    pub fn from_definition(base: usize, definition: &TileDefinition, transform: Transform) -> Self {
        Self {
            base,
            transform,
            weight: definition.effective_weight(),
            name: format!("{}{}", definition.name, transform.suffix()),
            edges: transform_edges(&definition.edges(), transform),
        }
    }

    /// Tags on a planar face; volumetric faces carry none
    pub fn edge(&self, direction: Direction) -> &[EdgeTag] {
        self.edges
            .get(direction.index())
            .map_or(Default::default(), Vec::as_slice)
    }
}

fn reversed(tags: &[EdgeTag]) -> Vec<EdgeTag> {
    tags.iter().rev().cloned().collect()
}

fn transform_edges(
    edges: &[Vec<EdgeTag>; DIRECTIONS_2D],
    transform: Transform,
) -> [Vec<EdgeTag>; DIRECTIONS_2D] {
    let [top, bottom, left, right] = edges;

    if transform.reflect_x {
        return [reversed(top), reversed(bottom), reversed(right), reversed(left)];
    }
    if transform.reflect_y {
        return [reversed(bottom), reversed(top), reversed(left), reversed(right)];
    }

    // Clockwise face order; a quarter turn moves each face one step along it
    let mut clockwise = [top, right, bottom, left].map(Vec::clone);
    clockwise.rotate_right(transform.rotation.quarter_turns());
    let [rotated_top, rotated_right, rotated_bottom, rotated_left] = clockwise;
    [rotated_top, rotated_bottom, rotated_left, rotated_right]
}

/// Expand definitions into tile states
///
/// Every definition's untransformed variant comes first, in definition order,
/// so state `i` is definition `i` for `i < definitions.len()`. Transform clones
/// follow, grouped by definition.
pub fn expand_definitions(definitions: &[TileDefinition]) -> Vec<TileState> {
    let mut states: Vec<TileState> = definitions
        .iter()
        .enumerate()
        .map(|(base, definition)| TileState::from_definition(base, definition, Transform::IDENTITY))
        .collect();

    for (base, definition) in definitions.iter().enumerate() {
        states.extend(
            definition
                .transforms()
                .into_iter()
                .map(|transform| TileState::from_definition(base, definition, transform)),
        );
    }

    states
}
