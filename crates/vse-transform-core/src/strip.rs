//! Strip arena.
//!
//! Strips reference their input by [`StripId`] instead of holding each other
//! directly. A transform strip can only be created for an input that is
//! already in the graph, so chains are acyclic by construction.

use crate::types::{CropSpec, Flip, GeometryError, Transform};
use id_arena::{Arena, Id};
use serde::{Deserialize, Serialize};

pub type StripId = Id<Strip>;

/// A leaf strip: movie, image, scene or generated source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceStrip {
    pub use_translation: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub use_crop: bool,
    pub crop: CropSpec,
    /// Intrinsic pixel size. `None` for generated strips (color, text)
    /// which always fill the canvas.
    pub orig_size: Option<(f64, f64)>,
}

impl SourceStrip {
    /// A source with an intrinsic size and neither translation nor crop.
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            orig_size: Some((width, height)),
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.use_translation = true;
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    pub fn with_crop(mut self, crop: CropSpec) -> Self {
        self.use_crop = true;
        self.crop = crop;
        self
    }
}

/// A strip that translates, scales and rotates its single input.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStrip {
    pub input: StripId,
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StripKind {
    Source(SourceStrip),
    Transform(TransformStrip),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Strip {
    pub name: String,
    pub kind: StripKind,
    pub flip: Flip,
}

impl Strip {
    pub fn is_transform(&self) -> bool {
        matches!(self.kind, StripKind::Transform(_))
    }

    pub fn as_source(&self) -> Option<&SourceStrip> {
        match &self.kind {
            StripKind::Source(source) => Some(source),
            StripKind::Transform(_) => None,
        }
    }

    pub fn as_transform(&self) -> Option<&TransformStrip> {
        match &self.kind {
            StripKind::Transform(node) => Some(node),
            StripKind::Source(_) => None,
        }
    }
}

/// A change for the host to write back to one strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripUpdate {
    /// New parameters for a transform strip.
    Transform(Transform),
    /// New offset for a translated source strip.
    Offset { x: f64, y: f64 },
}

/// Arena holding every strip the host currently shows.
#[derive(Debug, Clone, Default)]
pub struct StripGraph {
    strips: Arena<Strip>,
}

impl StripGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, name: impl Into<String>, source: SourceStrip) -> StripId {
        self.strips.alloc(Strip {
            name: name.into(),
            kind: StripKind::Source(source),
            flip: Flip::default(),
        })
    }

    /// Add a transform strip on top of an existing input.
    pub fn add_transform(
        &mut self,
        name: impl Into<String>,
        input: StripId,
        transform: Transform,
    ) -> Result<StripId, GeometryError> {
        self.get(input)?;
        Ok(self.strips.alloc(Strip {
            name: name.into(),
            kind: StripKind::Transform(TransformStrip { input, transform }),
            flip: Flip::default(),
        }))
    }

    pub fn get(&self, id: StripId) -> Result<&Strip, GeometryError> {
        self.strips
            .get(id)
            .ok_or(GeometryError::UnknownStrip(id.index()))
    }

    pub fn get_mut(&mut self, id: StripId) -> Result<&mut Strip, GeometryError> {
        self.strips
            .get_mut(id)
            .ok_or(GeometryError::UnknownStrip(id.index()))
    }

    pub fn set_flip(&mut self, id: StripId, flip: Flip) -> Result<(), GeometryError> {
        self.get_mut(id)?.flip = flip;
        Ok(())
    }

    /// Replace the transform of a transform strip.
    pub fn set_transform(
        &mut self,
        id: StripId,
        transform: Transform,
    ) -> Result<(), GeometryError> {
        match &mut self.get_mut(id)?.kind {
            StripKind::Transform(node) => {
                node.transform = transform;
                Ok(())
            }
            StripKind::Source(_) => Err(GeometryError::NotATransform(id.index())),
        }
    }

    /// Write an update produced by one of the operators back to the graph.
    pub fn apply_update(&mut self, id: StripId, update: StripUpdate) -> Result<(), GeometryError> {
        match update {
            StripUpdate::Transform(transform) => self.set_transform(id, transform),
            StripUpdate::Offset { x, y } => match &mut self.get_mut(id)?.kind {
                StripKind::Source(source) => {
                    source.use_translation = true;
                    source.offset_x = x;
                    source.offset_y = y;
                    Ok(())
                }
                StripKind::Transform(_) => Err(GeometryError::NotASource(id.index())),
            },
        }
    }

    /// Transform strip and its input, or `NotATransform`.
    pub fn transform_node(&self, id: StripId) -> Result<(&TransformStrip, &Strip), GeometryError> {
        let node = self
            .get(id)?
            .as_transform()
            .ok_or(GeometryError::NotATransform(id.index()))?;
        Ok((node, self.get(node.input)?))
    }

    /// The first source strip below `id`, following transform inputs.
    pub fn leaf_of(&self, id: StripId) -> Result<(StripId, &SourceStrip), GeometryError> {
        let mut current = id;
        loop {
            match &self.get(current)?.kind {
                StripKind::Source(source) => return Ok((current, source)),
                StripKind::Transform(node) => current = node.input,
            }
        }
    }

    /// Strips that are not the input of any transform strip.
    pub fn top_level(&self) -> Vec<StripId> {
        let inputs: Vec<StripId> = self
            .strips
            .iter()
            .filter_map(|(_, strip)| strip.as_transform().map(|node| node.input))
            .collect();
        self.strips
            .iter()
            .map(|(id, _)| id)
            .filter(|id| !inputs.contains(id))
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = StripId> + '_ {
        self.strips.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.len() == 0
    }
}
