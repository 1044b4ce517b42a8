//! Serializable snapshot of the host's strips.
//!
//! Hosts describe the visible strips as a flat list. A transform strip
//! refers to its input by position in that list, and the input must come
//! earlier, which keeps the resulting graph acyclic.
//!
//! ```json
//! {
//!   "canvas": { "width": 1920, "height": 1080 },
//!   "strips": [
//!     { "type": "source", "name": "clip", "orig_size": [1280, 720] },
//!     { "type": "transform", "name": "t", "input": 0,
//!       "transform": { "scale_x": 0.5, "scale_y": 0.5 } }
//!   ]
//! }
//! ```

use crate::settings::ToolSettings;
use crate::strip::{SourceStrip, StripGraph, StripId};
use crate::types::{Canvas, CropSpec, Flip, GeometryError, Transform};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StripDescription {
    Source {
        #[serde(default)]
        name: String,
        #[serde(default)]
        flip: Flip,
        #[serde(default)]
        use_translation: bool,
        #[serde(default)]
        offset_x: f64,
        #[serde(default)]
        offset_y: f64,
        #[serde(default)]
        use_crop: bool,
        #[serde(default)]
        crop: CropSpec,
        #[serde(default)]
        orig_size: Option<(f64, f64)>,
    },
    Transform {
        #[serde(default)]
        name: String,
        #[serde(default)]
        flip: Flip,
        /// Index of the input strip in the description list.
        input: usize,
        #[serde(default)]
        transform: Transform,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub canvas: Canvas,
    #[serde(default)]
    pub settings: ToolSettings,
    #[serde(default)]
    pub strips: Vec<StripDescription>,
}

/// A built scene: the graph plus the id of every described strip.
#[derive(Debug, Clone)]
pub struct Scene {
    pub graph: StripGraph,
    pub canvas: Canvas,
    pub settings: ToolSettings,
    ids: Vec<StripId>,
}

impl SceneDescription {
    /// Validate the description and build the strip graph.
    pub fn build(&self) -> Result<Scene, GeometryError> {
        self.canvas.validate()?;
        self.settings.validate()?;

        let mut graph = StripGraph::new();
        let mut ids = Vec::with_capacity(self.strips.len());

        for (index, description) in self.strips.iter().enumerate() {
            let id = match description {
                StripDescription::Source {
                    name,
                    flip,
                    use_translation,
                    offset_x,
                    offset_y,
                    use_crop,
                    crop,
                    orig_size,
                } => {
                    let id = graph.add_source(
                        name.as_str(),
                        SourceStrip {
                            use_translation: *use_translation,
                            offset_x: *offset_x,
                            offset_y: *offset_y,
                            use_crop: *use_crop,
                            crop: *crop,
                            orig_size: *orig_size,
                        },
                    );
                    graph.set_flip(id, *flip)?;
                    id
                }
                StripDescription::Transform {
                    name,
                    flip,
                    input,
                    transform,
                } => {
                    let Some(&input_id) = ids.get(*input) else {
                        warn!(index, input, "transform input must precede the strip");
                        return Err(GeometryError::InvalidInput {
                            index,
                            input: *input,
                        });
                    };
                    let id = graph.add_transform(name.as_str(), input_id, *transform)?;
                    graph.set_flip(id, *flip)?;
                    id
                }
            };
            ids.push(id);
        }

        debug!(strips = ids.len(), "scene built");
        Ok(Scene {
            graph,
            canvas: self.canvas,
            settings: self.settings,
            ids,
        })
    }
}

impl Scene {
    /// Id of the strip at `index` in the description list.
    pub fn id(&self, index: usize) -> Result<StripId, GeometryError> {
        self.ids
            .get(index)
            .copied()
            .ok_or(GeometryError::UnknownStrip(index))
    }

    pub fn ids_for(&self, indices: &[usize]) -> Result<Vec<StripId>, GeometryError> {
        indices.iter().map(|&index| self.id(index)).collect()
    }

    /// Position of `id` in the description list.
    pub fn index_of(&self, id: StripId) -> Option<usize> {
        self.ids.iter().position(|&other| other == id)
    }

    pub fn ids(&self) -> &[StripId] {
        &self.ids
    }
}
