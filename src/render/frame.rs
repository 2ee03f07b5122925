use crate::core::{IndexScale, Margin, PlotArea, ValueScale, Viewport};
use crate::error::{GraphError, GraphResult};
use crate::interaction::HoverState;
use crate::layout::{LayoutExtras, Lifecycle, ShapeGeometry, ShapeRecord};
use crate::transition::ShapeTransition;

/// Backend-agnostic output of one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub margin: Margin,
    pub plot: PlotArea,
    /// Current shapes in projection order, then shapes still exiting.
    pub shapes: Vec<ShapeRecord>,
    pub transitions: Vec<ShapeTransition>,
    pub index_scale: Option<IndexScale>,
    pub value_scale: Option<ValueScale>,
    pub index_domain: Vec<String>,
    pub value_domain: Option<(f64, f64)>,
    pub extras: LayoutExtras,
    pub hover: HoverState,
    /// Set when the cycle failed; the frame is otherwise empty.
    pub error: Option<GraphError>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, margin: Margin) -> Self {
        Self {
            viewport,
            margin,
            plot: PlotArea::from_viewport(viewport, margin),
            shapes: Vec::new(),
            transitions: Vec::new(),
            index_scale: None,
            value_scale: None,
            index_domain: Vec::new(),
            value_domain: None,
            extras: LayoutExtras::None,
            hover: HoverState::default(),
            error: None,
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: GraphError) -> Self {
        self.error = Some(error);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn count(&self, lifecycle: Lifecycle) -> usize {
        self.shapes
            .iter()
            .filter(|shape| shape.lifecycle == lifecycle)
            .count()
    }

    #[must_use]
    pub fn shape(&self, identity: &str) -> Option<&ShapeRecord> {
        self.shapes.iter().find(|shape| shape.identity == identity)
    }

    pub fn validate(&self) -> GraphResult<()> {
        if !self.viewport.is_valid() {
            return Err(GraphError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for shape in &self.shapes {
            if !geometry_is_finite(&shape.geometry) {
                return Err(GraphError::InvalidData(format!(
                    "shape `{}` has non-finite geometry",
                    shape.identity
                )));
            }
        }

        Ok(())
    }
}

fn finite_point(p: (f64, f64)) -> bool {
    p.0.is_finite() && p.1.is_finite()
}

fn geometry_is_finite(geometry: &ShapeGeometry) -> bool {
    match geometry {
        ShapeGeometry::Bar(bar) => {
            finite_point(bar.offset) && bar.segments.iter().all(|s| s.rect.is_finite())
        }
        ShapeGeometry::Grid(row) => {
            finite_point(row.offset)
                && row.extent.is_finite()
                && row.cells.iter().all(|c| c.rect.is_finite())
        }
        ShapeGeometry::Line(line) => {
            line.points.iter().copied().all(finite_point)
                && line.baseline.iter().copied().all(finite_point)
        }
        ShapeGeometry::Pie(pie) => {
            finite_point(pie.center)
                && pie.radius.is_finite()
                && pie
                    .wedges
                    .iter()
                    .all(|w| w.start_angle.is_finite() && w.end_angle.is_finite())
        }
    }
}
