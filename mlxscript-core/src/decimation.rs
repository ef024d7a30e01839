//! Typed descriptors for well-known simplification filters
//!
//! Scripts are usually generated to drive a fixed decimation pipeline rather
//! than written by hand. `QuadricDecimation` mirrors the parameter set of
//! MeshLab's quadric edge-collapse decimation filter so callers get named,
//! typed fields instead of assembling raw parameter lists, and
//! `pure_triangular` covers the common follow-up step.

use crate::filter::Filter;
use crate::param::{Param, ParamValue};
use crate::{Error, Result};

/// Name of the quadric edge-collapse decimation filter
pub const QUADRIC_DECIMATION: &str = "Simplification: Quadric Edge Collapse Decimation";

/// Name of the triangulation filter
pub const PURE_TRIANGULAR: &str = "Turn into a Pure-Triangular mesh";

/// Parameters of the quadric edge-collapse decimation filter.
///
/// Defaults match the values MeshLab saves for a 1000-face reduction. The
/// tool treats `target_perc` as overriding `target_face_num` when non-zero;
/// that convention lives in the tool, both fields are always written.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadricDecimation {
    /// The desired final number of faces
    pub target_face_num: i32,
    /// Desired final size as a fraction of the input, 0 to defer to
    /// `target_face_num`
    pub target_perc: f32,
    /// Quality threshold in [0..1] penalizing badly shaped faces
    pub quality_thr: f32,
    pub preserve_boundary: bool,
    /// Importance of the boundary during simplification, 1.0 = neutral
    pub boundary_weight: f32,
    pub preserve_normal: bool,
    pub preserve_topology: bool,
    /// Place collapsed vertices at the quadric-error minimizer
    pub optimal_placement: bool,
    pub planar_quadric: bool,
    /// Use per-vertex quality as an error amplification factor
    pub quality_weight: bool,
    /// Run a cleaning pass (unreferenced vertices, bad faces) afterwards
    pub auto_clean: bool,
    /// Restrict simplification to the selected faces
    pub selected: bool,
}

impl Default for QuadricDecimation {
    fn default() -> Self {
        Self {
            target_face_num: 1000,
            target_perc: 0.0,
            quality_thr: 0.3,
            preserve_boundary: false,
            boundary_weight: 1.0,
            preserve_normal: false,
            preserve_topology: false,
            optimal_placement: true,
            planar_quadric: false,
            quality_weight: false,
            auto_clean: true,
            selected: false,
        }
    }
}

impl QuadricDecimation {
    /// Decimate towards an absolute face budget
    pub fn with_target_faces(target_face_num: i32) -> Self {
        Self {
            target_face_num,
            ..Self::default()
        }
    }

    /// Decimate towards a fraction of the input face count
    pub fn with_target_perc(target_perc: f32) -> Self {
        Self {
            target_perc,
            ..Self::default()
        }
    }

    /// Build the filter entry for this configuration, with the labels and
    /// help text the tool itself saves.
    pub fn to_filter(&self) -> Filter {
        let params = vec![
            Param::new("TargetFaceNum", ParamValue::Int(self.target_face_num))
                .with_description("Target number of faces")
                .with_tooltip("The desired final number of faces."),
            Param::new("TargetPerc", ParamValue::Float(self.target_perc))
                .with_description("Percentage reduction (0..1)")
                .with_tooltip(
                    "If non zero, this parameter specifies the desired final size of the mesh \
                     as a percentage of the initial size.",
                ),
            Param::new("QualityThr", ParamValue::Float(self.quality_thr))
                .with_description("Quality threshold")
                .with_tooltip(
                    "Quality threshold for penalizing bad shaped faces.<br>The value is in the \
                     range [0..1]\n 0 accept any kind of face (no penalties),\n 0.5 penalize \
                     faces with quality < 0.5, proportionally to their shape",
                ),
            Param::new("PreserveBoundary", ParamValue::Bool(self.preserve_boundary))
                .with_description("Preserve Boundary of the mesh")
                .with_tooltip(
                    "The simplification process tries to do not affect mesh boundaries during \
                     simplification",
                ),
            Param::new("BoundaryWeight", ParamValue::Float(self.boundary_weight))
                .with_description("Boundary Preserving Weight")
                .with_tooltip(
                    "The importance of the boundary during simplification. Default (1.0) means \
                     that the boundary has the same importance of the rest. Values greater than \
                     1.0 raise boundary importance and has the effect of removing less vertices \
                     on the border.",
                ),
            Param::new("PreserveNormal", ParamValue::Bool(self.preserve_normal))
                .with_description("Preserve Normal")
                .with_tooltip(
                    "Try to avoid face flipping effects and try to preserve the original \
                     orientation of the surface",
                ),
            Param::new("PreserveTopology", ParamValue::Bool(self.preserve_topology))
                .with_description("Preserve Topology")
                .with_tooltip(
                    "Avoid all the collapses that should cause a topology change in the mesh \
                     (like closing holes, squeezing handles, etc). If checked the genus of the \
                     mesh should stay unchanged.",
                ),
            Param::new("OptimalPlacement", ParamValue::Bool(self.optimal_placement))
                .with_description("Optimal position of simplified vertices")
                .with_tooltip(
                    "Each collapsed vertex is placed in the position minimizing the quadric \
                     error.\n It can fail (creating bad spikes) in case of very flat areas.\n If \
                     disabled edges are collapsed onto one of the two original vertices and the \
                     final mesh is composed by a subset of the original vertices.",
                ),
            Param::new("PlanarQuadric", ParamValue::Bool(self.planar_quadric))
                .with_description("Planar Simplification")
                .with_tooltip(
                    "Add additional simplification constraints that improves the quality of the \
                     simplification of the planar portion of the mesh.",
                ),
            Param::new("QualityWeight", ParamValue::Bool(self.quality_weight))
                .with_description("Weighted Simplification")
                .with_tooltip(
                    "Use the Per-Vertex quality as a weighting factor for the simplification. \
                     The weight is used as a error amplification value, so a vertex with a high \
                     quality value will not be simplified and a portion of the mesh with low \
                     quality values will be aggressively simplified.",
                ),
            Param::new("AutoClean", ParamValue::Bool(self.auto_clean))
                .with_description("Post-simplification cleaning")
                .with_tooltip(
                    "After the simplification an additional set of steps is performed to clean \
                     the mesh (unreferenced vertices, bad faces, etc)",
                ),
            Param::new("Selected", ParamValue::Bool(self.selected))
                .with_description("Simplify only selected faces")
                .with_tooltip(
                    "The simplification is applied only to the selected set of faces.\n Take \
                     care of the target number of faces!",
                ),
        ];
        // Parameter names above are pairwise distinct
        Filter::from_unique_params(QUADRIC_DECIMATION, params)
    }

    /// Extract the configuration back out of a filter entry
    pub fn from_filter(filter: &Filter) -> Result<Self> {
        if filter.name != QUADRIC_DECIMATION {
            return Err(Error::WrongFilter {
                expected: QUADRIC_DECIMATION.to_string(),
                found: filter.name.clone(),
            });
        }
        Ok(Self {
            target_face_num: filter.int("TargetFaceNum")?,
            target_perc: filter.float("TargetPerc")?,
            quality_thr: filter.float("QualityThr")?,
            preserve_boundary: filter.boolean("PreserveBoundary")?,
            boundary_weight: filter.float("BoundaryWeight")?,
            preserve_normal: filter.boolean("PreserveNormal")?,
            preserve_topology: filter.boolean("PreserveTopology")?,
            optimal_placement: filter.boolean("OptimalPlacement")?,
            planar_quadric: filter.boolean("PlanarQuadric")?,
            quality_weight: filter.boolean("QualityWeight")?,
            auto_clean: filter.boolean("AutoClean")?,
            selected: filter.boolean("Selected")?,
        })
    }
}

/// The parameterless step converting polygonal faces to triangles
pub fn pure_triangular() -> Filter {
    Filter::new(PURE_TRIANGULAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_matches_saved_script_values() {
        let config = QuadricDecimation::default();
        assert_eq!(config.target_face_num, 1000);
        assert_eq!(config.target_perc, 0.0);
        assert_relative_eq!(config.quality_thr, 0.3);
        assert_relative_eq!(config.boundary_weight, 1.0);
        assert!(config.optimal_placement);
        assert!(config.auto_clean);
        assert!(!config.preserve_boundary);
        assert!(!config.selected);
    }

    #[test]
    fn test_to_filter_has_twelve_params() {
        let filter = QuadricDecimation::default().to_filter();
        assert_eq!(filter.name, QUADRIC_DECIMATION);
        assert_eq!(filter.param_count(), 12);
        assert_eq!(filter.int("TargetFaceNum").unwrap(), 1000);
        assert!(filter.boolean("OptimalPlacement").unwrap());
    }

    #[test]
    fn test_filter_roundtrip() {
        let config = QuadricDecimation {
            target_face_num: 5000,
            preserve_topology: true,
            ..Default::default()
        };
        let recovered = QuadricDecimation::from_filter(&config.to_filter()).unwrap();
        assert_eq!(recovered, config);
    }

    #[test]
    fn test_from_filter_rejects_other_filters() {
        let err = QuadricDecimation::from_filter(&pure_triangular()).unwrap_err();
        assert!(matches!(err, Error::WrongFilter { .. }));
    }

    #[test]
    fn test_pure_triangular_has_no_params() {
        let filter = pure_triangular();
        assert_eq!(filter.name, PURE_TRIANGULAR);
        assert_eq!(filter.param_count(), 0);
    }
}
