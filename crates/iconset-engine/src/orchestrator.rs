//! Drives the variant pipeline for every selected icon.

use iconset_core::NodeId;
use tracing::{debug, info, warn};

use crate::assemble::{build_component, component_name, normalize_scale_constraints};
use crate::errors::{GenerateError, Result, ValidationError};
use crate::geometry::{compute_content_bounds, content_scale_factor, source_size};
use crate::host::Host;
use crate::options::EngineOptions;
use crate::outline::{flatten_subtree, outline_strokes};
use crate::report::TraversalReport;
use crate::request::{GenerationRequest, VariantSpec};
use crate::stroke::apply_stroke_weight;
use crate::variant_set::{assemble_variant_set, CombineFailure, VariantSetOutcome, VariantSetPlan};

/// A source icon whose variants could not be built.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFailure {
    /// Zero-based position in the request
    pub index: usize,
    pub source: NodeId,
    pub error: GenerateError,
}

/// Result of one generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    /// Set when the request was refused before any edit
    pub rejected: Option<ValidationError>,
    pub sets: Vec<NodeId>,
    pub components: Vec<NodeId>,
    pub failures: Vec<SourceFailure>,
    /// Set when grouping failed and the remaining sources were not processed
    pub ungrouped: Option<CombineFailure>,
    pub report: TraversalReport,
}

impl GenerationSummary {
    /// Whether the request passed validation.
    pub fn is_accepted(&self) -> bool {
        self.rejected.is_none()
    }

    pub fn terminated_early(&self) -> bool {
        self.ungrouped.is_some()
    }
}

enum SourceOutcome {
    Grouped(NodeId),
    Ungrouped(CombineFailure),
}

/// Runs generation requests against a host.
pub struct Generator<'a, H: Host> {
    host: &'a mut H,
    options: &'a EngineOptions,
}

impl<'a, H: Host> Generator<'a, H> {
    pub fn new(host: &'a mut H, options: &'a EngineOptions) -> Self {
        Self { host, options }
    }

    /// Generate a variant set for every source node in the request.
    ///
    /// Never fails: every problem ends up as a user notice and in the
    /// returned summary.
    pub fn run(&mut self, request: &GenerationRequest) -> GenerationSummary {
        let mut summary = GenerationSummary::default();
        if let Err(err) = request.validate() {
            debug!(error = %err, "request rejected");
            self.notify(&err.to_string());
            summary.rejected = Some(err);
            return summary;
        }

        let base_name = request.component_name();
        let numbered = request.source_nodes.len() > 1;
        for (index, &source) in request.source_nodes.iter().enumerate() {
            let name = if numbered {
                format!("{base_name} {}", index + 1)
            } else {
                base_name.to_string()
            };
            match self.process_source(index, source, &name, request, &mut summary) {
                Ok(SourceOutcome::Grouped(set)) => summary.sets.push(set),
                Ok(SourceOutcome::Ungrouped(reason)) => {
                    summary.ungrouped = Some(reason);
                    return summary;
                }
                Err(error) => {
                    warn!(source = %source, index, error = %error, "source failed");
                    let n = index + 1;
                    self.notify(&format!("Failed to create variants for icon {n}: {error}"));
                    summary.failures.push(SourceFailure { index, source, error });
                }
            }
        }

        info!(
            sets = summary.sets.len(),
            variants = summary.components.len(),
            "generation finished"
        );
        self.notify(&format!(
            "Created {} variant set(s) with {} variants",
            summary.sets.len(),
            summary.components.len()
        ));
        summary
    }

    fn process_source(
        &mut self,
        index: usize,
        source: NodeId,
        name: &str,
        request: &GenerationRequest,
        summary: &mut GenerationSummary,
    ) -> Result<SourceOutcome> {
        let doc = self.host.document();
        let node = doc.node(source)?;
        let size = source_size(node);
        let content = compute_content_bounds(doc, source)?;
        if !content.is_bounded() {
            return Err(GenerateError::Unbounded);
        }
        debug!(
            source = %source,
            size,
            width = content.width(),
            height = content.height(),
            "source measured"
        );

        let mut components = Vec::with_capacity(request.variants.len());
        for variant in &request.variants {
            if let Some(factor) = content_scale_factor(variant.size, &content) {
                debug!(variant = %variant.name, factor, "content scale factor");
            }
            match self.build_variant(source, variant, request, &mut summary.report) {
                Ok(component) => components.push(component),
                Err(err) => {
                    warn!(
                        source = %source,
                        variant = %variant.name,
                        error = %err,
                        "variant failed"
                    );
                    let message = format!("Failed to create variant \"{}\": {err}", variant.name);
                    self.notify(&message);
                }
            }
        }
        if components.is_empty() {
            return Err(GenerateError::NoComponents);
        }
        summary.components.extend(&components);

        let plan = VariantSetPlan {
            name,
            source,
            source_index: index,
            options: self.options,
        };
        match assemble_variant_set(self.host, &components, &plan)? {
            VariantSetOutcome::Grouped { set, report } => {
                summary.report.merge(report);
                Ok(SourceOutcome::Grouped(set))
            }
            VariantSetOutcome::Ungrouped { reason, .. } => Ok(SourceOutcome::Ungrouped(reason)),
        }
    }

    /// Clone the source and turn the clone into one variant component.
    ///
    /// The clone is removed again if any step fails.
    fn build_variant(
        &mut self,
        source: NodeId,
        variant: &VariantSpec,
        request: &GenerationRequest,
        report: &mut TraversalReport,
    ) -> Result<NodeId> {
        let mut root = self.host.document_mut().clone_subtree(source)?;
        let result = self.transform_clone(&mut root, variant, request, report);
        if result.is_err() {
            let doc = self.host.document_mut();
            if doc.contains(root) {
                let removed = doc.set_locked(root, false).and_then(|()| doc.remove(root));
                if let Err(err) = removed {
                    warn!(node = %root, error = %err, "failed to remove transient clone");
                }
            }
        }
        result
    }

    fn transform_clone(
        &mut self,
        root: &mut NodeId,
        variant: &VariantSpec,
        request: &GenerationRequest,
        report: &mut TraversalReport,
    ) -> Result<NodeId> {
        let doc = self.host.document_mut();
        for child in doc.children(*root).to_vec() {
            normalize_scale_constraints(doc, child, report);
        }
        doc.resize(*root, variant.size, variant.size)?;

        if let Some(weight) = variant.stroke_weight(request.stroke_enabled) {
            report.merge(apply_stroke_weight(doc, *root, weight));
        }
        if request.outline_flatten_enabled {
            let (outlined, outline_report) = outline_strokes(self.host, *root);
            *root = outlined;
            report.merge(outline_report);
            let (flattened, flatten_report) = flatten_subtree(self.host, *root);
            *root = flattened;
            report.merge(flatten_report);
        }

        let name = component_name(request.property_name(), &variant.name);
        let built = build_component(self.host.document_mut(), *root, variant.size, &name)?;
        report.merge(built.report);
        Ok(built.component)
    }

    fn notify(&mut self, message: &str) {
        self.host.notify(message, self.options.notice_timeout());
    }
}
