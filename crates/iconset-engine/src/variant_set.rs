//! Variant set assembly.

use iconset_core::NodeId;
use tracing::{debug, info, warn};

use crate::errors::{GenerateError, Result};
use crate::host::Host;
use crate::options::EngineOptions;
use crate::report::TraversalReport;

/// Notice shown when components could not be combined automatically.
pub const MANUAL_COMBINE_NOTICE: &str = "Components created, but they could not be combined \
     automatically. Select them and use \"Combine as variants\".";

/// Where and under which name a source's variant set is created.
#[derive(Debug, Clone, Copy)]
pub struct VariantSetPlan<'a> {
    pub name: &'a str,
    /// The icon the variants were generated from
    pub source: NodeId,
    /// Zero-based position of the source in the request
    pub source_index: usize,
    pub options: &'a EngineOptions,
}

/// Why components were left ungrouped.
#[derive(Debug, Clone, PartialEq)]
pub enum CombineFailure {
    /// The host has no way to combine variants
    Unavailable,
    /// The host refused to combine them
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum VariantSetOutcome {
    Grouped {
        set: NodeId,
        report: TraversalReport,
    },
    /// The components stay on the page, selected, for the user to combine.
    Ungrouped {
        components: Vec<NodeId>,
        reason: CombineFailure,
    },
}

/// Lay out `components` below the source and combine them into a variant set.
///
/// The components are moved to the page in a row starting at the anchor
/// point below the source. If the host cannot combine them they are left in
/// that row, selected, and the user is asked to combine them by hand.
pub fn assemble_variant_set<H: Host>(
    host: &mut H,
    components: &[NodeId],
    plan: &VariantSetPlan<'_>,
) -> Result<VariantSetOutcome> {
    if components.is_empty() {
        return Err(GenerateError::NoComponents);
    }
    let options = plan.options;
    let doc = host.document_mut();
    let page = doc.page();
    let source = doc.absolute_bounds(plan.source)?;
    let anchor_x = source.x;
    let anchor_y =
        source.bottom() + options.set_offset + plan.source_index as f64 * options.source_spacing;

    let mut x = anchor_x;
    for &component in components {
        doc.append_child(page, component)?;
        doc.set_position(component, x, anchor_y)?;
        x += doc.node(component)?.width + options.component_gap;
    }

    if !host.can_combine_as_variants() {
        warn!(set = plan.name, "host cannot combine variants, leaving components ungrouped");
        return Ok(leave_ungrouped(host, components, CombineFailure::Unavailable, options));
    }
    let set = match host.combine_as_variants(components, page) {
        Ok(set) => set,
        Err(err) => {
            warn!(
                set = plan.name,
                error = %err,
                "combining variants failed, leaving components ungrouped"
            );
            let reason = CombineFailure::Rejected(err.to_string());
            return Ok(leave_ungrouped(host, components, reason, options));
        }
    };

    let doc = host.document_mut();
    doc.set_name(set, plan.name)?;
    doc.set_position(set, anchor_x, anchor_y)?;
    if doc.node(set)?.kind.capabilities().auto_layout {
        doc.set_auto_layout(set, Some(options.set_layout()))?;
    }
    let report = apply_border(host, set, options);

    host.set_selection(&[set]);
    host.scroll_into_view(&[set]);
    info!(set = %set, name = plan.name, variants = components.len(), "variant set created");
    Ok(VariantSetOutcome::Grouped { set, report })
}

fn leave_ungrouped<H: Host>(
    host: &mut H,
    components: &[NodeId],
    reason: CombineFailure,
    options: &EngineOptions,
) -> VariantSetOutcome {
    host.set_selection(components);
    host.scroll_into_view(components);
    host.notify(MANUAL_COMBINE_NOTICE, options.notice_timeout());
    VariantSetOutcome::Ungrouped {
        components: components.to_vec(),
        reason,
    }
}

/// Dashed decorative border. Failures are recorded, never returned.
fn apply_border<H: Host>(host: &mut H, set: NodeId, options: &EngineOptions) -> TraversalReport {
    let doc = host.document_mut();
    let mut report = TraversalReport::new();
    let styled = doc
        .set_strokes(set, vec![options.border_paint()])
        .and_then(|()| doc.set_stroke_weight(set, options.border_weight))
        .and_then(|()| doc.set_stroke_align(set, options.border_align))
        .and_then(|()| doc.set_dash_pattern(set, &options.border_dash));
    match styled {
        Ok(()) => {
            debug!(set = %set, "border applied");
            report.applied(set);
        }
        Err(err) => {
            warn!(set = %set, error = %err, "failed to style variant set border");
            report.failed(set, err);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Canvas;
    use glam::DVec2;
    use iconset_core::{Document, NodeKind, SceneError, SceneNode, SceneResult, StrokeAlign};
    use std::time::Duration;

    /// Host whose combine call always fails.
    struct Refusing(Canvas);

    impl Host for Refusing {
        fn document(&self) -> &Document {
            self.0.document()
        }
        fn document_mut(&mut self) -> &mut Document {
            self.0.document_mut()
        }
        fn combine_as_variants(&mut self, _: &[NodeId], _: NodeId) -> SceneResult<NodeId> {
            Err(SceneError::Corrupt("combine crashed".into()))
        }
        fn notify(&mut self, message: &str, timeout: Option<Duration>) {
            self.0.notify(message, timeout)
        }
        fn scroll_into_view(&mut self, ids: &[NodeId]) {
            self.0.scroll_into_view(ids)
        }
        fn close(&mut self) {
            self.0.close()
        }
    }

    /// Host without the combine capability.
    struct NoCombine(Canvas);

    impl Host for NoCombine {
        fn document(&self) -> &Document {
            self.0.document()
        }
        fn document_mut(&mut self) -> &mut Document {
            self.0.document_mut()
        }
        fn can_combine_as_variants(&self) -> bool {
            false
        }
        fn notify(&mut self, message: &str, timeout: Option<Duration>) {
            self.0.notify(message, timeout)
        }
        fn scroll_into_view(&mut self, ids: &[NodeId]) {
            self.0.scroll_into_view(ids)
        }
        fn close(&mut self) {
            self.0.close()
        }
    }

    fn setup(host: &mut impl Host) -> (NodeId, Vec<NodeId>) {
        let doc = host.document_mut();
        let source = doc
            .add_root(SceneNode::new(NodeKind::Frame).with_bounds(100.0, 100.0, 100.0, 100.0))
            .unwrap();
        let small = doc.create_component(doc.page(), "Size=S", 24.0).unwrap();
        let large = doc.create_component(doc.page(), "Size=L", 48.0).unwrap();
        (source, vec![small, large])
    }

    fn plan<'a>(source: NodeId, index: usize, options: &'a EngineOptions) -> VariantSetPlan<'a> {
        VariantSetPlan {
            name: "Icon",
            source,
            source_index: index,
            options,
        }
    }

    #[test]
    fn test_grouped_set_is_named_laid_out_and_styled() {
        let options = EngineOptions::default();
        let mut canvas = Canvas::default();
        let (source, components) = setup(&mut canvas);

        let set_plan = plan(source, 0, &options);
        let outcome = assemble_variant_set(&mut canvas, &components, &set_plan).unwrap();

        let VariantSetOutcome::Grouped { set, report } = outcome else {
            panic!("expected a grouped set");
        };
        let doc = canvas.document();
        let node = doc.get(set).unwrap();
        assert_eq!(node.kind, NodeKind::ComponentSet);
        assert_eq!(node.name, "Icon");
        assert_eq!(node.position(), DVec2::new(100.0, 250.0));
        assert_eq!(doc.children(set), components.as_slice());
        assert_eq!(doc.get(components[0]).unwrap().position(), DVec2::new(24.0, 24.0));
        assert_eq!(doc.get(components[1]).unwrap().position(), DVec2::new(64.0, 24.0));
        assert_eq!(node.size(), DVec2::new(136.0, 96.0));
        assert_eq!(node.strokes, vec![options.border_paint()]);
        assert_eq!(node.stroke_weight, Some(2.0));
        assert_eq!(node.stroke_align, StrokeAlign::Inside);
        assert_eq!(node.dash_pattern.as_slice(), &[8.0, 4.0]);
        assert!(!report.has_failures());
        assert_eq!(doc.selection(), &[set]);
        assert_eq!(canvas.viewport(), &[set]);
    }

    #[test]
    fn test_source_index_moves_the_anchor() {
        let options = EngineOptions::default();
        let mut canvas = Canvas::default();
        let (source, components) = setup(&mut canvas);

        let set_plan = plan(source, 2, &options);
        let outcome = assemble_variant_set(&mut canvas, &components, &set_plan).unwrap();

        let VariantSetOutcome::Grouped { set, .. } = outcome else {
            panic!("expected a grouped set");
        };
        assert_eq!(canvas.document().get(set).unwrap().y, 650.0);
    }

    #[test]
    fn test_rejected_combine_leaves_components_selected() {
        let options = EngineOptions::default();
        let mut host = Refusing(Canvas::default());
        let (source, components) = setup(&mut host);

        let set_plan = plan(source, 0, &options);
        let outcome = assemble_variant_set(&mut host, &components, &set_plan).unwrap();

        assert_eq!(
            outcome,
            VariantSetOutcome::Ungrouped {
                components: components.clone(),
                reason: CombineFailure::Rejected("corrupt document: combine crashed".into()),
            }
        );
        let doc = host.document();
        assert_eq!(doc.get(components[0]).unwrap().position(), DVec2::new(100.0, 250.0));
        assert_eq!(doc.get(components[1]).unwrap().position(), DVec2::new(140.0, 250.0));
        assert_eq!(doc.parent(components[1]), Some(doc.page()));
        assert_eq!(doc.selection(), components.as_slice());
        assert_eq!(host.0.notices().len(), 1);
        assert_eq!(host.0.notices()[0].message, MANUAL_COMBINE_NOTICE);
    }

    #[test]
    fn test_unavailable_combine() {
        let options = EngineOptions::default();
        let mut host = NoCombine(Canvas::default());
        let (source, components) = setup(&mut host);

        let set_plan = plan(source, 0, &options);
        let outcome = assemble_variant_set(&mut host, &components, &set_plan).unwrap();

        assert!(matches!(
            outcome,
            VariantSetOutcome::Ungrouped {
                reason: CombineFailure::Unavailable,
                ..
            }
        ));
        assert_eq!(host.0.viewport(), components.as_slice());
    }

    #[test]
    fn test_no_components() {
        let options = EngineOptions::default();
        let mut canvas = Canvas::default();
        let (source, _) = setup(&mut canvas);
        let result = assemble_variant_set(&mut canvas, &[], &plan(source, 0, &options));
        assert_eq!(result, Err(GenerateError::NoComponents));
    }

    #[test]
    fn test_border_failure_is_recorded() {
        let options = EngineOptions {
            border_weight: -1.0,
            ..Default::default()
        };
        let mut canvas = Canvas::default();
        let (source, components) = setup(&mut canvas);

        let set_plan = plan(source, 0, &options);
        let outcome = assemble_variant_set(&mut canvas, &components, &set_plan).unwrap();

        let VariantSetOutcome::Grouped { set, report } = outcome else {
            panic!("expected a grouped set");
        };
        assert!(report.outcome(set).is_some_and(|o| o.is_failure()));
        assert_eq!(canvas.document().get(set).unwrap().name, "Icon");
        assert_eq!(canvas.document().selection(), &[set]);
    }
}
