//! Property panels
//!
//! Keeps the transform and CAD panels in step with the selection. Numeric
//! fields support two gestures: scrubbing (press and drag horizontally) and
//! typing (double click or focus, commit with Enter or blur). Only one field
//! is ever scrubbed or edited at a time.
//!
//! Physical property readouts are pulled again after every applied change.

mod field;
mod model;

use glam::Vec3;
use orbit_core::{MaterialKind, PhysicalProperties, is_cad_excluded};
use orbit_scene::{NodeId, ObjectId, Scene};
use tracing::{debug, warn};

use crate::config::DragConfig;
use crate::registry::{ObjectRegistry, SceneObject};
use crate::selection::{Axis, SelectionEngine};

pub use field::{
    FieldClass, FieldId, float_or, format_fixed, format_integer, format_one_decimal, int_or,
    parse_float, parse_int, round_half_up,
};
pub use model::PanelModel;

/// Mutable state a panel operation works on
pub struct PanelContext<'a> {
    pub scene: &'a mut Scene,
    pub selection: &'a mut SelectionEngine,
    pub registry: &'a mut ObjectRegistry,
}

impl<'a> PanelContext<'a> {
    pub fn new(
        scene: &'a mut Scene,
        selection: &'a mut SelectionEngine,
        registry: &'a mut ObjectRegistry,
    ) -> Self {
        Self {
            scene,
            selection,
            registry,
        }
    }
}

/// Which field, if any, is being scrubbed or typed into
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanelInteraction {
    #[default]
    Idle,
    Dragging {
        field: FieldId,
        start_value: f32,
        start_x: f32,
    },
    Editing {
        field: FieldId,
    },
}

/// Transform and CAD panel controller
#[derive(Debug, Clone, Default)]
pub struct PanelController {
    model: PanelModel,
    interaction: PanelInteraction,
    drag: DragConfig,
}

impl PanelController {
    pub fn new(drag: DragConfig) -> Self {
        Self {
            drag,
            ..Self::default()
        }
    }

    pub fn model(&self) -> &PanelModel {
        &self.model
    }

    pub fn interaction(&self) -> PanelInteraction {
        self.interaction
    }

    pub fn is_editing(&self, field: FieldId) -> bool {
        self.interaction == PanelInteraction::Editing { field }
    }

    pub fn is_dragging(&self, field: FieldId) -> bool {
        matches!(self.interaction, PanelInteraction::Dragging { field: f, .. } if f == field)
    }

    /// Fields accept typing only while being edited
    pub fn is_read_only(&self, field: FieldId) -> bool {
        !self.is_editing(field)
    }

    /// Back to a hidden, idle panel
    pub fn reset(&mut self) {
        self.model = PanelModel::default();
        self.interaction = PanelInteraction::Idle;
    }

    // Gestures

    /// Primary button pressed on a field: start scrubbing
    pub fn pointer_down(&mut self, field: FieldId, button: u16, x: f32) -> bool {
        if button != 0 || field.class().is_none() || self.interaction != PanelInteraction::Idle {
            return false;
        }
        self.interaction = PanelInteraction::Dragging {
            field,
            start_value: parse_float(self.model.value(field)).unwrap_or(0.0),
            start_x: x,
        };
        true
    }

    /// Pointer moved while scrubbing: rewrite and apply the field
    pub fn pointer_move(&mut self, ctx: &mut PanelContext, x: f32) -> bool {
        let PanelInteraction::Dragging {
            field,
            start_value,
            start_x,
        } = self.interaction
        else {
            return false;
        };
        let Some(class) = field.class() else {
            return false;
        };
        let text = class.scrub(start_value, x - start_x, &self.drag);
        debug!("Scrub {} -> {}", field.element_id(), text);
        self.model.set_value(field, text);
        self.apply_field(ctx, field);
        true
    }

    pub fn pointer_up(&mut self) -> bool {
        if matches!(self.interaction, PanelInteraction::Dragging { .. }) {
            self.interaction = PanelInteraction::Idle;
            true
        } else {
            false
        }
    }

    pub fn double_click(&mut self, field: FieldId) -> bool {
        self.enter_edit(field)
    }

    pub fn focus(&mut self, field: FieldId) -> bool {
        self.enter_edit(field)
    }

    /// Text typed into the field being edited; applied right away
    pub fn input(&mut self, ctx: &mut PanelContext, field: FieldId, text: &str) -> bool {
        if !self.is_editing(field) {
            return false;
        }
        self.model.set_value(field, text);
        self.apply_field(ctx, field);
        true
    }

    /// Committed value of the field being edited
    pub fn change(&mut self, ctx: &mut PanelContext, field: FieldId) -> bool {
        if !self.is_editing(field) {
            return false;
        }
        self.apply_field(ctx, field);
        self.interaction = PanelInteraction::Idle;
        true
    }

    pub fn key_enter(&mut self, ctx: &mut PanelContext, field: FieldId) -> bool {
        self.blur(ctx, field)
    }

    pub fn blur(&mut self, ctx: &mut PanelContext, field: FieldId) -> bool {
        if !self.is_editing(field) {
            return false;
        }
        self.interaction = PanelInteraction::Idle;
        self.apply_field(ctx, field);
        true
    }

    fn enter_edit(&mut self, field: FieldId) -> bool {
        if field.class().is_none() {
            return false;
        }
        match self.interaction {
            PanelInteraction::Idle => {
                self.interaction = PanelInteraction::Editing { field };
                true
            }
            // Typed text is applied on input, so the current field only
            // needs to leave edit mode
            PanelInteraction::Editing { field: current } => {
                if current != field {
                    debug!("Edit moves from {} to {}", current.element_id(), field.element_id());
                    self.interaction = PanelInteraction::Editing { field };
                }
                true
            }
            PanelInteraction::Dragging { .. } => false,
        }
    }

    // Display

    /// Fill both panels from the selection, or hide them when it is empty
    pub fn show_properties(&mut self, ctx: &mut PanelContext) {
        let count = ctx.selection.selected_count();
        let Some(summary) = ctx.selection.object_properties(ctx.scene) else {
            self.hide_properties();
            return;
        };

        self.model.transform_visible = true;
        self.model.header = if count > 1 {
            format!("Transform ({count} selected)")
        } else {
            "Transform".to_string()
        };

        let position = [FieldId::PosX, FieldId::PosY, FieldId::PosZ];
        let rotation = [FieldId::RotXInput, FieldId::RotYInput, FieldId::RotZInput];
        let dimension = [FieldId::DimXInput, FieldId::DimYInput, FieldId::DimZInput];

        let dims = Self::first_parametric(ctx)
            .and_then(|(_, id)| ctx.registry.parametric(id))
            .map(|o| o.dimensions().to_array().map(|d| d.to_string()));
        for axis in 0..3 {
            self.model
                .set_value(position[axis], format_fixed(summary.position[axis]));
            self.model
                .set_value(rotation[axis], format_integer(summary.rotation_degrees[axis]));
            let dim = match &dims {
                Some(d) => d[axis].clone(),
                None => format_integer(summary.scale[axis]),
            };
            self.model.set_value(dimension[axis], dim);
        }
        self.model
            .set_value(FieldId::SelectionInfo, format!("Selected: {count}"));

        self.update_cad_properties(ctx);
    }

    pub fn hide_properties(&mut self) {
        self.model.transform_visible = false;
        self.model.cad_visible = false;
        self.interaction = PanelInteraction::Idle;
    }

    /// CAD panel for the first selected object: dimensions and physical
    /// readouts
    pub fn update_cad_properties(&mut self, ctx: &mut PanelContext) {
        self.model.cad_visible =
            Self::cad_panel_visible(ctx.scene, ctx.selection, ctx.registry);

        if let Some(first) = ctx.selection.selected().first().copied() {
            self.fill_cad_fields(ctx, first);
        }
    }

    /// Readouts for a node picked in connection mode. The node is shown
    /// without joining the selection, so the transform panel stays hidden.
    pub fn show_connection_target(&mut self, ctx: &mut PanelContext, node: NodeId) {
        self.model.transform_visible = false;
        self.interaction = PanelInteraction::Idle;
        self.model.cad_visible = Self::node_has_cad(ctx.scene, ctx.registry, node);
        self.fill_cad_fields(ctx, node);
    }

    fn fill_cad_fields(&mut self, ctx: &PanelContext, node: NodeId) {
        let cad = [FieldId::DimensionX, FieldId::DimensionY, FieldId::DimensionZ];
        let dims: [String; 3] = match ctx.registry.object_for_node(ctx.scene, node) {
            Some(SceneObject::Parametric(id)) => match ctx.registry.parametric(id) {
                Some(object) => object.dimensions().to_array().map(|d| d.to_string()),
                None => return,
            },
            Some(SceneObject::Module(root)) => Self::extent_labels(ctx.scene, root),
            None => Self::extent_labels(ctx.scene, node),
        };
        for (field, text) in cad.into_iter().zip(dims) {
            self.model.set_value(field, text);
        }
        if let Some(props) = Self::node_properties(ctx, node) {
            self.write_physical(&props);
        }
    }

    /// Rewrite the volume, surface, bounding box and material readouts
    pub fn refresh_physical_display(&mut self, ctx: &PanelContext) {
        let Some(first) = ctx.selection.selected().first().copied() else {
            return;
        };
        if let Some(props) = Self::node_properties(ctx, first) {
            self.write_physical(&props);
        }
    }

    fn write_physical(&mut self, props: &PhysicalProperties) {
        self.model
            .set_value(FieldId::VolumeValue, format_fixed(props.volume));
        self.model
            .set_value(FieldId::SurfaceAreaValue, format_fixed(props.surface_area));
        self.model
            .set_value(FieldId::BoundingBoxValue, props.bounding_box_label());
        if let Some(material) = props.material {
            self.model.set_value(FieldId::MaterialSelect, material.name());
        }
    }

    /// Visible when the selection holds a parametric object or a module
    /// outside the exclusion list
    pub fn cad_panel_visible(
        scene: &Scene,
        selection: &SelectionEngine,
        registry: &ObjectRegistry,
    ) -> bool {
        selection
            .selected()
            .iter()
            .any(|node| Self::node_has_cad(scene, registry, *node))
    }

    fn node_has_cad(scene: &Scene, registry: &ObjectRegistry, node: NodeId) -> bool {
        match registry.object_for_node(scene, node) {
            Some(SceneObject::Parametric(_)) => true,
            Some(SceneObject::Module(root)) => scene
                .get(root)
                .and_then(|n| n.module())
                .is_some_and(|m| !is_cad_excluded(&m.module_name)),
            None => false,
        }
    }

    // Apply paths

    /// Push the CAD dimension fields to the first selected object.
    ///
    /// Parametric objects take the rounded counts; modules are rescaled so
    /// their bounding box matches the typed extents.
    pub fn apply_dimension_changes(&mut self, ctx: &mut PanelContext) {
        let Some(first) = ctx.selection.selected().first().copied() else {
            return;
        };
        let typed = Vec3::new(
            float_or(self.model.value(FieldId::DimensionX), 1.0),
            float_or(self.model.value(FieldId::DimensionY), 1.0),
            float_or(self.model.value(FieldId::DimensionZ), 1.0),
        );

        match ctx.registry.object_for_node(ctx.scene, first) {
            Some(SceneObject::Parametric(id)) => {
                let dims = typed.to_array().map(|v| round_half_up(v) as i64);
                Self::update_parametric_dimensions(ctx, id, dims);
            }
            Some(SceneObject::Module(node)) => {
                ctx.registry.rescale_module(ctx.scene, node, typed);
            }
            None => warn!("Selected node has no editable dimensions"),
        }
        self.update_cad_properties(ctx);
    }

    /// Set the material of every selected parametric object
    pub fn apply_material_change(&mut self, ctx: &mut PanelContext, kind: MaterialKind) -> bool {
        let targets: Vec<ObjectId> = ctx
            .selection
            .selected()
            .iter()
            .filter_map(|n| match ctx.registry.object_for_node(ctx.scene, *n) {
                Some(SceneObject::Parametric(id)) => Some(id),
                _ => None,
            })
            .collect();
        if targets.is_empty() {
            warn!("No parametric object selected for material change");
            return false;
        }
        for id in targets {
            ctx.registry.update_object_material(ctx.scene, id, kind);
        }
        self.model.set_value(FieldId::MaterialSelect, kind.name());
        self.refresh_physical_display(ctx);
        true
    }

    fn apply_field(&mut self, ctx: &mut PanelContext, field: FieldId) {
        if ctx.selection.selected_count() == 0 {
            return;
        }
        match field.class() {
            Some(FieldClass::Position) => {
                let position = Vec3::new(
                    float_or(self.model.value(FieldId::PosX), 0.0),
                    float_or(self.model.value(FieldId::PosY), 0.0),
                    float_or(self.model.value(FieldId::PosZ), 0.0),
                );
                ctx.selection.apply_position(ctx.scene, position);
            }
            Some(FieldClass::Rotation) => {
                let degrees = float_or(self.model.value(field), 0.0);
                ctx.selection
                    .apply_rotation(ctx.scene, field.axis().unwrap_or(Axis::X), degrees);
            }
            Some(FieldClass::Dimension) if field.is_cad_dimension() => {
                self.apply_dimension_changes(ctx);
            }
            Some(FieldClass::Dimension) => self.apply_transform_dimensions(ctx),
            None => return,
        }
        self.refresh_physical_display(ctx);
    }

    /// Transform panel dimension row: all three counts go to the first
    /// parametric object in the selection
    fn apply_transform_dimensions(&mut self, ctx: &mut PanelContext) {
        let dims = [
            int_or(self.model.value(FieldId::DimXInput), 1),
            int_or(self.model.value(FieldId::DimYInput), 1),
            int_or(self.model.value(FieldId::DimZInput), 1),
        ];
        match Self::first_parametric(ctx) {
            Some((_, id)) => {
                Self::update_parametric_dimensions(ctx, id, dims);
                // Out-of-range counts were clamped
                if let Some(object) = ctx.registry.parametric(id) {
                    let input = [FieldId::DimXInput, FieldId::DimYInput, FieldId::DimZInput];
                    for (field, dim) in input.into_iter().zip(object.dimensions().to_array()) {
                        self.model.set_value(field, dim.to_string());
                    }
                }
                self.update_cad_properties(ctx);
            }
            None => warn!("No parametric object selected for dimension change"),
        }
    }

    fn update_parametric_dimensions(ctx: &mut PanelContext, id: ObjectId, dims: [i64; 3]) {
        let old = ctx.registry.mesh_of(id);
        ctx.registry.update_object_dimensions(ctx.scene, id, dims);
        if let (Some(old), Some(new)) = (old, ctx.registry.mesh_of(id)) {
            ctx.selection.retarget(ctx.scene, old, new);
        }
    }

    fn first_parametric(ctx: &PanelContext) -> Option<(NodeId, ObjectId)> {
        ctx.selection
            .selected()
            .iter()
            .find_map(|n| match ctx.registry.object_for_node(ctx.scene, *n) {
                Some(SceneObject::Parametric(id)) => Some((*n, id)),
                _ => None,
            })
    }

    fn node_properties(ctx: &PanelContext, node: NodeId) -> Option<PhysicalProperties> {
        match ctx.registry.object_for_node(ctx.scene, node) {
            Some(object) => ctx.registry.object_properties(ctx.scene, object),
            None => Some(ctx.registry.mesh_physical_properties(ctx.scene, Some(node))),
        }
    }

    fn extent_labels(scene: &Scene, node: NodeId) -> [String; 3] {
        let size = scene
            .world_bounds(node)
            .map(|b| b.size())
            .unwrap_or(Vec3::ZERO);
        [size.x, size.y, size.z].map(format_one_decimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::create_shared_scene;
    use crate::registry::tests::registry_with_mock;
    use orbit_core::ShapeKind;
    use orbit_scene::HighlightConfig;

    struct Fixture {
        scene: Scene,
        selection: SelectionEngine,
        registry: ObjectRegistry,
        panel: PanelController,
    }

    impl Fixture {
        fn new() -> Self {
            let (registry, _) = registry_with_mock();
            Self {
                scene: Scene::new(),
                selection: SelectionEngine::new(HighlightConfig::default()),
                registry,
                panel: PanelController::new(DragConfig::default()),
            }
        }

        /// Selected parametric box anchored at the origin
        fn with_selected_box() -> (Self, NodeId) {
            let mut f = Self::new();
            let node = f
                .registry
                .add_parametric_object(&mut f.scene, ShapeKind::Box, Vec3::ZERO);
            f.selection.select_single(&mut f.scene, node);
            f.show();
            (f, node)
        }

        fn ctx(&mut self) -> (PanelContext<'_>, &mut PanelController) {
            (
                PanelContext::new(&mut self.scene, &mut self.selection, &mut self.registry),
                &mut self.panel,
            )
        }

        fn show(&mut self) {
            let (mut ctx, panel) = self.ctx();
            panel.show_properties(&mut ctx);
        }

        fn value(&self, field: FieldId) -> &str {
            self.panel.model().value(field)
        }
    }

    #[test]
    fn test_show_single_parametric() {
        let (f, _) = Fixture::with_selected_box();
        let model = f.panel.model();

        assert!(model.transform_visible);
        assert!(model.cad_visible);
        assert_eq!(model.header, "Transform");
        assert_eq!(f.value(FieldId::PosX), "1.00");
        assert_eq!(f.value(FieldId::RotYInput), "0");
        assert_eq!(f.value(FieldId::DimXInput), "1");
        assert_eq!(f.value(FieldId::DimensionZ), "1");
        assert_eq!(f.value(FieldId::VolumeValue), "8.00");
        assert_eq!(f.value(FieldId::SurfaceAreaValue), "24.00");
        assert_eq!(f.value(FieldId::BoundingBoxValue), "2.00×2.00×2.00");
        assert_eq!(f.value(FieldId::MaterialSelect), "aluminum");
        assert_eq!(f.value(FieldId::SelectionInfo), "Selected: 1");
    }

    #[test]
    fn test_show_empty_hides() {
        let (mut f, _) = Fixture::with_selected_box();
        f.selection.deselect_all(&mut f.scene);
        f.show();
        assert!(!f.panel.model().transform_visible);
        assert!(!f.panel.model().cad_visible);
    }

    #[test]
    fn test_header_counts_selection() {
        let (mut f, _) = Fixture::with_selected_box();
        let other = f.registry.add_parametric_object(
            &mut f.scene,
            ShapeKind::Sphere,
            Vec3::new(4.0, 0.0, 0.0),
        );
        f.selection.toggle_selection(&mut f.scene, other);
        f.show();

        assert_eq!(f.panel.model().header, "Transform (2 selected)");
        assert_eq!(f.value(FieldId::SelectionInfo), "Selected: 2");
        // Box center x = 1, sphere center x = 4
        assert_eq!(f.value(FieldId::PosX), "2.50");
    }

    #[test]
    fn test_drag_and_edit_are_exclusive() {
        let (mut f, _) = Fixture::with_selected_box();

        assert!(f.panel.pointer_down(FieldId::PosX, 0, 100.0));
        assert!(!f.panel.double_click(FieldId::PosX));
        assert!(!f.panel.focus(FieldId::PosY));
        assert!(f.panel.is_read_only(FieldId::PosX));
        assert!(f.panel.pointer_up());

        assert!(f.panel.double_click(FieldId::PosX));
        assert!(!f.panel.is_read_only(FieldId::PosX));
        assert!(!f.panel.pointer_down(FieldId::PosX, 0, 100.0));
        assert!(!f.panel.is_dragging(FieldId::PosX));
    }

    #[test]
    fn test_edit_moves_to_second_field() {
        let (mut f, node) = Fixture::with_selected_box();

        assert!(f.panel.double_click(FieldId::PosX));
        {
            let (mut ctx, panel) = f.ctx();
            panel.input(&mut ctx, FieldId::PosX, "3");
        }
        assert!(f.panel.double_click(FieldId::PosY));
        assert!(f.panel.is_editing(FieldId::PosY));
        assert!(!f.panel.is_editing(FieldId::PosX));
        assert!(f.panel.is_read_only(FieldId::PosX));
        {
            let (mut ctx, panel) = f.ctx();
            assert!(!panel.input(&mut ctx, FieldId::PosX, "9"));
            assert!(panel.input(&mut ctx, FieldId::PosY, "2"));
        }

        let position = f.scene.get(node).unwrap().transform.position;
        assert_eq!(position, Vec3::new(3.0, 2.0, 1.0));
    }

    #[test]
    fn test_typed_dimension_is_rewritten_after_clamp() {
        let (mut f, _) = Fixture::with_selected_box();

        f.panel.focus(FieldId::DimXInput);
        {
            let (mut ctx, panel) = f.ctx();
            assert!(panel.input(&mut ctx, FieldId::DimXInput, "150"));
        }
        assert_eq!(f.value(FieldId::DimXInput), "100");
        assert_eq!(f.value(FieldId::DimensionX), "100");

        {
            let (mut ctx, panel) = f.ctx();
            panel.input(&mut ctx, FieldId::DimXInput, "0");
        }
        assert_eq!(f.value(FieldId::DimXInput), "1");
        assert_eq!(f.value(FieldId::DimYInput), "1");
    }

    #[test]
    fn test_secondary_button_does_not_scrub() {
        let (mut f, _) = Fixture::with_selected_box();
        assert!(!f.panel.pointer_down(FieldId::PosX, 2, 100.0));
        assert!(!f.panel.pointer_down(FieldId::VolumeValue, 0, 100.0));
        assert_eq!(f.panel.interaction(), PanelInteraction::Idle);
    }

    #[test]
    fn test_scrub_position_moves_selection() {
        let (mut f, node) = Fixture::with_selected_box();

        f.panel.pointer_down(FieldId::PosX, 0, 100.0);
        {
            let (mut ctx, panel) = f.ctx();
            assert!(panel.pointer_move(&mut ctx, 150.0));
        }
        f.panel.pointer_up();

        assert_eq!(f.value(FieldId::PosX), "2.00");
        let position = f.scene.get(node).unwrap().transform.position;
        assert_eq!(position, Vec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_scrub_dimension_rebuilds() {
        let (mut f, _) = Fixture::with_selected_box();

        f.panel.pointer_down(FieldId::DimXInput, 0, 0.0);
        {
            let (mut ctx, panel) = f.ctx();
            panel.pointer_move(&mut ctx, 110.0);
        }

        assert_eq!(f.value(FieldId::DimXInput), "2");
        assert_eq!(f.value(FieldId::VolumeValue), "16.00");
        assert_eq!(f.value(FieldId::DimensionX), "2");
        let selected = f.selection.selected()[0];
        assert_eq!(f.scene.mesh_nodes(), vec![selected]);
    }

    #[test]
    fn test_typed_rotation_applies_and_commits() {
        let (mut f, node) = Fixture::with_selected_box();

        assert!(f.panel.double_click(FieldId::RotYInput));
        {
            let (mut ctx, panel) = f.ctx();
            assert!(panel.input(&mut ctx, FieldId::RotYInput, "90"));
            assert!(panel.key_enter(&mut ctx, FieldId::RotYInput));
        }

        assert_eq!(f.panel.interaction(), PanelInteraction::Idle);
        let rotation = f.scene.get(node).unwrap().transform.rotation;
        approx::assert_relative_eq!(rotation.y, 90f32.to_radians());
    }

    #[test]
    fn test_input_ignored_unless_editing() {
        let (mut f, node) = Fixture::with_selected_box();
        let (mut ctx, panel) = f.ctx();
        assert!(!panel.input(&mut ctx, FieldId::RotYInput, "45"));
        assert!(!panel.blur(&mut ctx, FieldId::RotYInput));
        assert_eq!(ctx.scene.get(node).unwrap().transform.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_cad_dimension_edit_parametric() {
        let (mut f, _) = Fixture::with_selected_box();

        f.panel.focus(FieldId::DimensionY);
        {
            let (mut ctx, panel) = f.ctx();
            panel.input(&mut ctx, FieldId::DimensionY, "3.6");
            panel.change(&mut ctx, FieldId::DimensionY);
        }

        assert_eq!(f.value(FieldId::DimensionY), "4");
        assert_eq!(f.value(FieldId::VolumeValue), "32.00");
        assert_eq!(f.panel.interaction(), PanelInteraction::Idle);
    }

    #[test]
    fn test_cad_visibility_rule() {
        let (registry, _) = registry_with_mock();
        let shared = create_shared_scene();
        let excluded =
            pollster::block_on(registry.load_module(&shared, "SunPanels", "p", Vec3::ZERO, 4.0))
                .unwrap();
        let allowed = pollster::block_on(registry.load_module(
            &shared,
            "A1LightBlock",
            "q",
            Vec3::new(10.0, 0.0, 0.0),
            4.0,
        ))
        .unwrap();
        let mut scene = shared.lock();
        let mut selection = SelectionEngine::new(HighlightConfig::default());

        selection.select_single(&mut scene, excluded);
        assert!(!PanelController::cad_panel_visible(&scene, &selection, &registry));

        selection.toggle_selection(&mut scene, allowed);
        assert!(PanelController::cad_panel_visible(&scene, &selection, &registry));

        selection.deselect_all(&mut scene);
        assert!(!PanelController::cad_panel_visible(&scene, &selection, &registry));
    }

    #[test]
    fn test_module_cad_fields_and_rescale() {
        let (mut registry, _) = registry_with_mock();
        let shared = create_shared_scene();
        let root = pollster::block_on(registry.load_module(
            &shared,
            "A4MediumBlock",
            "p",
            Vec3::ZERO,
            4.0,
        ))
        .unwrap();
        let mut scene = shared.lock();
        let mut selection = SelectionEngine::new(HighlightConfig::default());
        let mut panel = PanelController::new(DragConfig::default());
        selection.select_single(&mut scene, root);

        let mut ctx = PanelContext::new(&mut scene, &mut selection, &mut registry);
        panel.show_properties(&mut ctx);
        assert_eq!(panel.model().value(FieldId::DimensionX), "2");
        assert_eq!(panel.model().value(FieldId::DimensionY), "4");
        assert_eq!(panel.model().value(FieldId::DimensionZ), "1");
        assert_eq!(panel.model().value(FieldId::MaterialSelect), "steel");
        assert_eq!(panel.model().value(FieldId::DimXInput), "1");

        panel.focus(FieldId::DimensionZ);
        panel.input(&mut ctx, FieldId::DimensionZ, "2.5");
        panel.blur(&mut ctx, FieldId::DimensionZ);

        assert_eq!(panel.model().value(FieldId::DimensionZ), "2.5");
        assert_eq!(panel.model().value(FieldId::VolumeValue), "20.00");
    }

    #[test]
    fn test_material_change() {
        let (mut f, _) = Fixture::with_selected_box();
        {
            let (mut ctx, panel) = f.ctx();
            assert!(panel.apply_material_change(&mut ctx, MaterialKind::Titanium));
        }
        assert_eq!(f.value(FieldId::MaterialSelect), "titanium");
        assert_eq!(f.value(FieldId::VolumeValue), "8.00");
    }

    #[test]
    fn test_reset() {
        let (mut f, _) = Fixture::with_selected_box();
        f.panel.double_click(FieldId::PosZ);
        f.panel.reset();
        assert_eq!(f.panel.interaction(), PanelInteraction::Idle);
        assert_eq!(f.panel.model(), &PanelModel::default());
    }
}
