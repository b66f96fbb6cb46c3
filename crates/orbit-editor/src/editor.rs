//! Editor facade
//!
//! Owns the shared scene and every component, and wires pointer events,
//! toolbar actions and module loads through them. Module loads run as
//! futures that [`Editor::tick`] polls; event handlers never hold the scene
//! lock across a registry call that may take it.

use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::task::noop_waker_ref;
use glam::Vec3;
use orbit_core::{MaterialKind, MeshUnit, ShapeKind};
use orbit_scene::{Camera, NodeId, Viewport};
use tracing::{error, info};

use crate::actions::{EditorAction, dispatch_action};
use crate::config::EditorConfig;
use crate::error::LoadError;
use crate::panel::{PanelContext, PanelController};
use crate::registry::{
    AssetLoader, FileAssetLoader, ObjectRegistry, SharedScene, create_shared_scene,
};
use crate::selection::{PickOutcome, PointerEvent, SelectionEngine};

type PendingLoad = BoxFuture<'static, Result<NodeId, LoadError>>;

pub struct Editor {
    scene: SharedScene,
    registry: ObjectRegistry,
    selection: SelectionEngine,
    panel: PanelController,
    camera: Camera,
    viewport: Viewport,
    config: EditorConfig,
    pending_loads: FuturesUnordered<PendingLoad>,
    pending_actions: Vec<EditorAction>,
}

impl Editor {
    pub fn new(config: EditorConfig, loader: Arc<dyn AssetLoader>) -> Self {
        let scene = create_shared_scene();
        scene.lock().setup_helpers(&config.scene);

        let viewport = Viewport::new(800.0, 600.0);
        let camera = Camera::from_config(&config.scene.camera, viewport.aspect());
        info!("Editor initialized");

        Self {
            scene,
            registry: ObjectRegistry::new(&config, loader),
            selection: SelectionEngine::new(config.scene.highlight.clone()),
            panel: PanelController::new(config.drag.clone()),
            camera,
            viewport,
            config,
            pending_loads: FuturesUnordered::new(),
            pending_actions: Vec::new(),
        }
    }

    /// Editor loading modules from `config.asset_root`
    pub fn with_file_loader(config: EditorConfig) -> Self {
        let loader = FileAssetLoader::new(config.asset_root.clone(), MeshUnit::Meters);
        Self::new(config, Arc::new(loader))
    }

    pub fn scene(&self) -> &SharedScene {
        &self.scene
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn panel(&self) -> &PanelController {
        &self.panel
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Canvas size changed
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.camera.update_aspect(self.viewport.aspect());
    }

    /// Pick under the pointer, then show or hide the panels to match the
    /// resulting selection. Connection clicks show the picked node's
    /// readouts instead.
    pub fn handle_canvas_click(&mut self, event: &PointerEvent) -> PickOutcome {
        let mut scene = self.scene.lock();
        let outcome = self.selection.handle_click(
            &mut scene,
            &self.camera,
            &self.viewport,
            event,
            &mut self.registry,
        );
        let mut ctx = PanelContext::new(&mut scene, &mut self.selection, &mut self.registry);
        match &outcome {
            PickOutcome::Ignored | PickOutcome::Unchanged => {}
            PickOutcome::ConnectionStarted(node) | PickOutcome::Connected { node, .. } => {
                self.panel.show_connection_target(&mut ctx, *node);
            }
            _ => self.panel.show_properties(&mut ctx),
        }
        outcome
    }

    /// Run a panel gesture against the current scene
    pub fn with_panel<R>(
        &mut self,
        f: impl FnOnce(&mut PanelController, &mut PanelContext<'_>) -> R,
    ) -> R {
        let mut scene = self.scene.lock();
        let mut ctx = PanelContext::new(&mut scene, &mut self.selection, &mut self.registry);
        f(&mut self.panel, &mut ctx)
    }

    /// Add a parametric primitive at the spawn position
    pub fn add_primitive(&mut self, kind: ShapeKind) -> NodeId {
        let position = Vec3::from(self.config.spawn_position);
        let mut scene = self.scene.lock();
        self.registry.add_parametric_object(&mut scene, kind, position)
    }

    /// Queue a catalog module load at the spawn position
    pub fn load_module(&mut self, key: &str) {
        self.load_module_at(key, Vec3::from(self.config.spawn_position));
    }

    pub fn load_module_at(&mut self, key: &str, position: Vec3) {
        let load = self
            .registry
            .load_space_station_module(&self.scene, key, position);
        self.pending_loads.push(load);
    }

    pub fn pending_load_count(&self) -> usize {
        self.pending_loads.len()
    }

    /// Drive in-flight loads; returns the roots placed since the last tick
    pub fn tick(&mut self) -> Vec<NodeId> {
        let mut cx = Context::from_waker(noop_waker_ref());
        let mut placed = Vec::new();
        while let Poll::Ready(Some(result)) = self.pending_loads.poll_next_unpin(&mut cx) {
            match result {
                Ok(node) => placed.push(node),
                Err(e) => error!("Module load failed: {}", e),
            }
        }
        placed
    }

    /// Remove every selected object; returns how many were removed
    pub fn remove_selected(&mut self) -> usize {
        let targets = self.selection.selected().to_vec();
        let mut scene = self.scene.lock();
        let mut removed = 0;
        for node in targets {
            self.selection.forget(node);
            if self.registry.remove_object(&mut scene, node) {
                removed += 1;
            }
        }
        self.panel.hide_properties();
        info!("Removed {} object(s)", removed);
        removed
    }

    /// Tear down every object, the selection and the panels. Helpers and
    /// cached templates stay.
    pub fn clear_scene(&mut self) {
        let mut scene = self.scene.lock();
        self.selection.reset(&mut scene);
        self.registry.clear(&mut scene);
        self.panel.reset();
    }

    pub fn set_connection_mode(&mut self, enabled: bool) {
        self.selection.set_connection_mode(enabled);
    }

    pub fn toggle_connection_mode(&mut self) {
        let enabled = !self.selection.connection_mode();
        self.set_connection_mode(enabled);
    }

    pub fn disconnect_selected(&mut self) -> usize {
        let scene = self.scene.lock();
        self.selection.disconnect_selected(&scene, &mut self.registry)
    }

    pub fn set_material(&mut self, kind: MaterialKind) -> bool {
        self.with_panel(|panel, ctx| panel.apply_material_change(ctx, kind))
    }

    /// Queue an action for the next [`Editor::process_actions`]
    pub fn queue_action(&mut self, action: EditorAction) {
        self.pending_actions.push(action);
    }

    pub fn take_pending_actions(&mut self) -> Vec<EditorAction> {
        std::mem::take(&mut self.pending_actions)
    }

    pub fn process_actions(&mut self) {
        for action in self.take_pending_actions() {
            dispatch_action(self, action);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::panel::FieldId;
    use crate::registry::tests::MockLoader;
    use crate::selection::Modifiers;
    use crate::test_support::init_tracing;
    use orbit_scene::CameraConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Camera on +Z, 100x100 canvas, primitives spawned around the origin
    pub(crate) fn test_editor(fail: bool) -> (Editor, Arc<AtomicUsize>) {
        init_tracing();
        let mut config = EditorConfig::default();
        config.scene.camera = CameraConfig {
            position: [0.0, 0.0, 20.0],
            target: [0.0, 0.0, 0.0],
            ..CameraConfig::default()
        };
        config.spawn_position = [-1.0, -1.0, -1.0];
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = MockLoader {
            calls: calls.clone(),
            fail,
        };
        let mut editor = Editor::new(config, Arc::new(loader));
        editor.resize(100.0, 100.0);
        (editor, calls)
    }

    #[test]
    fn test_click_shows_and_hides_panels() {
        let (mut editor, _) = test_editor(false);
        let node = editor.add_primitive(ShapeKind::Box);

        let outcome = editor.handle_canvas_click(&PointerEvent::canvas(50.0, 50.0));
        assert_eq!(outcome, PickOutcome::Selected(vec![node]));
        assert!(editor.panel().model().transform_visible);
        assert_eq!(editor.panel().model().value(FieldId::PosX), "0.00");

        let ctrl_miss = PointerEvent::canvas(0.0, 0.0).with_modifiers(Modifiers::CTRL);
        assert_eq!(editor.handle_canvas_click(&ctrl_miss), PickOutcome::Unchanged);
        assert!(editor.panel().model().transform_visible);

        let outcome = editor.handle_canvas_click(&PointerEvent::canvas(0.0, 0.0));
        assert_eq!(outcome, PickOutcome::Cleared);
        assert!(!editor.panel().model().transform_visible);
        assert!(!editor.panel().model().cad_visible);
    }

    #[test]
    fn test_connection_clicks_show_picked_node() {
        let (mut editor, _) = test_editor(false);
        let first = editor.add_primitive(ShapeKind::Box);
        editor.set_connection_mode(true);

        let outcome = editor.handle_canvas_click(&PointerEvent::canvas(50.0, 50.0));
        assert_eq!(outcome, PickOutcome::ConnectionStarted(first));
        assert_eq!(editor.selection().selected_count(), 0);
        let model = editor.panel().model();
        assert!(!model.transform_visible);
        assert!(model.cad_visible);
        assert_eq!(model.value(FieldId::VolumeValue), "8.00");
        assert_eq!(model.value(FieldId::DimensionX), "1");
        assert_eq!(model.value(FieldId::BoundingBoxValue), "2.00×2.00×2.00");

        // Missing everything cancels and hides the readouts
        let outcome = editor.handle_canvas_click(&PointerEvent::canvas(0.0, 0.0));
        assert_eq!(outcome, PickOutcome::ConnectionCancelled);
        assert!(!editor.panel().model().cad_visible);
    }

    #[test]
    fn test_tick_places_loaded_modules() {
        let (mut editor, calls) = test_editor(false);
        editor.load_module("a1light");
        assert_eq!(editor.pending_load_count(), 1);

        let placed = editor.tick();
        assert_eq!(placed.len(), 1);
        assert_eq!(editor.pending_load_count(), 0);
        assert!(editor.scene().lock().get(placed[0]).unwrap().module().is_some());

        editor.load_module_at("A1Light", Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(editor.tick().len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_loads_are_dropped() {
        let (mut editor, _) = test_editor(true);
        editor.load_module("BUMRoof");
        editor.load_module("not-a-module");

        assert!(editor.tick().is_empty());
        assert_eq!(editor.pending_load_count(), 0);
        assert!(editor.registry().cached_modules().is_empty());
    }

    #[test]
    fn test_remove_selected() {
        let (mut editor, _) = test_editor(false);
        let node = editor.add_primitive(ShapeKind::Box);
        editor.handle_canvas_click(&PointerEvent::canvas(50.0, 50.0));
        assert_eq!(editor.selection().selected(), &[node]);

        assert_eq!(editor.remove_selected(), 1);
        assert_eq!(editor.selection().selected_count(), 0);
        assert!(!editor.scene().lock().contains(node));
        assert!(!editor.panel().model().transform_visible);
    }

    #[test]
    fn test_clear_scene_keeps_helpers_and_templates() {
        let (mut editor, _) = test_editor(false);
        let helpers_before = {
            let scene = editor.scene().lock();
            scene.children(scene.root()).len()
        };
        editor.add_primitive(ShapeKind::Sphere);
        editor.load_module("SunPanels");
        editor.tick();
        editor.set_connection_mode(true);

        editor.clear_scene();

        let scene = editor.scene().lock();
        assert!(scene.mesh_nodes().is_empty());
        assert_eq!(scene.children(scene.root()).len(), helpers_before);
        drop(scene);
        assert!(!editor.selection().connection_mode());
        assert_eq!(editor.registry().cached_modules(), vec!["SunPanels".to_string()]);
    }

    #[test]
    fn test_panel_gesture_through_facade() {
        let (mut editor, _) = test_editor(false);
        let node = editor.add_primitive(ShapeKind::Box);
        editor.handle_canvas_click(&PointerEvent::canvas(50.0, 50.0));

        editor.with_panel(|panel, ctx| {
            assert!(panel.double_click(FieldId::PosY));
            panel.input(ctx, FieldId::PosY, "5");
            panel.blur(ctx, FieldId::PosY)
        });

        let position = editor.scene().lock().get(node).unwrap().transform.position;
        assert_eq!(position, Vec3::new(0.0, 5.0, 0.0));
        assert!(editor.set_material(MaterialKind::Steel));
        assert_eq!(editor.panel().model().value(FieldId::MaterialSelect), "steel");
    }
}
