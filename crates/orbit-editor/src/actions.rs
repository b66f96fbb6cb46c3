//! Action handling
//!
//! Toolbar and module library buttons queue actions on the [`Editor`];
//! [`Editor::process_actions`] drains the queue through [`dispatch_action`].

use orbit_core::{MaterialKind, ShapeKind};
use tracing::{debug, warn};

use crate::editor::Editor;

/// User commands issued outside the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Add a parametric primitive at the spawn position
    AddPrimitive(ShapeKind),
    /// Load a catalog module by key
    LoadModule(String),
    RemoveSelected,
    SetConnectionMode(bool),
    ToggleConnectionMode,
    DisconnectSelected,
    ClearScene,
    /// Material for every selected parametric object
    SetMaterial(MaterialKind),
}

/// Dispatch an action to the appropriate handler
pub fn dispatch_action(editor: &mut Editor, action: EditorAction) {
    debug!("Dispatching {:?}", action);
    match action {
        EditorAction::AddPrimitive(_)
        | EditorAction::LoadModule(_)
        | EditorAction::RemoveSelected
        | EditorAction::ClearScene => handle_object_action(editor, action),

        EditorAction::SetConnectionMode(_)
        | EditorAction::ToggleConnectionMode
        | EditorAction::DisconnectSelected => handle_connection_action(editor, action),

        EditorAction::SetMaterial(kind) => {
            if !editor.set_material(kind) {
                warn!("Material {} not applied", kind.name());
            }
        }
    }
}

/// Object creation and removal
pub fn handle_object_action(editor: &mut Editor, action: EditorAction) {
    match action {
        EditorAction::AddPrimitive(kind) => {
            editor.add_primitive(kind);
        }
        EditorAction::LoadModule(key) => editor.load_module(&key),
        EditorAction::RemoveSelected => {
            editor.remove_selected();
        }
        EditorAction::ClearScene => editor.clear_scene(),
        _ => {}
    }
}

/// Connection mode and connection bookkeeping
pub fn handle_connection_action(editor: &mut Editor, action: EditorAction) {
    match action {
        EditorAction::SetConnectionMode(enabled) => editor.set_connection_mode(enabled),
        EditorAction::ToggleConnectionMode => editor.toggle_connection_mode(),
        EditorAction::DisconnectSelected => {
            editor.disconnect_selected();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::tests::test_editor;
    use crate::selection::{PickOutcome, PointerEvent};

    #[test]
    fn test_queue_is_drained_in_order() {
        let (mut editor, _) = test_editor(false);
        editor.queue_action(EditorAction::AddPrimitive(ShapeKind::Box));
        editor.queue_action(EditorAction::AddPrimitive(ShapeKind::Sphere));
        editor.queue_action(EditorAction::LoadModule("a2long".into()));

        editor.process_actions();

        assert!(editor.take_pending_actions().is_empty());
        assert_eq!(editor.registry().parametric_objects().count(), 2);
        assert_eq!(editor.pending_load_count(), 1);
        assert_eq!(editor.tick().len(), 1);
    }

    #[test]
    fn test_connection_mode_actions() {
        let (mut editor, _) = test_editor(false);

        dispatch_action(&mut editor, EditorAction::ToggleConnectionMode);
        assert!(editor.selection().connection_mode());
        dispatch_action(&mut editor, EditorAction::ToggleConnectionMode);
        assert!(!editor.selection().connection_mode());
        dispatch_action(&mut editor, EditorAction::SetConnectionMode(true));
        assert!(editor.selection().connection_mode());
    }

    #[test]
    fn test_remove_and_material_actions() {
        let (mut editor, _) = test_editor(false);
        dispatch_action(&mut editor, EditorAction::AddPrimitive(ShapeKind::Box));
        let outcome = editor.handle_canvas_click(&PointerEvent::canvas(50.0, 50.0));
        assert!(matches!(outcome, PickOutcome::Selected(_)));

        dispatch_action(&mut editor, EditorAction::SetMaterial(MaterialKind::Plastic));
        let object = editor.registry().parametric_objects().next().unwrap();
        assert_eq!(object.material(), MaterialKind::Plastic);

        dispatch_action(&mut editor, EditorAction::RemoveSelected);
        assert_eq!(editor.registry().parametric_objects().count(), 0);
    }

    #[test]
    fn test_disconnect_selected_action() {
        let (mut editor, _) = test_editor(false);
        dispatch_action(&mut editor, EditorAction::AddPrimitive(ShapeKind::Box));
        editor.handle_canvas_click(&PointerEvent::canvas(50.0, 50.0));

        // Nothing connected yet
        dispatch_action(&mut editor, EditorAction::DisconnectSelected);
        assert_eq!(editor.registry().connections().count(), 0);
        dispatch_action(&mut editor, EditorAction::ClearScene);
        assert_eq!(editor.selection().selected_count(), 0);
    }
}
