//! Editing logic for the Orbit station editor
//!
//! The pieces, leaves first:
//! - [`registry`]: parametric objects, module loading with a template cache,
//!   physical property queries and connectors
//! - [`selection`]: pointer picking, the selection set and its highlights,
//!   connection mode
//! - [`panel`]: the transform and CAD property panels with their
//!   scrub/edit input model
//! - [`editor`]: the facade that wires pointer events and toolbar actions
//!   to the components above

pub mod actions;
pub mod config;
pub mod editor;
pub mod error;
pub mod panel;
pub mod registry;
pub mod selection;

pub use actions::{EditorAction, dispatch_action};
pub use config::{ConfigError, DragConfig, EditorConfig};
pub use editor::Editor;
pub use error::{AssetError, LoadError};
pub use panel::{FieldClass, FieldId, PanelContext, PanelController, PanelInteraction, PanelModel};
pub use registry::{
    AssetLoader, Connection, ConnectionId, Connector, ConnectorFace, FileAssetLoader,
    ObjectRegistry, ParametricObject, ProgressFn, SceneObject, SharedScene, create_shared_scene,
};
pub use selection::{
    Axis, ConnectionEndpoint, ControlKind, EventTarget, InteractionMode, Modifiers, PickOutcome,
    PointerEvent, SelectionEngine, TransformSummary,
};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Route `tracing` output to the test harness, filtered by `RUST_LOG`.
    pub fn init_tracing() {
        INIT.call_once(|| {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let _ = tracing_subscriber::registry()
                .with(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                        "orbit_editor=debug,orbit_scene=debug,orbit_core=debug".into()
                    }),
                )
                .with(fmt::layer().with_test_writer())
                .try_init();
        });
    }
}
