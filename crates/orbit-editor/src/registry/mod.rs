//! Object registry
//!
//! Owns every parametric object by id, loads station modules through an
//! [`AssetLoader`] with a per-module template cache, and answers property
//! queries uniformly for both object families.

mod connectors;
mod loader;
mod parametric;

use std::collections::HashMap;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use glam::Vec3;
use orbit_core::{
    MaterialKind, ModuleCatalogEntry, PhysicalProperties, ShapeKind, available_modules,
    module_density, module_material, module_spec,
};
use orbit_scene::{BoundingBox, ModuleInstance, NodeId, NodeTag, ObjectId, Prefab, Scene};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::EditorConfig;
use crate::error::LoadError;

pub use connectors::{Connection, ConnectionId, Connector, ConnectorFace};
pub use loader::{AssetLoader, FileAssetLoader, ProgressFn};
pub use parametric::ParametricObject;

/// Scene shared between event handlers and in-flight module loads
pub type SharedScene = Arc<Mutex<Scene>>;

/// Create an empty shared scene
pub fn create_shared_scene() -> SharedScene {
    Arc::new(Mutex::new(Scene::new()))
}

/// Template cache keyed by module name
type TemplateCache = Arc<Mutex<HashMap<String, Prefab>>>;

/// Either family of placed object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneObject {
    /// A parametric primitive, by registry id
    Parametric(ObjectId),
    /// A loaded module, by its root node
    Module(NodeId),
}

/// Registry of placed objects
pub struct ObjectRegistry {
    objects: HashMap<ObjectId, ParametricObject>,
    cache: TemplateCache,
    loader: Arc<dyn AssetLoader>,
    connections: HashMap<ConnectionId, Connection>,
    config: EditorConfig,
}

impl ObjectRegistry {
    pub fn new(config: &EditorConfig, loader: Arc<dyn AssetLoader>) -> Self {
        Self {
            objects: HashMap::new(),
            cache: Arc::new(Mutex::new(HashMap::new())),
            loader,
            connections: HashMap::new(),
            config: config.clone(),
        }
    }

    /// Create a parametric object and return its mesh node
    pub fn add_parametric_object(
        &mut self,
        scene: &mut Scene,
        kind: ShapeKind,
        position: Vec3,
    ) -> NodeId {
        let id = Uuid::new_v4();
        let mut object = ParametricObject::new(id, self.config.unit_size);
        let mesh = object.create_base_module(scene, position, kind);
        self.objects.insert(id, object);
        info!("Added parametric {} {}", kind.display_name(), id);
        mesh
    }

    /// Set dimension counts (clamped into range). `false` for unknown ids.
    pub fn update_object_dimensions(
        &mut self,
        scene: &mut Scene,
        id: ObjectId,
        dims: [i64; 3],
    ) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.update_dimensions(scene, dims);
                true
            }
            None => false,
        }
    }

    pub fn get_object_properties(&self, id: ObjectId) -> Option<PhysicalProperties> {
        self.objects.get(&id).map(|o| o.physical_properties())
    }

    pub fn update_object_material(
        &mut self,
        scene: &mut Scene,
        id: ObjectId,
        kind: MaterialKind,
    ) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.set_material(scene, kind);
                true
            }
            None => false,
        }
    }

    /// Remove a parametric object and its mesh. `false` for unknown ids.
    pub fn remove_modular_object(&mut self, scene: &mut Scene, id: ObjectId) -> bool {
        let Some(mut object) = self.objects.remove(&id) else {
            return false;
        };
        object.clear(scene);
        self.drop_connections_of(SceneObject::Parametric(id));
        info!("Removed parametric object {}", id);
        true
    }

    /// Remove whatever object `node` belongs to.
    ///
    /// Untracked nodes are removed directly; helpers and the root are
    /// never removed.
    pub fn remove_object(&mut self, scene: &mut Scene, node: NodeId) -> bool {
        match self.object_for_node(scene, node) {
            Some(SceneObject::Parametric(id)) => self.remove_modular_object(scene, id),
            Some(SceneObject::Module(root)) => {
                self.drop_connections_of(SceneObject::Module(root));
                scene.remove(root)
            }
            None => {
                let removable = scene.get(node).is_some_and(|n| !n.is_helper());
                removable && scene.remove(node)
            }
        }
    }

    pub fn parametric(&self, id: ObjectId) -> Option<&ParametricObject> {
        self.objects.get(&id)
    }

    pub fn parametric_objects(&self) -> impl Iterator<Item = &ParametricObject> {
        self.objects.values()
    }

    /// Current mesh node of a parametric object
    pub fn mesh_of(&self, id: ObjectId) -> Option<NodeId> {
        self.objects.get(&id).and_then(|o| o.mesh())
    }

    /// Find the object owning `node` by walking up its parent chain
    pub fn object_for_node(&self, scene: &Scene, node: NodeId) -> Option<SceneObject> {
        std::iter::once(node)
            .chain(scene.ancestors(node))
            .find_map(|id| match &scene.get(id)?.tag {
                NodeTag::Parametric(object) if self.objects.contains_key(object) => {
                    Some(SceneObject::Parametric(*object))
                }
                NodeTag::Module(_) => Some(SceneObject::Module(id)),
                _ => None,
            })
    }

    /// Every object currently attached to the scene
    pub fn objects_in_scene(&self, scene: &Scene) -> Vec<SceneObject> {
        let parametric = self
            .objects
            .values()
            .filter(|o| o.mesh().is_some_and(|m| scene.is_attached(m)))
            .map(|o| SceneObject::Parametric(o.id()));
        let modules = scene
            .traverse(scene.root())
            .into_iter()
            .filter(|id| scene.get(*id).is_some_and(|n| n.module().is_some()))
            .map(SceneObject::Module);
        parametric.chain(modules).collect()
    }

    /// World bounds of an object's geometry
    pub fn world_bounds_of(&self, scene: &Scene, object: SceneObject) -> Option<BoundingBox> {
        let node = match object {
            SceneObject::Parametric(id) => self.mesh_of(id)?,
            SceneObject::Module(node) => node,
        };
        scene.world_bounds(node)
    }

    /// Properties of either family
    pub fn object_properties(
        &self,
        scene: &Scene,
        object: SceneObject,
    ) -> Option<PhysicalProperties> {
        match object {
            SceneObject::Parametric(id) => self.get_object_properties(id),
            SceneObject::Module(node) => Some(self.mesh_physical_properties(scene, Some(node))),
        }
    }

    /// Properties of a loaded mesh.
    ///
    /// Modules report the properties computed when they were loaded; any
    /// other mesh gets a bounding-box estimate at the fallback density.
    /// Missing nodes report zeros.
    pub fn mesh_physical_properties(
        &self,
        scene: &Scene,
        node: Option<NodeId>,
    ) -> PhysicalProperties {
        let Some((id, n)) = node.and_then(|id| scene.get(id).map(|n| (id, n))) else {
            return PhysicalProperties::zeroed();
        };
        if let Some(module) = n.module() {
            return module.properties;
        }
        let density = self.config.fallback_density;
        scene
            .world_bounds(id)
            .map(|b| PhysicalProperties::from_extent(b.size(), b.center(), density, None))
            .unwrap_or_default()
    }

    /// Rescale a module so its world bounding box matches `extent`, then
    /// refresh its stored properties. Axes with a non-positive target or
    /// zero current extent keep their scale.
    pub fn rescale_module(&mut self, scene: &mut Scene, node: NodeId, extent: Vec3) -> bool {
        let Some(current) = scene.world_bounds(node).map(|b| b.size()) else {
            return false;
        };
        let Some(n) = scene.get_mut(node) else {
            return false;
        };
        let NodeTag::Module(module) = &n.tag else {
            return false;
        };
        let name = module.module_name.clone();

        let mut scale = n.transform.scale;
        for axis in 0..3 {
            if extent[axis] > 0.0 && current[axis] > f32::EPSILON {
                scale[axis] *= extent[axis] / current[axis];
            }
        }
        n.transform.scale = scale;

        let Some(bounds) = scene.world_bounds(node) else {
            return false;
        };
        let properties = PhysicalProperties::from_extent(
            bounds.size(),
            bounds.center(),
            module_density(&name),
            Some(module_material(&name)),
        );
        if let Some(NodeTag::Module(module)) = scene.get_mut(node).map(|n| &mut n.tag) {
            module.properties = properties;
        }
        debug!("Rescaled {} to {:?}", name, bounds.size());
        true
    }

    /// Load a module and place it at `position`, scaled so its largest
    /// extent equals `target_size`.
    ///
    /// The cache is consulted only here, on entry: a hit places a copy of
    /// the template and resolves at once without touching the loader. Two
    /// concurrent first loads of one name both fetch, and the last to
    /// finish owns the cache entry. A failed load never touches the cache.
    pub fn load_module(
        &self,
        scene: &SharedScene,
        name: &str,
        path: &str,
        position: Vec3,
        target_size: f32,
    ) -> BoxFuture<'static, Result<NodeId, LoadError>> {
        let cached = self.cache.lock().get(name).cloned();
        if let Some(template) = cached {
            let node = place_template(&mut scene.lock(), template, position);
            info!("Loaded {} from cache", name);
            return future::ready(Ok(node)).boxed();
        }

        let progress_name = name.to_string();
        let load = self.loader.load(
            path,
            Box::new(move |loaded, total| {
                debug!("Loading {}: {}/{} bytes", progress_name, loaded, total);
            }),
        );
        let scene = Arc::clone(scene);
        let cache = Arc::clone(&self.cache);
        let name = name.to_string();
        let path = path.to_string();

        async move {
            let mut prefab = match load.await {
                Ok(prefab) => prefab,
                Err(e) => {
                    error!("Failed to load {} from {}: {}", name, path, e);
                    return Err(LoadError::from(e));
                }
            };

            prefab.root.name = name.clone();
            prefab.root.transform.position = position;
            let extent = prefab.bounds().map(|b| b.size()).unwrap_or(Vec3::ZERO);
            let max_extent = extent.max_element();
            let scale = if max_extent > f32::EPSILON {
                target_size / max_extent
            } else {
                1.0
            };
            prefab.root.transform.scale = Vec3::splat(scale);

            let properties = match prefab.bounds() {
                Some(b) => PhysicalProperties::from_extent(
                    b.size(),
                    b.center(),
                    module_density(&name),
                    Some(module_material(&name)),
                ),
                None => PhysicalProperties::zeroed(),
            };
            prefab.root.tag = NodeTag::Module(ModuleInstance {
                module_name: name.clone(),
                instance_id: Uuid::new_v4(),
                original_scale: Vec3::splat(scale),
                properties,
            });
            prefab.root.merged = true;
            prefab.root.visible = true;

            let node = scene.lock().instantiate(&prefab);

            prefab.root.transform.position = Vec3::ZERO;
            cache.lock().insert(name.clone(), prefab);
            info!("Loaded {} (scale {:.3})", name, scale);
            Ok(node)
        }
        .boxed()
    }

    /// Load a catalog module by key (case-insensitive).
    ///
    /// Unknown keys produce an already rejected future.
    pub fn load_space_station_module(
        &self,
        scene: &SharedScene,
        key: &str,
        position: Vec3,
    ) -> BoxFuture<'static, Result<NodeId, LoadError>> {
        match module_spec(key) {
            Some(spec) => self.load_module(
                scene,
                spec.module_name,
                spec.path,
                position,
                spec.target_size,
            ),
            None => {
                warn!("Unknown module type: {}", key);
                future::ready(Err(LoadError::UnknownModuleType(key.to_string()))).boxed()
            }
        }
    }

    pub fn available_modules(&self) -> &'static [ModuleCatalogEntry] {
        available_modules()
    }

    /// Names of modules with a cached template, sorted
    pub fn cached_modules(&self) -> Vec<String> {
        let mut names: Vec<String> = self.cache.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove every object and connection. Cached templates survive.
    pub fn clear(&mut self, scene: &mut Scene) {
        for object in self.objects.values_mut() {
            object.clear(scene);
        }
        self.objects.clear();
        self.connections.clear();
        scene.clear();
        info!("Registry cleared");
    }
}

fn place_template(scene: &mut Scene, mut template: Prefab, position: Vec3) -> NodeId {
    template.root.transform.position = position;
    template.root.visible = true;
    if let NodeTag::Module(module) = &mut template.root.tag {
        module.instance_id = Uuid::new_v4();
    }
    scene.instantiate(&template)
}
