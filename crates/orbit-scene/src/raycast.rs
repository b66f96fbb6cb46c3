//! Ray casting against the scene's meshes.

use glam::Vec3;

use crate::camera::Ray;
use crate::graph::{NodeId, Scene};

const EPSILON: f32 = 1e-7;

/// A ray hit on a mesh node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Mesh node that was hit.
    pub node: NodeId,
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// Casts a ray through every visible mesh reachable from the root.
///
/// Helpers and lights are never hit. Results are sorted nearest first. Each
/// mesh is first tested against its world bounds, then triangle by triangle
/// in the node's local space.
pub fn raycast(scene: &Scene, ray: &Ray) -> Vec<Intersection> {
    let mut hits: Vec<Intersection> = scene
        .mesh_nodes()
        .into_iter()
        .filter(|id| is_visible(scene, *id))
        .filter_map(|id| intersect_node(scene, id, ray))
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

fn is_visible(scene: &Scene, id: NodeId) -> bool {
    std::iter::once(id)
        .chain(scene.ancestors(id))
        .all(|n| scene.get(n).is_some_and(|node| node.visible))
}

fn intersect_node(scene: &Scene, id: NodeId, ray: &Ray) -> Option<Intersection> {
    let mesh = scene.get(id)?.as_mesh()?;
    let world = scene.world_matrix(id);

    let local_bounds = mesh.geometry.bounds();
    local_bounds.transform(&world).intersect_ray(ray)?;

    let inverse = world.inverse();
    let local_origin = inverse.transform_point3(ray.origin);
    let local_dir = inverse.transform_vector3(ray.direction);

    let t = mesh
        .geometry
        .mesh()
        .triangles()
        .filter_map(|[a, b, c]| {
            intersect_triangle(local_origin, local_dir, a.into(), b.into(), c.into())
        })
        .min_by(|a, b| a.total_cmp(b))?;

    let point = world.transform_point3(local_origin + local_dir * t);
    Some(Intersection {
        node: id,
        distance: (point - ray.origin).length(),
        point,
    })
}

/// Möller–Trumbore, double sided. Returns the ray parameter of the hit.
fn intersect_triangle(origin: Vec3, dir: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = origin - v0;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::SceneConfig;
    use crate::geometry::Geometry;
    use crate::graph::{Node, Transform};
    use crate::material::Material;
    use orbit_core::{generate_box_mesh, generate_sphere_mesh};

    fn add_cube(scene: &mut Scene, at: Vec3) -> NodeId {
        scene.add(
            Node::mesh(
                "cube",
                Arc::new(Geometry::new(generate_box_mesh([2.0, 2.0, 2.0]))),
                Arc::new(Material::default()),
            )
            .with_transform(Transform::from_position(at)),
        )
    }

    #[test]
    fn test_nearest_first() {
        let mut scene = Scene::new();
        let far = add_cube(&mut scene, Vec3::new(0.0, 0.0, -10.0));
        let near = add_cube(&mut scene, Vec3::ZERO);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let hits = raycast(&scene, &ray);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node, near);
        assert_eq!(hits[1].node, far);
        assert!((hits[0].distance - 9.0).abs() < 1e-4);
        assert!((hits[0].point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn test_helpers_never_hit() {
        let mut scene = Scene::new();
        scene.setup_helpers(&SceneConfig::default());
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        assert!(raycast(&scene, &ray).is_empty());
    }

    #[test]
    fn test_miss_between_objects() {
        let mut scene = Scene::new();
        add_cube(&mut scene, Vec3::new(-5.0, 0.0, 0.0));
        add_cube(&mut scene, Vec3::new(5.0, 0.0, 0.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(raycast(&scene, &ray).is_empty());
    }

    #[test]
    fn test_scaled_rotated_mesh() {
        let mut scene = Scene::new();
        let id = scene.add(
            Node::mesh(
                "ball",
                Arc::new(Geometry::new(generate_sphere_mesh(1.0))),
                Arc::new(Material::default()),
            )
            .with_transform(Transform {
                position: Vec3::new(0.0, 3.0, 0.0),
                rotation: Vec3::new(0.3, 0.7, 0.1),
                scale: Vec3::splat(2.0),
            }),
        );
        let ray = Ray::new(Vec3::new(0.0, 3.0, 20.0), Vec3::NEG_Z);
        let hits = raycast(&scene, &ray);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, id);
        // tessellated sphere of radius 2
        assert!((hits[0].distance - 18.0).abs() < 0.05);
    }

    #[test]
    fn test_hidden_parent_hides_child() {
        let mut scene = Scene::new();
        let group = scene.add(Node::group("g"));
        scene
            .add_child(
                group,
                Node::mesh(
                    "cube",
                    Arc::new(Geometry::new(generate_box_mesh([2.0, 2.0, 2.0]))),
                    Arc::new(Material::default()),
                ),
            )
            .unwrap();
        scene.get_mut(group).unwrap().visible = false;
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(raycast(&scene, &ray).is_empty());
    }
}
