use crate::components::entity::Entity;
use crate::renderer::instance::{InstanceBuffer, MeshInstance};

/// Build the instance buffer from every active entity that has a mesh,
/// in scene order, clipped to `max_instances`.
pub fn build_instance_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut InstanceBuffer,
    max_instances: usize,
) {
    buffer.clear();

    for entity in entities {
        if buffer.instance_count() as usize >= max_instances {
            log::warn!("instance buffer full ({} instances), skipping the rest", max_instances);
            break;
        }
        if !entity.active {
            continue;
        }
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };
        buffer.push(MeshInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            rx: entity.rotation.x,
            ry: entity.rotation.y,
            rz: entity.rotation.z,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            emissive: mesh.emissive,
            glyph: mesh.glyph as u32 as f32,
            shininess: mesh.shininess,
        });
    }
}
