use bytemuck::{Pod, Zeroable};

/// Per-instance render data read by the host renderer.
/// Must match the host protocol: 12 floats = 48 bytes stride.
///
/// The host keeps one extruded geometry per glyph code and draws each
/// instance with its pose and material.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Euler rotation (XYZ order) in radians.
    pub rx: f32,
    pub ry: f32,
    pub rz: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Grey-level emissive overlay.
    pub emissive: f32,
    /// Unicode scalar value of the glyph.
    pub glyph: f32,
    pub shininess: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Buffer of mesh instances rebuilt every frame.
pub struct InstanceBuffer {
    instances: Vec<MeshInstance>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn as_slice(&self) -> &[MeshInstance] {
        &self.instances
    }

    /// Raw pointer to instance data for direct reads from wasm memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), MeshInstance::STRIDE_BYTES);
        assert_eq!(MeshInstance::FLOATS, 12);
    }

    #[test]
    fn buffer_push_and_count() {
        let mut buf = InstanceBuffer::new();
        buf.push(MeshInstance::default());
        buf.push(MeshInstance::default());
        assert_eq!(buf.instance_count(), 2);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }
}
