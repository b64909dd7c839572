pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, SoundEvent, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, MeshColor};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use core::geometry::{Aabb, Ray, pose_matrix};
pub use core::rng::Rng;
pub use renderer::camera::Camera3D;
pub use renderer::instance::{MeshInstance, InstanceBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::tones::{ToneBank, ToneSpec, Waveform};
pub use bridge::protocol::{ProtocolLayout, FrameData, write_frame};
pub use systems::lighting::{PointLight, LightState, LIGHT_FLOATS, DEFAULT_MAX_LIGHTS};
pub use systems::render::build_instance_buffer;
