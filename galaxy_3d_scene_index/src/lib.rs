/*!
# Galaxy 3D Scene Index

Spatial indexing for the Galaxy3D scene subsystem.

The core is a dynamic bounding-volume hierarchy that stays balanced while
objects are inserted, moved and removed every frame, and answers the two
per-frame scene queries: "what does this ray hit?" (picking) and "what is
inside this frustum?" (render culling).

## Architecture

- **DenseStore**: key → slot pool; gives every tree node a stable handle
- **DynamicTree**: incremental BVH (SAH insertion, refit, rotations)
- **SceneIndex**: trait the scene subsystem drives (insert/remove/update + queries)
- **SplitSceneIndex**: static and dynamic trees side by side
- **Frustum / Ray**: query volumes
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod scene;
pub mod utils;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Query volumes
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene spatial index
    pub mod scene {
        pub use crate::scene::*;
    }

    // Storage utilities
    pub mod utils {
        pub use crate::utils::*;
    }
}

// Re-export math library at crate root
pub use glam;
