//! Clip registry: shared ownership of loaded clips, addressed by id or name

use crate::clip::AnimationClip;
use crate::loader::load_clip_from_file;
use crate::model::SkinnedModel;
use std::path::Path;
use std::sync::Arc;

/// Registry slot of a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipId(pub usize);

impl std::fmt::Display for ClipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "clip#{}", self.0)
    }
}

/// Holds every loaded clip. Players keep their own `Arc`, so clearing the
/// registry never invalidates a clip that is still playing.
#[derive(Debug, Default)]
pub struct ClipRegistry {
    clips: Vec<Arc<AnimationClip>>,
}

impl ClipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, clip: AnimationClip) -> ClipId {
        self.clips.push(Arc::new(clip));
        ClipId(self.clips.len() - 1)
    }

    /// Load and register the first animation in `path`. Failures are logged.
    pub fn load<P: AsRef<Path>>(
        &mut self,
        path: P,
        model: &SkinnedModel,
        source_is_y_up: bool,
    ) -> Option<ClipId> {
        match load_clip_from_file(path.as_ref(), model, source_is_y_up) {
            Ok(clip) => Some(self.register(clip)),
            Err(e) => {
                log::warn!("Failed to load clip {}: {}", path.as_ref().display(), e);
                None
            }
        }
    }

    pub fn get(&self, id: ClipId) -> Option<Arc<AnimationClip>> {
        self.clips.get(id.0).cloned()
    }

    /// First clip registered under `name`
    pub fn find_by_name(&self, name: &str) -> Option<Arc<AnimationClip>> {
        self.clips.iter().find(|c| c.name == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn clear(&mut self) {
        self.clips.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClipId, &Arc<AnimationClip>)> {
        self.clips.iter().enumerate().map(|(i, c)| (ClipId(i), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::UpAxis;
    use stride_import::ImportedScene;

    fn clip(name: &str) -> AnimationClip {
        AnimationClip::new(name, 10.0, 30.0, Vec::new(), UpAxis::YUp)
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = ClipRegistry::new();
        let idle = registry.register(clip("idle"));
        let walk = registry.register(clip("walk"));
        assert_eq!(idle, ClipId(0));
        assert_eq!(walk, ClipId(1));
        assert_eq!(registry.get(walk).unwrap().name, "walk");
        assert!(registry.get(ClipId(5)).is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_names_resolve_to_first() {
        let mut registry = ClipRegistry::new();
        let mut first = clip("walk");
        first.duration = 1.0;
        registry.register(first);
        registry.register(clip("walk"));
        assert_eq!(registry.find_by_name("walk").unwrap().duration, 1.0);
        assert!(registry.find_by_name("run").is_none());
    }

    #[test]
    fn clear_keeps_outstanding_clips_alive() {
        let mut registry = ClipRegistry::new();
        let id = registry.register(clip("idle"));
        let held = registry.get(id).unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(held.name, "idle");
    }

    #[test]
    fn failed_load_returns_none() {
        let mut registry = ClipRegistry::new();
        let model = SkinnedModel::new(ImportedScene::default(), true);
        assert!(registry.load("missing/idle.glb", &model, true).is_none());
        assert!(registry.is_empty());
    }
}
