use std::time::{Duration, Instant};

use tracing::debug;

use crate::game::SceneMode;

/// Scenes in which the Mercenaries collection in memory is worth re-reading
pub const RELEVANT_SCENES: [SceneMode; 4] = [
    SceneMode::Gameplay,
    SceneMode::LettuceBountyBoard,
    SceneMode::LettuceBountyTeamSelect,
    SceneMode::LettuceMap,
];

pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(5);

/// Decides whether a scene change should trigger a collection refresh
#[derive(Debug, Clone)]
pub struct RefreshGate {
    previous_scene: Option<SceneMode>,
    last_refresh: Option<Instant>,
    min_interval: Duration,
}

impl RefreshGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            previous_scene: None,
            last_refresh: None,
            min_interval,
        }
    }

    pub fn should_refresh(&mut self, scene: SceneMode) -> bool {
        self.should_refresh_at(scene, Instant::now())
    }

    /// Same as [`should_refresh`](Self::should_refresh) with an explicit clock
    pub fn should_refresh_at(&mut self, scene: SceneMode, now: Instant) -> bool {
        if !RELEVANT_SCENES.contains(&scene) {
            self.previous_scene = None;
            return false;
        }

        // Gameplay only matters when coming from a Mercenaries scene
        if scene == SceneMode::Gameplay && self.previous_scene.is_none() {
            debug!("Entering gameplay from a non-Mercenaries scene");
            return false;
        }

        if let Some(last) = self.last_refresh {
            if now.saturating_duration_since(last) < self.min_interval {
                debug!("Skipping refresh, too soon");
                return false;
            }
        }

        self.previous_scene = Some(scene);
        self.last_refresh = Some(now);
        true
    }

    pub fn previous_scene(&self) -> Option<SceneMode> {
        self.previous_scene
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Forget the scene history and the last refresh time
    pub fn reset(&mut self) {
        self.previous_scene = None;
        self.last_refresh = None;
    }
}

impl Default for RefreshGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}
