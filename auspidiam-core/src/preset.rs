use std::fmt;
use std::str::FromStr;

use crate::drag::{NavController, ReleasePolicy};
use crate::placement::{PlacementConfig, Strategy};

/// Layout and release behaviour for the home page labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavConfig {
    pub placement: PlacementConfig,
    pub release: ReleasePolicy,
}

impl NavConfig {
    pub fn controller(&self) -> NavController {
        NavController::new(self.release)
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Preset::default().config()
    }
}

/// Named home page variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preset {
    /// Labels circle the title and stay where they are dropped.
    #[default]
    Orbit,
    /// Jittered fixed anchors; drags always spring back.
    Anchored,
    /// Scattered labels that navigate when dropped onto the title.
    Scatter,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Orbit, Preset::Anchored, Preset::Scatter];

    pub const fn name(self) -> &'static str {
        match self {
            Preset::Orbit => "orbit",
            Preset::Anchored => "anchored",
            Preset::Scatter => "scatter",
        }
    }

    pub fn config(self) -> NavConfig {
        match self {
            Preset::Orbit => NavConfig {
                placement: PlacementConfig::default(),
                release: ReleasePolicy::Persist,
            },
            Preset::Anchored => NavConfig {
                placement: PlacementConfig::with_strategy(Strategy::Anchors { jitter: 28.0 }),
                release: ReleasePolicy::SnapBack,
            },
            Preset::Scatter => NavConfig {
                placement: PlacementConfig::with_strategy(Strategy::Scatter { reach: 220.0 }),
                release: ReleasePolicy::drop_target(),
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePresetError(pub String);

impl fmt::Display for ParsePresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variant '{}'", self.0)
    }
}

impl std::error::Error for ParsePresetError {}

impl FromStr for Preset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ParsePresetError(s.to_string()))
    }
}
