//! Forwarded routes.

use std::fmt;

/// The upstream-backed operations the forwarder knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Image and Video Library search.
    MediaSearch,
    /// Latest EPIC snapshot list.
    EpicSnapshots,
    /// EPIC snapshots for one date.
    EpicSnapshotsByDate,
    /// Astronomy Picture of the Day.
    Apod,
}

impl Route {
    /// Stable label used in logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Route::MediaSearch => "nasa_media",
            Route::EpicSnapshots => "epic",
            Route::EpicSnapshotsByDate => "epic_image",
            Route::Apod => "apod",
        }
    }

    /// Client-facing message for an upstream failure on this route.
    pub fn failure_message(self) -> &'static str {
        match self {
            Route::MediaSearch => "Failed to fetch data from NASA API",
            Route::EpicSnapshots => "Failed to fetch EPIC data",
            Route::EpicSnapshotsByDate => "Failed to fetch EPIC image by date",
            Route::Apod => "Failed to fetch APOD data",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
