//! Idle detection
//!
//! Watches the local player's animation and fires once when it leaves the
//! fishing set.

use phf::phf_set;

use crate::host::AnimationId;

/// Message shown when the player stops fishing
pub const IDLE_MESSAGE: &str = "You have stopped fishing!";

/// Every animation the client plays while the player is fishing
pub static FISHING_ANIMATIONS: phf::Set<i32> = phf_set! {
    621i32, 622i32, 623i32, 619i32, 620i32, 624i32, 625i32, 626i32, 627i32, 628i32,
    629i32, 632i32, 633i32,
    5108i32, 6703i32, 6704i32, 6706i32, 6707i32, 6708i32, 6709i32, 6710i32,
    7401i32, 8336i32,
    9350i32, 9353i32, 9354i32, 9355i32, 9356i32, 9357i32, 9358i32, 9359i32,
    9360i32, 9361i32, 9362i32,
};

pub fn is_fishing_animation(animation: AnimationId) -> bool {
    FISHING_ANIMATIONS.contains(&animation)
}

/// Edge detector for "was fishing, now isn't".
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleWatcher {
    was_fishing: bool,
}

impl IdleWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current animation (`None` when no local player is loaded).
    /// Returns true on the tick the player stops fishing.
    pub fn update(&mut self, animation: Option<AnimationId>) -> bool {
        let Some(animation) = animation else {
            self.was_fishing = false;
            return false;
        };
        let fishing = is_fishing_animation(animation);
        let stopped = self.was_fishing && !fishing;
        self.was_fishing = fishing;
        stopped
    }

    pub fn is_fishing(&self) -> bool {
        self.was_fishing
    }

    pub fn reset(&mut self) {
        self.was_fishing = false;
    }
}
