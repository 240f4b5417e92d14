//! Fishing spot catalog
//!
//! Maps fishing spot NPC IDs to their movement timers and catchable fish.
//!
//! NPC IDs follow the game client's fishing spot definitions. Timer ranges
//! come from the community wiki:
//! - Most spots: 250-530 ticks (2.5-5 min)
//! - Aerial fishing: 10-19 ticks (~6-11 sec)
//! - Minnow: 12-25 ticks (~7-15 sec)
//! - Sacred/Infernal eels: 100-300 ticks (1-3 min)
//! - Anglerfish: 8-830 ticks (unpredictable)
//! - Static spots (Karambwan, Tempoross, etc.): effectively never move

use std::collections::HashSet;

use phf::phf_map;

use crate::host::{NpcId, Tick};

/// Spots whose minimum lifetime reaches this many ticks are treated as static.
pub const STATIC_THRESHOLD_TICKS: Tick = 10_000;

/// A single catchable fish, ordered by fishing level (highest first) within a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fish {
    pub name: &'static str,
    pub level: u8,
    pub item_id: u32,
}

impl Fish {
    const fn new(name: &'static str, level: u8, item_id: u32) -> Self {
        Self {
            name,
            level,
            item_id,
        }
    }
}

/// One category of fishing spot.
#[derive(Debug, PartialEq, Eq)]
pub struct SpotKind {
    /// Stable identifier (snake_case)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    pub min_ticks: Tick,
    pub max_ticks: Tick,
    /// Timer range is too wide for the elapsed time to mean much
    pub unpredictable: bool,
    /// Catchable fish, highest level first. Never empty.
    pub fish: &'static [Fish],
}

impl SpotKind {
    const fn new(
        id: &'static str,
        name: &'static str,
        min_ticks: Tick,
        max_ticks: Tick,
        fish: &'static [Fish],
    ) -> Self {
        Self {
            id,
            name,
            min_ticks,
            max_ticks,
            unpredictable: false,
            fish,
        }
    }

    const fn unpredictable(mut self) -> Self {
        self.unpredictable = true;
        self
    }

    /// Whether this spot type is effectively static (never moves)
    pub fn is_static(&self) -> bool {
        self.min_ticks >= STATIC_THRESHOLD_TICKS
    }

    /// Whether the elapsed time display should be flagged as unreliable
    pub fn is_unpredictable(&self) -> bool {
        self.unpredictable
    }

    /// Item ID of the highest-level fish (default icon)
    pub fn item_id(&self) -> u32 {
        self.fish[0].item_id
    }

    /// Highest-level fish whose name is not in `ignored`.
    ///
    /// `ignored` must hold lower-cased names. Returns `None` when every fish
    /// at this spot is ignored.
    pub fn top_unfiltered(&self, ignored: &HashSet<String>) -> Option<&'static Fish> {
        self.fish
            .iter()
            .find(|f| !ignored.contains(&f.name.to_lowercase()))
    }
}

/// Look up a fishing spot by NPC ID
pub fn find_spot(npc_id: NpcId) -> Option<&'static SpotKind> {
    SPOTS_BY_NPC.get(&npc_id).copied()
}

/// Check if an NPC ID is a known fishing spot
pub fn is_fishing_spot(npc_id: NpcId) -> bool {
    SPOTS_BY_NPC.contains_key(&npc_id)
}

// ═══════════════════════════════════════════════════════════════════════════
// Spot Kinds
// ═══════════════════════════════════════════════════════════════════════════

// ─── Standard spots: 250-530 ticks ─────────────────────────────────────────

pub static SHRIMP: SpotKind = SpotKind::new(
    "shrimp",
    "Shrimp / Anchovies",
    250,
    530,
    &[Fish::new("Anchovies", 15, 321), Fish::new("Shrimp", 1, 317)],
);

pub static LOBSTER: SpotKind = SpotKind::new(
    "lobster",
    "Lobster / Swordfish / Tuna",
    250,
    530,
    &[Fish::new("Swordfish", 50, 373), Fish::new("Lobster", 40, 377), Fish::new("Tuna", 35, 359)],
);

pub static SHARK: SpotKind = SpotKind::new(
    "shark",
    "Shark / Bass",
    250,
    530,
    &[Fish::new("Shark", 76, 383), Fish::new("Bass", 46, 363)],
);

pub static MONKFISH: SpotKind = SpotKind::new(
    "monkfish",
    "Monkfish",
    250,
    530,
    &[Fish::new("Monkfish", 62, 7944)],
);

pub static SALMON: SpotKind = SpotKind::new(
    "salmon",
    "Salmon / Trout",
    250,
    530,
    &[Fish::new("Salmon", 30, 331), Fish::new("Trout", 20, 335)],
);

pub static LAVA_EEL: SpotKind = SpotKind::new(
    "lava_eel",
    "Lava Eel",
    250,
    530,
    &[Fish::new("Lava Eel", 53, 2148)],
);

pub static BARB_FISH: SpotKind = SpotKind::new(
    "barb_fish",
    "Barbarian Fishing",
    250,
    530,
    &[
        Fish::new("Leaping Sturgeon", 70, 11330),
        Fish::new("Leaping Salmon", 58, 11329),
        Fish::new("Leaping Trout", 48, 11328),
    ],
);

pub static CAVE_EEL: SpotKind = SpotKind::new(
    "cave_eel",
    "Cave Eel",
    250,
    530,
    &[Fish::new("Cave Eel", 38, 5001)],
);

pub static SLIMY_EEL: SpotKind = SpotKind::new(
    "slimy_eel",
    "Slimy Eel",
    250,
    530,
    &[Fish::new("Slimy Eel", 28, 3379)],
);

pub static DARK_CRAB: SpotKind = SpotKind::new(
    "dark_crab",
    "Dark Crab",
    250,
    530,
    &[Fish::new("Dark Crab", 85, 11934)],
);

pub static SQUID: SpotKind = SpotKind::new(
    "squid",
    "Squid",
    250,
    530,
    &[Fish::new("Squid", 44, 31561)],
);

pub static CAMDOZAAL: SpotKind = SpotKind::new(
    "camdozaal",
    "Camdozaal Fishing",
    250,
    530,
    &[
        Fish::new("Guppy", 33, 25652),
        Fish::new("Cavefish", 20, 25654),
        Fish::new("Tetra", 5, 25656),
    ],
);

pub static CAMDOZAAL_CAVE_EEL: SpotKind = SpotKind::new(
    "camdozaal_cave_eel",
    "Camdozaal Cave Eel",
    250,
    530,
    &[Fish::new("Cave Eel", 38, 5001)],
);

pub static CIVITAS: SpotKind = SpotKind::new(
    "civitas",
    "Civitas illa Fortis Park",
    250,
    530,
    &[Fish::new("Barblore", 15, 29325)],
);

// ─── Fast-rotation spots ───────────────────────────────────────────────────

pub static COMMON_TENCH: SpotKind = SpotKind::new(
    "common_tench",
    "Aerial Fishing",
    10,
    19,
    &[
        Fish::new("Greater Siren", 91, 22827),
        Fish::new("Mottled Eel", 68, 22828),
        Fish::new("Common Tench", 56, 22829),
        Fish::new("Bluegill", 43, 22826),
    ],
);

pub static MINNOW: SpotKind = SpotKind::new(
    "minnow",
    "Minnow",
    12,
    25,
    &[Fish::new("Minnow", 82, 21356)],
);

// ─── Shorter-timer spots ───────────────────────────────────────────────────

pub static SACRED_EEL: SpotKind = SpotKind::new(
    "sacred_eel",
    "Sacred Eel",
    100,
    300,
    &[Fish::new("Sacred Eel", 87, 13339)],
);

pub static INFERNAL_EEL: SpotKind = SpotKind::new(
    "infernal_eel",
    "Infernal Eel",
    100,
    300,
    &[Fish::new("Infernal Eel", 80, 21293)],
);

pub static ANGLERFISH: SpotKind = SpotKind::new(
    "anglerfish",
    "Anglerfish",
    8,
    830,
    &[Fish::new("Anglerfish", 82, 13439)],
).unpredictable();

// ─── Static spots (never or rarely move) ───────────────────────────────────

pub static KARAMBWAN: SpotKind = SpotKind::new(
    "karambwan",
    "Karambwan",
    10_000,
    10_000,
    &[Fish::new("Karambwan", 65, 3142)],
);

pub static KARAMBWANJI: SpotKind = SpotKind::new(
    "karambwanji",
    "Karambwanji / Shrimp",
    10_000,
    10_000,
    &[Fish::new("Karambwanji", 5, 3150)],
);

pub static HARPOONFISH: SpotKind = SpotKind::new(
    "harpoonfish",
    "Harpoonfish (Tempoross)",
    10_000,
    10_000,
    &[Fish::new("Harpoonfish", 35, 25564)],
);

/// Every spot kind, in catalog order
pub static ALL_SPOT_KINDS: &[&SpotKind] = &[
    &SHRIMP,
    &LOBSTER,
    &SHARK,
    &MONKFISH,
    &SALMON,
    &LAVA_EEL,
    &BARB_FISH,
    &CAVE_EEL,
    &SLIMY_EEL,
    &DARK_CRAB,
    &SQUID,
    &CAMDOZAAL,
    &CAMDOZAAL_CAVE_EEL,
    &CIVITAS,
    &COMMON_TENCH,
    &MINNOW,
    &SACRED_EEL,
    &INFERNAL_EEL,
    &ANGLERFISH,
    &KARAMBWAN,
    &KARAMBWANJI,
    &HARPOONFISH,
];

/// Spot kind lookup table indexed by NPC ID
pub static SPOTS_BY_NPC: phf::Map<NpcId, &'static SpotKind> = phf_map! {
    // Shrimp / Anchovies
    1514i32 => &SHRIMP,
    1517i32 => &SHRIMP,
    1518i32 => &SHRIMP,
    1521i32 => &SHRIMP,
    1523i32 => &SHRIMP,
    1524i32 => &SHRIMP,
    1525i32 => &SHRIMP,
    1528i32 => &SHRIMP,
    1530i32 => &SHRIMP,
    1544i32 => &SHRIMP,
    3913i32 => &SHRIMP,
    7155i32 => &SHRIMP,
    7459i32 => &SHRIMP,
    7462i32 => &SHRIMP,
    7467i32 => &SHRIMP,
    7469i32 => &SHRIMP,
    7947i32 => &SHRIMP,
    10513i32 => &SHRIMP,
    14038i32 => &SHRIMP,
    14040i32 => &SHRIMP,
    14041i32 => &SHRIMP,
    14524i32 => &SHRIMP,
    15066i32 => &SHRIMP,

    // Lobster / Swordfish / Tuna
    1510i32 => &LOBSTER,
    1519i32 => &LOBSTER,
    1522i32 => &LOBSTER,
    2146i32 => &LOBSTER,
    3914i32 => &LOBSTER,
    5820i32 => &LOBSTER,
    7199i32 => &LOBSTER,
    7460i32 => &LOBSTER,
    7465i32 => &LOBSTER,
    7470i32 => &LOBSTER,
    7946i32 => &LOBSTER,
    9173i32 => &LOBSTER,
    9174i32 => &LOBSTER,
    10515i32 => &LOBSTER,
    10635i32 => &LOBSTER,
    12777i32 => &LOBSTER,
    14039i32 => &LOBSTER,
    15070i32 => &LOBSTER,
    15071i32 => &LOBSTER,
    15075i32 => &LOBSTER,
    15076i32 => &LOBSTER,
    15079i32 => &LOBSTER,
    15084i32 => &LOBSTER,
    15086i32 => &LOBSTER,

    // Shark / Bass
    1511i32 => &SHARK,
    1520i32 => &SHARK,
    3419i32 => &SHARK,
    3915i32 => &SHARK,
    4476i32 => &SHARK,
    4477i32 => &SHARK,
    5233i32 => &SHARK,
    5234i32 => &SHARK,
    5821i32 => &SHARK,
    7200i32 => &SHARK,
    7461i32 => &SHARK,
    7466i32 => &SHARK,
    8525i32 => &SHARK,
    8526i32 => &SHARK,
    8527i32 => &SHARK,
    9171i32 => &SHARK,
    9172i32 => &SHARK,
    10514i32 => &SHARK,
    12775i32 => &SHARK,
    12776i32 => &SHARK,
    14037i32 => &SHARK,
    14523i32 => &SHARK,
    15067i32 => &SHARK,
    15068i32 => &SHARK,
    15069i32 => &SHARK,
    15077i32 => &SHARK,
    15080i32 => &SHARK,
    15082i32 => &SHARK,
    15083i32 => &SHARK,
    15087i32 => &SHARK,

    // Monkfish
    4316i32 => &MONKFISH,

    // Salmon / Trout
    394i32 => &SALMON,
    1506i32 => &SALMON,
    1507i32 => &SALMON,
    1508i32 => &SALMON,
    1509i32 => &SALMON,
    1512i32 => &SALMON,
    1513i32 => &SALMON,
    1515i32 => &SALMON,
    1516i32 => &SALMON,
    1526i32 => &SALMON,
    1527i32 => &SALMON,
    1529i32 => &SALMON,
    3417i32 => &SALMON,
    3418i32 => &SALMON,
    7463i32 => &SALMON,
    7464i32 => &SALMON,
    7468i32 => &SALMON,
    8524i32 => &SALMON,
    12774i32 => &SALMON,
    14036i32 => &SALMON,
    14521i32 => &SALMON,
    14522i32 => &SALMON,
    14525i32 => &SALMON,
    14526i32 => &SALMON,
    14527i32 => &SALMON,
    14528i32 => &SALMON,
    15072i32 => &SALMON,
    15073i32 => &SALMON,

    // Lava Eel
    4928i32 => &LAVA_EEL,
    6784i32 => &LAVA_EEL,
    15384i32 => &LAVA_EEL,

    // Barbarian Fishing
    1542i32 => &BARB_FISH,
    7323i32 => &BARB_FISH,

    // Cave Eel
    1497i32 => &CAVE_EEL,
    1498i32 => &CAVE_EEL,
    1499i32 => &CAVE_EEL,
    1500i32 => &CAVE_EEL,

    // Slimy Eel
    2653i32 => &SLIMY_EEL,
    2654i32 => &SLIMY_EEL,
    2655i32 => &SLIMY_EEL,

    // Dark Crab
    1535i32 => &DARK_CRAB,
    1536i32 => &DARK_CRAB,

    // Squid
    15074i32 => &SQUID,
    15078i32 => &SQUID,
    15081i32 => &SQUID,
    15085i32 => &SQUID,

    // Camdozaal Fishing
    10686i32 => &CAMDOZAAL,

    // Camdozaal Cave Eel
    10653i32 => &CAMDOZAAL_CAVE_EEL,

    // Civitas illa Fortis Park
    13329i32 => &CIVITAS,

    // Aerial Fishing
    8523i32 => &COMMON_TENCH,

    // Minnow
    7730i32 => &MINNOW,
    7731i32 => &MINNOW,
    7732i32 => &MINNOW,
    7733i32 => &MINNOW,

    // Sacred Eel
    6488i32 => &SACRED_EEL,

    // Infernal Eel
    7676i32 => &INFERNAL_EEL,

    // Anglerfish
    6825i32 => &ANGLERFISH,

    // Karambwan
    4712i32 => &KARAMBWAN,
    4713i32 => &KARAMBWAN,

    // Karambwanji / Shrimp
    4710i32 => &KARAMBWANJI,

    // Harpoonfish (Tempoross)
    10565i32 => &HARPOONFISH,
    10568i32 => &HARPOONFISH,
    10569i32 => &HARPOONFISH,
};
