use serde::{Serialize, Serializer};
use std::fmt;

macro_rules! means_of_death {
    ($($variant:ident => $tag:literal),+ $(,)?) => {
        /// Weapon or environmental mechanism recorded at the end of a kill line
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum MeansOfDeath {
            $($variant),+
        }

        impl MeansOfDeath {
            /// Every cause, in declaration order
            pub const ALL: &'static [MeansOfDeath] = &[$(MeansOfDeath::$variant),+];

            /// Tag exactly as it appears in the server log
            pub fn as_str(self) -> &'static str {
                match self {
                    $(MeansOfDeath::$variant => $tag),+
                }
            }

            /// Map a log tag to its cause; unrecognized tags fall back to `Unknown`
            pub fn from_tag(tag: &str) -> Self {
                match tag {
                    $($tag => MeansOfDeath::$variant,)+
                    _ => MeansOfDeath::Unknown,
                }
            }
        }
    };
}

means_of_death! {
    Unknown => "MOD_UNKNOWN",
    Shotgun => "MOD_SHOTGUN",
    Gauntlet => "MOD_GAUNTLET",
    Machinegun => "MOD_MACHINEGUN",
    Grenade => "MOD_GRENADE",
    GrenadeSplash => "MOD_GRENADE_SPLASH",
    Rocket => "MOD_ROCKET",
    RocketSplash => "MOD_ROCKET_SPLASH",
    Plasma => "MOD_PLASMA",
    PlasmaSplash => "MOD_PLASMA_SPLASH",
    Railgun => "MOD_RAILGUN",
    Lightning => "MOD_LIGHTNING",
    Bfg => "MOD_BFG",
    BfgSplash => "MOD_BFG_SPLASH",
    Water => "MOD_WATER",
    Slime => "MOD_SLIME",
    Lava => "MOD_LAVA",
    Crush => "MOD_CRUSH",
    Telefrag => "MOD_TELEFRAG",
    Falling => "MOD_FALLING",
    Suicide => "MOD_SUICIDE",
    TargetLaser => "MOD_TARGET_LASER",
    TriggerHurt => "MOD_TRIGGER_HURT",
    Nail => "MOD_NAIL",
    Chaingun => "MOD_CHAINGUN",
    ProximityMine => "MOD_PROXIMITY_MINE",
    Kamikaze => "MOD_KAMIKAZE",
    Juiced => "MOD_JUICED",
    Grapple => "MOD_GRAPPLE",
}

impl fmt::Display for MeansOfDeath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MeansOfDeath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
