use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of hand regions inspected under UV light.
pub const ZONE_COUNT: usize = 11;

/// One of the inspected hand regions, numbered `1..=11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Zone(u8);

impl Zone {
    /// All zones in numeric order.
    pub const ALL: [Zone; ZONE_COUNT] = [
        Zone(1),
        Zone(2),
        Zone(3),
        Zone(4),
        Zone(5),
        Zone(6),
        Zone(7),
        Zone(8),
        Zone(9),
        Zone(10),
        Zone(11),
    ];

    pub fn new(number: u8) -> Option<Self> {
        if (1..=ZONE_COUNT as u8).contains(&number) {
            Some(Zone(number))
        } else {
            None
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Column/field name used by the log, e.g. `zone_7`.
    pub fn key(self) -> String {
        format!("zone_{}", self.0)
    }

    fn index(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone_{}", self.0)
    }
}

impl FromStr for Zone {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("zone_")
            .and_then(|n| n.parse::<u8>().ok())
            .and_then(Zone::new)
            .ok_or(())
    }
}

/// Contamination flags for all eleven zones of one scan.
///
/// Serialized as flat `zone_1` .. `zone_11` boolean fields so it can be
/// flattened into a record. Missing zones deserialize as clean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ZoneFlags([bool; ZONE_COUNT]);

impl ZoneFlags {
    pub fn new(flags: [bool; ZONE_COUNT]) -> Self {
        Self(flags)
    }

    /// Flags with only the given zones marked dirty.
    pub fn dirty(zones: &[Zone]) -> Self {
        let mut flags = Self::default();
        for zone in zones {
            flags.set(*zone, true);
        }
        flags
    }

    pub fn is_dirty(&self, zone: Zone) -> bool {
        self.0[zone.index()]
    }

    pub fn set(&mut self, zone: Zone, dirty: bool) {
        self.0[zone.index()] = dirty;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Zone, bool)> + '_ {
        Zone::ALL.iter().map(move |zone| (*zone, self.is_dirty(*zone)))
    }

    pub fn dirty_zones(&self) -> Vec<Zone> {
        self.iter()
            .filter_map(|(zone, dirty)| dirty.then_some(zone))
            .collect()
    }
}

impl Serialize for ZoneFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(ZONE_COUNT))?;
        for (zone, dirty) in self.iter() {
            map.serialize_entry(&zone.key(), &dirty)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ZoneFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ZoneFlagsVisitor;

        impl<'de> Visitor<'de> for ZoneFlagsVisitor {
            type Value = ZoneFlags;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of zone_1..zone_11 boolean flags")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut flags = ZoneFlags::default();
                while let Some(key) = access.next_key::<String>()? {
                    match Zone::from_str(&key) {
                        Ok(zone) => {
                            let dirty = access.next_value::<Option<bool>>()?.unwrap_or(false);
                            flags.set(zone, dirty);
                        }
                        Err(()) if key.starts_with("zone_") => {
                            return Err(de::Error::custom(format!("Invalid zone: {key}")));
                        }
                        Err(()) => {
                            access.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(flags)
            }
        }

        deserializer.deserialize_map(ZoneFlagsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_bounds() {
        assert!(Zone::new(0).is_none());
        assert!(Zone::new(12).is_none());
        assert_eq!(Zone::new(11).map(Zone::key), Some("zone_11".to_string()));
        assert_eq!(Zone::ALL.len(), ZONE_COUNT);
        assert_eq!("zone_3".parse::<Zone>(), Ok(Zone(3)));
        assert!("zone_12".parse::<Zone>().is_err());
        assert!("zone3".parse::<Zone>().is_err());
    }

    #[test]
    fn test_serializes_as_flat_keys_in_numeric_order() {
        let flags = ZoneFlags::dirty(&[Zone(1), Zone(10)]);
        let json = serde_json::to_string(&flags).unwrap();
        assert!(json.starts_with(r#"{"zone_1":true,"zone_2":false"#));
        assert!(json.ends_with(r#""zone_10":true,"zone_11":false}"#));
    }

    #[test]
    fn test_deserialize_defaults_and_ignores_other_keys() {
        let flags: ZoneFlags =
            serde_json::from_str(r#"{"zone_5": true, "zone_6": null, "notes": "x"}"#).unwrap();
        assert_eq!(flags.dirty_zones(), vec![Zone(5)]);

        let invalid = serde_json::from_str::<ZoneFlags>(r#"{"zone_12": true}"#);
        assert!(invalid.is_err());
    }
}
