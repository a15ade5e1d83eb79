//! Community leaderboard grouping
//!
//! Groups profile snapshots by a categorical attribute and produces sorted
//! top-N views. Sorting is descending by XP with stable ties (insertion
//! order), and duplicate ids from merged sources keep the first occurrence.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

use crate::domain::Profile;

/// Known origin communities shown in the ranking
pub const ORIGIN_CITIES: [&str; 6] = [
    "Desaguadero",
    "Juli",
    "Chucuito",
    "Ilave",
    "Conima",
    "Yunguyo",
];

/// Known residence cities shown in the ranking
pub const RESIDENCE_CITIES: [&str; 6] = ["Lima", "Arequipa", "La Paz", "El Alto", "Tacna", "Puno"];

/// Which profile attribute drives the grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankAttribute {
    Origin,
    Residence,
}

impl RankAttribute {
    pub fn get<'a>(&self, profile: &'a Profile) -> Option<&'a str> {
        match self {
            Self::Origin => profile.origin_city.as_deref(),
            Self::Residence => profile.residence_city.as_deref(),
        }
    }

    /// The allowed city set for this attribute
    pub fn known_cities(&self) -> &'static [&'static str] {
        match self {
            Self::Origin => &ORIGIN_CITIES,
            Self::Residence => &RESIDENCE_CITIES,
        }
    }
}

/// Merge profile sources (e.g. live data plus seed data), dropping duplicate
/// ids and preferring the first occurrence
pub fn merge_dedup(sources: impl IntoIterator<Item = Vec<Profile>>) -> Vec<Profile> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for source in sources {
        for profile in source {
            if seen.insert(profile.id.clone()) {
                merged.push(profile);
            }
        }
    }
    merged
}

/// Fill missing attribute values using an injected fallback; profiles that
/// already carry a value are untouched
pub fn assign_fallback(
    profiles: &mut [Profile],
    attribute: RankAttribute,
    fallback: impl Fn(&Profile) -> String,
) {
    for profile in profiles.iter_mut() {
        if attribute.get(profile).is_none() {
            let value = fallback(profile);
            match attribute {
                RankAttribute::Origin => profile.origin_city = Some(value),
                RankAttribute::Residence => profile.residence_city = Some(value),
            }
        }
    }
}

/// Deterministic fallback: pick a known city keyed on the profile id
pub fn default_fallback(attribute: RankAttribute) -> impl Fn(&Profile) -> String {
    move |profile: &Profile| {
        let cities = attribute.known_cities();
        let key: usize = profile.id.bytes().map(usize::from).sum();
        cities[key % cities.len()].to_string()
    }
}

/// Top `n` profiles per attribute value, descending by XP
///
/// Profiles with no attribute value are excluded from the view.
pub fn top_by_attribute<'a>(
    profiles: &'a [Profile],
    attribute: RankAttribute,
    n: usize,
) -> BTreeMap<&'a str, Vec<&'a Profile>> {
    let mut groups: BTreeMap<&str, Vec<&Profile>> = BTreeMap::new();
    for profile in profiles {
        if let Some(city) = attribute.get(profile) {
            groups.entry(city).or_default().push(profile);
        }
    }
    for members in groups.values_mut() {
        members.sort_by_key(|p| Reverse(p.xp));
        members.truncate(n);
    }
    groups
}

/// Global top `n` across all groups, restricted to the allowed city set
pub fn top_global<'a>(
    profiles: &'a [Profile],
    attribute: RankAttribute,
    allowed: &[&str],
    n: usize,
) -> Vec<&'a Profile> {
    let mut members: Vec<&Profile> = profiles
        .iter()
        .filter(|p| attribute.get(p).is_some_and(|city| allowed.contains(&city)))
        .collect();
    members.sort_by_key(|p| Reverse(p.xp));
    members.truncate(n);
    members
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, xp: u32, origin: Option<&str>) -> Profile {
        let mut p = Profile::new(id);
        p.id = id.to_string();
        p.xp = xp;
        p.origin_city = origin.map(str::to_string);
        p
    }

    #[test]
    fn test_top_by_attribute_groups_and_sorts() {
        let profiles = vec![
            profile("u1", 100, Some("A")),
            profile("u2", 50, Some("A")),
            profile("u3", 200, Some("B")),
        ];
        let top = top_by_attribute(&profiles, RankAttribute::Origin, 1);
        assert_eq!(top["A"].len(), 1);
        assert_eq!(top["A"][0].xp, 100);
        assert_eq!(top["B"][0].xp, 200);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let profiles = vec![
            profile("first", 100, Some("A")),
            profile("second", 100, Some("A")),
        ];
        let top = top_by_attribute(&profiles, RankAttribute::Origin, 2);
        assert_eq!(top["A"][0].id, "first");
        assert_eq!(top["A"][1].id, "second");
    }

    #[test]
    fn test_missing_attribute_excluded_from_groups() {
        let profiles = vec![profile("u1", 100, None), profile("u2", 50, Some("A"))];
        let top = top_by_attribute(&profiles, RankAttribute::Origin, 5);
        assert_eq!(top.len(), 1);
        assert_eq!(top["A"].len(), 1);
    }

    #[test]
    fn test_top_global_respects_allowed_set() {
        let profiles = vec![
            profile("u1", 500, Some("Atlantis")),
            profile("u2", 100, Some("Juli")),
            profile("u3", 300, Some("Desaguadero")),
        ];
        let top = top_global(&profiles, RankAttribute::Origin, &ORIGIN_CITIES, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, "u3");
        assert_eq!(top[1].id, "u2");
    }

    #[test]
    fn test_merge_dedup_prefers_first_source() {
        let live = vec![profile("u1", 999, Some("Juli"))];
        let seed = vec![profile("u1", 100, Some("Ilave")), profile("u2", 50, None)];
        let merged = merge_dedup([live, seed]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].xp, 999);
    }

    #[test]
    fn test_default_fallback_is_deterministic() {
        let mut profiles = vec![profile("u1", 10, None)];
        let fallback = default_fallback(RankAttribute::Origin);
        let expected = fallback(&profiles[0]);
        assign_fallback(&mut profiles, RankAttribute::Origin, fallback);
        assert_eq!(profiles[0].origin_city.as_deref(), Some(expected.as_str()));
        assert!(ORIGIN_CITIES.contains(&expected.as_str()));
    }
}
