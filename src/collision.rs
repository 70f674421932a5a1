//! Pairwise overlap detection between placed items.
//!
//! Collisions are advisory: overlapping items stay where they are and are only
//! flagged, and the validation status does not depend on them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::geometry::intersects;
use crate::model::PlacedItem;

/// Two items whose footprints overlap, in arrangement order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct CollisionPair {
    pub first: String,
    pub second: String,
}

impl CollisionPair {
    /// Whether this pair involves the given item.
    pub fn involves(&self, id: &str) -> bool {
        self.first == id || self.second == id
    }

    /// Whether this pair is the (unordered) pair of the two ids.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

/// Tests every unordered pair of items for overlap.
///
/// O(n²) in the number of items, which stays in the tens.
pub fn detect_collisions(items: &[PlacedItem]) -> Vec<CollisionPair> {
    let mut pairs = Vec::new();
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            if intersects(a, b) {
                pairs.push(CollisionPair {
                    first: a.id().to_string(),
                    second: b.id().to_string(),
                });
            }
        }
    }
    if !pairs.is_empty() {
        log::debug!("{} overlapping item pairs", pairs.len());
    }
    pairs
}

/// Ids of all items involved in at least one collision, for distinct rendering.
pub fn colliding_ids(pairs: &[CollisionPair]) -> BTreeSet<String> {
    pairs
        .iter()
        .flat_map(|pair| [pair.first.clone(), pair.second.clone()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CargoItem, Dimensions};

    fn placed(id: &str, len: f64, wid: f64, x: f64, y: f64) -> PlacedItem {
        let item = CargoItem::new(id, "", "", "", Dimensions::new(len, wid, 2.0), 1000.0).unwrap();
        PlacedItem::new(item, x, y)
    }

    #[test]
    fn identical_positions_collide() {
        let items = vec![placed("a", 2.0, 1.0, 1.0, 0.5), placed("b", 2.0, 1.0, 1.0, 0.5)];
        let pairs = detect_collisions(&items);
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].matches("b", "a"));
    }

    #[test]
    fn relation_is_symmetric() {
        let a = placed("a", 2.0, 1.0, 0.0, 0.0);
        let b = placed("b", 1.5, 1.5, 1.2, 0.4);
        let forward = detect_collisions(&[a.clone(), b.clone()]);
        let backward = detect_collisions(&[b, a]);
        assert_eq!(forward.len(), 1);
        assert_eq!(backward.len(), 1);
        assert!(forward[0].matches(&backward[0].first, &backward[0].second));
    }

    #[test]
    fn separated_in_x_never_collide() {
        for y in [0.0, 0.3, 0.5, 1.0] {
            let items = vec![placed("a", 2.0, 1.0, 0.0, 0.0), placed("b", 2.0, 1.0, 2.5, y)];
            assert!(detect_collisions(&items).is_empty());
        }
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let items = vec![placed("a", 2.0, 1.0, 0.0, 0.0), placed("b", 2.0, 1.0, 0.0, 1.0)];
        assert!(detect_collisions(&items).is_empty());
    }

    #[test]
    fn colliding_ids_collects_all_members() {
        let items = vec![
            placed("a", 2.0, 1.0, 0.0, 0.0),
            placed("b", 2.0, 1.0, 1.0, 0.0),
            placed("c", 2.0, 1.0, 2.5, 0.0),
            placed("d", 1.0, 1.0, 8.0, 0.0),
        ];
        let pairs = detect_collisions(&items);
        assert_eq!(pairs.len(), 2);
        let ids = colliding_ids(&pairs);
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert!(pairs.iter().all(|p| !p.involves("d")));
    }
}
