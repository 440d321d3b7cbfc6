use std::collections::HashMap;

use crate::subscribers::Subscriber;

/// Subscribers sharing one stored location string.
#[derive(Debug, Clone)]
pub struct LocationGroup {
    pub location: String,
    pub subscribers: Vec<Subscriber>,
}

/// Partition verified subscribers by their stored location.
///
/// Locations are compared exactly as stored, so spellings that differ by
/// case or whitespace form separate groups. Groups come back in first-seen
/// order, which keeps cycle logs stable across runs.
pub fn group_by_location(subscribers: Vec<Subscriber>) -> Vec<LocationGroup> {
    let mut groups: Vec<LocationGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for subscriber in subscribers {
        if !subscriber.verified {
            continue;
        }

        match index.get(&subscriber.location) {
            Some(&i) => groups[i].subscribers.push(subscriber),
            None => {
                index.insert(subscriber.location.clone(), groups.len());
                groups.push(LocationGroup {
                    location: subscriber.location.clone(),
                    subscribers: vec![subscriber],
                });
            }
        }
    }

    groups
}
