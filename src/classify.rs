use indexmap::IndexMap;
use tracing::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::event::Event;

/// Events grouped by category, in first-seen category order.
/// Position in this map is the category's color slot on the map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifiedEvents {
    buckets: IndexMap<String, Vec<Event>>,
}

impl ClassifiedEvents {
    /// Category names in display order
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.buckets.keys().map(String::as_str)
    }

    pub fn get(&self, category: &str) -> Option<&[Event]> {
        self.buckets.get(category).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Event])> + '_ {
        self.buckets.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Group events by category, preserving arrival order.
///
/// Fails with `TooManyCategories` once the grouping holds more than
/// `max_categories` buckets; no partial grouping is returned.
pub fn classify(events: Vec<Event>, max_categories: usize) -> TrackerResult<ClassifiedEvents> {
    let mut buckets: IndexMap<String, Vec<Event>> = IndexMap::new();
    for event in events {
        buckets.entry(event.category().to_string()).or_default().push(event);
    }

    if buckets.len() > max_categories {
        return Err(TrackerError::TooManyCategories {
            found: buckets.len(),
            max: max_categories,
        });
    }

    debug!(categories = buckets.len(), "classified events");
    Ok(ClassifiedEvents { buckets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_CATEGORIES;
    use crate::event::Sample;

    fn event(category: &str, lon: f64) -> Event {
        Event::new(category, vec![Sample::new(lon, 0.0, None)])
    }

    #[test]
    fn test_empty() {
        let classified = classify(Vec::new(), MAX_CATEGORIES).unwrap();
        assert!(classified.is_empty());
        assert_eq!(classified.event_count(), 0);
    }

    #[test]
    fn test_order_preserved() {
        let events = vec![
            event("wildfires", 1.0),
            event("severeStorms", 2.0),
            event("wildfires", 3.0),
            event("volcanoes", 4.0),
            event("severeStorms", 5.0),
        ];
        let classified = classify(events, MAX_CATEGORIES).unwrap();

        assert_eq!(
            classified.categories().collect::<Vec<_>>(),
            vec!["wildfires", "severeStorms", "volcanoes"]
        );
        let fires: Vec<f64> = classified
            .get("wildfires")
            .unwrap()
            .iter()
            .flat_map(|e| e.xs())
            .collect();
        assert_eq!(fires, vec![1.0, 3.0]);
        assert_eq!(classified.event_count(), 5);
    }

    #[test]
    fn test_nine_categories_rejected() {
        let events: Vec<Event> = (0..9).map(|i| event(&i.to_string(), 0.0)).collect();
        let err = classify(events, MAX_CATEGORIES).unwrap_err();
        assert!(matches!(err, TrackerError::TooManyCategories { found: 9, max: 8 }));
    }

    #[test]
    fn test_eight_categories_accepted() {
        let mut events: Vec<Event> = (0..8).map(|i| event(&i.to_string(), 0.0)).collect();
        events.push(event("3", 1.0));
        let classified = classify(events, MAX_CATEGORIES).unwrap();
        assert_eq!(classified.len(), 8);
        assert_eq!(classified.get("3").unwrap().len(), 2);
    }
}
