//! Derived statistics over the entry sequence

use crate::entry::GameEntry;

/// Summary figures recomputed from the full entry list on every render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionStats {
    /// Number of tracked entries
    pub total_count: usize,
    /// Sum of hours played over all entries
    pub total_hours: f64,
    /// Entries marked completed
    pub completed_count: usize,
    /// Genre label to entry count, in first-seen genre order
    pub genre_histogram: Vec<(String, usize)>,
    /// One (title, hours) point per entry, in sequence order
    pub hours_series: Vec<(String, f64)>,
}

/// Compute statistics for an entry sequence
///
/// Pure: no side effects, same input yields the same output. Entries
/// without a genre contribute to no histogram bucket.
pub fn derive_stats(entries: &[GameEntry]) -> CollectionStats {
    let mut genre_histogram: Vec<(String, usize)> = Vec::new();
    for entry in entries {
        if let Some(genre) = &entry.genre {
            match genre_histogram.iter_mut().find(|(g, _)| g == genre) {
                Some((_, count)) => *count += 1,
                None => genre_histogram.push((genre.clone(), 1)),
            }
        }
    }

    CollectionStats {
        total_count: entries.len(),
        total_hours: entries.iter().map(|e| e.hours_played).sum(),
        completed_count: entries.iter().filter(|e| e.completed).count(),
        genre_histogram,
        hours_series: entries
            .iter()
            .map(|e| (e.title.clone(), e.hours_played))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str, genre: Option<&str>, hours: f64, completed: bool) -> GameEntry {
        GameEntry {
            id: id.to_string(),
            title: title.to_string(),
            platform: None,
            genre: genre.map(str::to_string),
            cover_url: None,
            rating: 0,
            hours_played: hours,
            completed,
        }
    }

    #[test]
    fn test_stats_for_empty_sequence() {
        let stats = derive_stats(&[]);
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.total_hours, 0.0);
        assert_eq!(stats.completed_count, 0);
        assert!(stats.genre_histogram.is_empty());
        assert!(stats.hours_series.is_empty());
    }

    #[test]
    fn test_stats_worked_example() {
        let entries = vec![
            entry("1", "A", Some("RPG"), 10.0, false),
            entry("2", "B", Some("RPG"), 5.0, true),
        ];
        let stats = derive_stats(&entries);

        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.total_hours, 15.0);
        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.genre_histogram, vec![("RPG".to_string(), 2)]);
        assert_eq!(
            stats.hours_series,
            vec![("A".to_string(), 10.0), ("B".to_string(), 5.0)]
        );
    }

    #[test]
    fn test_histogram_preserves_first_seen_order() {
        let entries = vec![
            entry("1", "A", Some("Indie"), 1.0, false),
            entry("2", "B", Some("RPG"), 1.0, false),
            entry("3", "C", Some("Indie"), 1.0, false),
            entry("4", "D", Some("Platformer"), 1.0, false),
        ];
        let stats = derive_stats(&entries);

        assert_eq!(
            stats.genre_histogram,
            vec![
                ("Indie".to_string(), 2),
                ("RPG".to_string(), 1),
                ("Platformer".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_entries_without_genre_fill_no_bucket() {
        let entries = vec![
            entry("1", "A", None, 1.0, false),
            entry("2", "B", None, 2.0, true),
        ];
        let stats = derive_stats(&entries);

        assert!(stats.genre_histogram.is_empty());
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.hours_series.len(), 2);
    }

    #[test]
    fn test_stats_are_pure() {
        let entries = vec![
            entry("1", "A", Some("RPG"), 10.0, false),
            entry("2", "B", Some("Sim"), 5.5, true),
        ];
        let first = derive_stats(&entries);
        let second = derive_stats(&entries);
        assert_eq!(first, second);
    }
}
