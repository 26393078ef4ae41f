use crate::ingest::records::Record;
use log::debug;
use std::collections::HashSet;

/// Narrows records to a set of categories before the catalog is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CategoryFilter {
    /// Keeps every record.
    #[default]
    All,
    /// Keeps only records whose category is listed.
    Only(HashSet<String>),
    /// Drops records whose category is listed.
    Except(HashSet<String>),
}

impl CategoryFilter {
    pub fn only<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CategoryFilter::Only(categories.into_iter().map(Into::into).collect())
    }

    pub fn except<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CategoryFilter::Except(categories.into_iter().map(Into::into).collect())
    }

    /// Whether a record with this category passes. Uncategorized records only pass `All` and
    /// `Except`.
    pub fn accepts(&self, category: Option<&str>) -> bool {
        match (self, category) {
            (CategoryFilter::All, _) => true,
            (CategoryFilter::Only(keep), Some(category)) => keep.contains(category),
            (CategoryFilter::Only(_), None) => false,
            (CategoryFilter::Except(drop), Some(category)) => !drop.contains(category),
            (CategoryFilter::Except(_), None) => true,
        }
    }

    /// Keeps the accepted records, preserving their order.
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        let before = records.len();
        let kept: Vec<Record> = records
            .into_iter()
            .filter(|record| self.accepts(record.category.as_deref()))
            .collect();
        debug!("Category filter kept {} of {} records", kept.len(), before);
        kept
    }

    /// Distinct categories in first-seen order.
    pub fn categories(records: &[Record]) -> Vec<String> {
        let mut seen = HashSet::new();
        records
            .iter()
            .filter_map(|record| record.category.as_ref())
            .filter(|category| seen.insert(category.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, category: Option<&str>) -> Record {
        Record {
            name: name.to_string(),
            category: category.map(str::to_string),
            cost: 1.0,
            benefit: 1.0,
        }
    }

    fn records() -> Vec<Record> {
        vec![
            record("apple", Some("Fruits")),
            record("beer", Some("Beer")),
            record("pear", Some("Fruits")),
            record("mystery", None),
            record("pizza", Some("Pizza")),
        ]
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|record| record.name.as_str()).collect()
    }

    #[test]
    fn only_keeps_selected_categories() {
        let kept = CategoryFilter::only(["Fruits", "Pizza"]).apply(records());
        assert_eq!(names(&kept), vec!["apple", "pear", "pizza"]);
    }

    #[test]
    fn except_drops_listed_categories() {
        let kept = CategoryFilter::except(["Beer"]).apply(records());
        assert_eq!(names(&kept), vec!["apple", "pear", "mystery", "pizza"]);
    }

    #[test]
    fn all_keeps_everything() {
        assert_eq!(CategoryFilter::default().apply(records()).len(), 5);
    }

    #[test]
    fn lists_categories_once_in_order() {
        assert_eq!(
            CategoryFilter::categories(&records()),
            vec!["Fruits", "Beer", "Pizza"]
        );
    }
}
