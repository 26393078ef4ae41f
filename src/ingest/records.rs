use crate::error::CatalogError;
use crate::item::{Catalog, Item};
use log::{debug, warn};
use std::collections::HashSet;
use std::io::Read;

/// Header names of the columns a record is read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
    pub name: String,
    pub cost: String,
    pub benefit: String,
    /// Optional: records without the column have no category.
    pub category: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            name: "food_name".to_string(),
            cost: "cal_per_serving".to_string(),
            benefit: "kj_per_serving".to_string(),
            category: "food_category".to_string(),
        }
    }
}

/// One row of input before it becomes an [`Item`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub category: Option<String>,
    pub cost: f64,
    pub benefit: f64,
}

/// Reads every record from CSV data with a header row.
///
/// Quantity cells may carry a unit after the number (`"52 cal"`); only the leading number is
/// kept.
pub fn read_records<R: Read>(reader: R, columns: &Columns) -> Result<Vec<Record>, CatalogError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    let position = |column: &str| {
        headers
            .iter()
            .position(|header| header.trim() == column)
            .ok_or_else(|| CatalogError::MissingColumn(column.to_string()))
    };
    let name_at = position(columns.name.as_str())?;
    let cost_at = position(columns.cost.as_str())?;
    let benefit_at = position(columns.benefit.as_str())?;
    let category_at = position(columns.category.as_str()).ok();

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let row = row + 1;
        let record = result?;
        let cell = |at: usize| record.get(at).unwrap_or("").trim();
        records.push(Record {
            name: cell(name_at).to_string(),
            category: category_at.map(|at| cell(at).to_string()),
            cost: parse_quantity(row, &columns.cost, cell(cost_at))?,
            benefit: parse_quantity(row, &columns.benefit, cell(benefit_at))?,
        });
    }
    debug!("Read {} records", records.len());
    Ok(records)
}

fn parse_quantity(row: usize, field: &str, value: &str) -> Result<f64, CatalogError> {
    value
        .split_whitespace()
        .next()
        .and_then(|number| number.parse::<f64>().ok())
        .ok_or_else(|| CatalogError::MalformedQuantity {
            row,
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Drops records whose cost or benefit is zero.
pub fn remove_empty(records: Vec<Record>) -> Vec<Record> {
    let before = records.len();
    let kept: Vec<Record> = records
        .into_iter()
        .filter(|record| record.cost != 0.0 && record.benefit != 0.0)
        .collect();
    debug!("Dropped {} records with a zero quantity", before - kept.len());
    kept
}

/// Builds a catalog in record order. Later records with an already seen name are dropped.
pub fn into_catalog(records: Vec<Record>) -> Result<Catalog, CatalogError> {
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.name.clone()) {
            warn!("Skipping duplicate item {}", record.name);
            continue;
        }
        items.push(Item::new(record.name, record.cost, record.benefit)?);
    }
    Catalog::new(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const DATA: &str = "\
food_category,food_name,per100grams,cal_per_serving,kj_per_serving
Fruits,Apple,100g,52 cal,218 kJ
Fruits,Banana,100g,89 cal,371 kJ
Soups,Water,100g,0 cal,0 kJ
Pizza,Margherita,100g,266 cal,1113 kJ
Fruits,Apple,100g,60 cal,250 kJ
";

    #[test]
    fn reads_quantities_with_units() {
        // act
        let records = read_records(DATA.as_bytes(), &Columns::default()).unwrap();

        // assert
        assert_eq!(records.len(), 5);
        assert_eq!(
            records[0],
            Record {
                name: "Apple".to_string(),
                category: Some("Fruits".to_string()),
                cost: 52.0,
                benefit: 218.0,
            }
        );
        assert_eq!(records[3].benefit, 1113.0);
    }

    #[test]
    fn cleans_and_deduplicates() {
        let records = read_records(DATA.as_bytes(), &Columns::default()).unwrap();

        let catalog = into_catalog(remove_empty(records)).unwrap();

        let names: Vec<&str> = catalog.iter().map(Item::id).collect();
        assert_eq!(names, vec!["Apple", "Banana", "Margherita"]);
        assert_eq!(catalog.get(0).unwrap().cost(), 52.0);
    }

    #[test]
    fn custom_columns_without_category() {
        let data = "name,weight,value\nlamp,3.5,10\nrope,1,2.25\n";
        let columns = Columns {
            name: "name".to_string(),
            cost: "weight".to_string(),
            benefit: "value".to_string(),
            category: "kind".to_string(),
        };

        let records = read_records(data.as_bytes(), &columns).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].cost, 1.0);
        assert!(records[0].category.is_none());
    }

    #[test]
    fn missing_column_is_reported() {
        let data = "food_name,cal_per_serving\nApple,52\n";
        let result = read_records(data.as_bytes(), &Columns::default());
        assert!(matches!(result, Err(CatalogError::MissingColumn(column)) if column == "kj_per_serving"));
    }

    #[test]
    fn malformed_quantity_names_the_row() {
        let data = "food_name,cal_per_serving,kj_per_serving\nApple,52,218\nPear,lots,239\n";
        let result = read_records(data.as_bytes(), &Columns::default());
        match result {
            Err(CatalogError::MalformedQuantity { row, field, value }) => {
                assert_eq!(row, 2);
                assert_eq!(field, "cal_per_serving");
                assert_eq!(value, "lots");
            }
            other => panic!("expected malformed quantity, got {other:?}"),
        }
    }

    #[test]
    fn negative_quantities_fail_catalog_building() {
        let records = vec![Record {
            name: "odd".to_string(),
            category: None,
            cost: -3.0,
            benefit: 1.0,
        }];
        assert!(matches!(
            into_catalog(records),
            Err(CatalogError::InvalidCost { .. })
        ));
    }
}
