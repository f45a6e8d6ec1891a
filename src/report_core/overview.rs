//! Data exploration counts

use crate::store::{Field, TableStore};

pub fn total_sales(table: &TableStore) -> usize {
    table.count()
}

pub fn unique_customers(table: &TableStore) -> usize {
    table.distinct_values(Field::CustomerId).len()
}

pub fn categories(table: &TableStore) -> Vec<String> {
    table.distinct_values(Field::Category).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report_core::test_support::{create_test_table, TestSale};

    #[test]
    fn test_overview_counts() {
        let table = create_test_table(vec![
            TestSale::new(1).customer(10).category("Electronics"),
            TestSale::new(2).customer(10).category("Beauty"),
            TestSale::new(3).customer(11).category("Beauty"),
        ]);
        assert_eq!(total_sales(&table), 3);
        assert_eq!(unique_customers(&table), 2);
        assert_eq!(categories(&table), vec!["Beauty", "Electronics"]);
    }
}
