use clap::ValueEnum;

/// Entity types with a built-in feature layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Customer,
    Product,
    Supplier,
    Country,
}

/// Feature layout for one entity type: the key column identifying a row and
/// the numeric columns the clustering runs on.
///
/// The four built-in profiles share one analysis pipeline; only this layout
/// and the entity name differ between them.
#[derive(Debug, Clone)]
pub struct SegmentProfile {
    pub name: &'static str,
    pub id_column: &'static str,
    pub feature_columns: &'static [&'static str],
}

impl EntityKind {
    pub fn profile(self) -> SegmentProfile {
        match self {
            EntityKind::Customer => SegmentProfile {
                name: "customer",
                id_column: "customer_id",
                feature_columns: &[
                    "order_count",
                    "total_quantity",
                    "avg_unit_price",
                    "unique_categories",
                ],
            },
            EntityKind::Product => SegmentProfile {
                name: "product",
                id_column: "product_id",
                feature_columns: &[
                    "unit_price",
                    "units_in_stock",
                    "units_on_order",
                    "reorder_level",
                    "order_count",
                    "total_quantity",
                    "unique_customers",
                ],
            },
            EntityKind::Supplier => SegmentProfile {
                name: "supplier",
                id_column: "supplier_id",
                feature_columns: &[
                    "product_count",
                    "total_stock",
                    "total_on_order",
                    "avg_product_price",
                    "unique_customers",
                ],
            },
            EntityKind::Country => SegmentProfile {
                name: "country",
                id_column: "country",
                feature_columns: &[
                    "order_count",
                    "total_quantity",
                    "avg_unit_price",
                    "unique_categories",
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_name_their_key_column() {
        for kind in [
            EntityKind::Customer,
            EntityKind::Product,
            EntityKind::Supplier,
            EntityKind::Country,
        ] {
            let profile = kind.profile();
            assert!(!profile.feature_columns.is_empty());
            assert!(!profile.feature_columns.contains(&profile.id_column));
        }
    }
}
