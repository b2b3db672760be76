//! Built-in sample menu used when no stored catalog is available.

use crate::model::catalog::Catalog;
use crate::model::recipe::Recipe;

/// Returns the seeded café menu.
pub fn default_catalog() -> Catalog {
    Catalog::from_recipes([
        Recipe::new("espresso", "Espresso", "Coffee")
            .with_line("Hạt cà phê", "g", 18.0)
            .with_line("Nước", "ml", 30.0),
        Recipe::new("americano", "Americano", "Coffee")
            .with_line("Espresso", "shot", 1.0)
            .with_line("Nước", "ml", 120.0),
        Recipe::new("latte", "Latte", "Coffee")
            .with_line("Espresso", "shot", 1.0)
            .with_line("Sữa tươi", "ml", 220.0)
            .with_line("Đường", "g", 8.0),
        // Historical id; kept so stored ledgers keep resolving.
        Recipe::new("capuccino", "Cappuccino", "Coffee")
            .with_line("Espresso", "shot", 1.0)
            .with_line("Sữa tươi", "ml", 160.0)
            .with_line("Bọt sữa", "ml", 40.0),
        Recipe::new("tra-dao", "Trà đào", "Tea")
            .with_line("Trà đen", "g", 5.0)
            .with_line("Đào ngâm", "miếng", 2.0)
            .with_line("Syrup đào", "ml", 20.0)
            .with_line("Nước", "ml", 180.0),
        Recipe::new("sinh-to-xoai", "Sinh tố xoài", "Smoothie")
            .with_line("Xoài chín", "g", 180.0)
            .with_line("Sữa đặc", "ml", 25.0)
            .with_line("Đá viên", "g", 120.0),
    ])
}
