use std::path::Path;

use mesa::{
    cart::Cart,
    catalog::{CategoryId, ProductId, fixtures},
    prices::Price,
};
use testresult::TestResult;

fn menu_path() -> impl AsRef<Path> {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/menu.yml")
}

#[test]
fn bundled_menu_loads() -> TestResult {
    let catalog = fixtures::load(menu_path())?;

    assert_eq!(catalog.categories.len(), 4);
    assert_eq!(catalog.products_in(&CategoryId::from(1)).count(), 4);
    assert_eq!(
        catalog.active_promotion().map(|promotion| promotion.title.as_str()),
        Some("Promoción Especial")
    );

    Ok(())
}

#[test]
fn bundled_menu_marks_unavailable_products() -> TestResult {
    let catalog = fixtures::load(menu_path())?;

    let water = catalog.product(&ProductId::from(12));

    assert!(water.is_some_and(|product| !product.is_available));

    Ok(())
}

#[test]
fn cart_from_bundled_menu_totals_prices() -> TestResult {
    let catalog = fixtures::load(menu_path())?;
    let mut cart = Cart::new();

    for id in [1, 1, 10] {
        if let Some(product) = catalog.product(&ProductId::from(id)) {
            cart.add_item(product);
        }
    }

    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total(), Price::from(2900));

    Ok(())
}
