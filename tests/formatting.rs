use pricebot::bill::{Bill, RequestedItem};
use pricebot::handlers::category::format_category;
use pricebot::handlers::price::format_prices;
use pricebot::tests::util::sample_catalog;

#[test]
fn bill_renders_table_steps_and_total() {
    let catalog = sample_catalog();
    let bill = Bill::price(
        &catalog,
        &[
            RequestedItem::new("milk", 2.0, "L"),
            RequestedItem::new("tomatoes", 1.0, "kg"),
            RequestedItem::new("bread", 3.0, "packets"),
        ],
        None,
        "INR",
    );
    assert_eq!(
        bill.render(),
        "| Item | Unit Price | Quantity | Amount |\n\
         |------|------------|----------|--------|\n\
         | Milk | ₹65.00 per 1 liter | 2 L | ₹130.00 |\n\
         | Tomatoes | ₹40.00 per 1 kg | 1 kg | ₹40.00 |\n\
         | Bread | ₹40.00 per 1 packet | 3 packets | ₹120.00 |\n\
         \n\
         **Calculation:**\n\
         1. Milk: 2 L ÷ 1 L = 2 × ₹65.00 = ₹130.00\n\
         2. Tomatoes: 1 kg ÷ 1 kg = 1 × ₹40.00 = ₹40.00\n\
         3. Bread: 3 packets ÷ 1 packet = 3 × ₹40.00 = ₹120.00\n\
         \n\
         **Total: ₹290.00**"
    );
}

#[test]
fn bill_lists_items_it_could_not_price() {
    let catalog = sample_catalog();
    let bill = Bill::price(
        &catalog,
        &[
            RequestedItem::new("eggs", 6.0, ""),
            RequestedItem::new("caviar", 1.0, "kg"),
            RequestedItem::new("rice", 1.0, "liter"),
            RequestedItem::new("sugar", 1.0, "bushel"),
        ],
        None,
        "INR",
    );
    let text = bill.render();
    assert!(text.contains("| Eggs | ₹80.00 per 12 count | 6 pcs | ₹40.00 |"));
    assert!(text.contains(
        "Not priced:\n\
         - caviar: not in the catalog\n\
         - Rice: 1 L cannot be priced per 1 kg bag\n\
         - Sugar: unknown unit \"bushel\"\n"
    ));
    assert!(text.ends_with("**Total: ₹40.00**"));
}

#[test]
fn packs_of_sample_items_price_whole_catalog_packs() {
    let catalog = sample_catalog();
    let bill = Bill::price(
        &catalog,
        &[
            RequestedItem::new("eggs", 2.0, "packets"),
            RequestedItem::new("rice", 2.0, "bags"),
        ],
        None,
        "INR",
    );
    assert!(bill.skipped.is_empty());
    let text = bill.render();
    assert!(text.contains("| Eggs | ₹80.00 per 12 count | 2 × 12 count | ₹160.00 |"));
    assert!(text.contains("| Rice | ₹75.00 per 1 kg bag | 2 × 1 kg bag | ₹150.00 |"));
    assert!(text.ends_with("**Total: ₹310.00**"));
}

#[test]
fn bill_with_nothing_priced_totals_zero() {
    let catalog = sample_catalog();
    let bill = Bill::price(
        &catalog,
        &[RequestedItem::new("caviar", 1.0, "kg")],
        None,
        "INR",
    );
    assert!(bill.lines.is_empty());
    let text = bill.render();
    assert!(text.starts_with("None of the requested items could be priced."));
    assert!(text.ends_with("**Total: ₹0.00**"));
}

#[test]
fn price_listing_skips_duplicates() {
    let catalog = sample_catalog();
    let requested = [
        RequestedItem::named("Tea"),
        RequestedItem::named("tea"),
        RequestedItem::named("saffron"),
    ];
    assert_eq!(
        format_prices(&catalog, &requested),
        "Tea costs ₹120.00 per 250 gm\nSorry, \"saffron\" is not in the catalog."
    );
}

#[test]
fn category_listing_uses_catalog_order() {
    let catalog = sample_catalog();
    assert_eq!(
        format_category(&catalog, "Grains"),
        "Grains items:\n- Rice: ₹75.00 per 1 kg bag\n- Atta (Wheat Flour): ₹60.00 per 1 kg"
    );
}
