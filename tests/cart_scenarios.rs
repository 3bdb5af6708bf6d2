//! Cart scenarios exercised through the public API.

use rust_decimal::Decimal;
use testresult::TestResult;

use trolley::prelude::*;

fn add_item(
    cart: &mut Cart,
    item_id: u64,
    category: u64,
    seller: u64,
    price: Decimal,
    quantity: u32,
) -> Outcome {
    cart.add_item(
        ItemId(item_id),
        CategoryId(category),
        SellerId(seller),
        price,
        quantity,
    )
}

fn add_vas(
    cart: &mut Cart,
    item_id: u64,
    vas_item_id: u64,
    price: Decimal,
    quantity: u32,
) -> Outcome {
    cart.add_vas_item_to_item(
        ItemId(item_id),
        VasItemId(vas_item_id),
        CategoryId::VAS,
        SellerId::VAS,
        price,
        quantity,
    )
}

fn ten() -> Decimal {
    Decimal::new(100, 1)
}

/// Recompute the running total from scratch.
fn recomputed_total(cart: &Cart) -> Decimal {
    cart.items()
        .map(|item| item.line_total() + item.vas_total())
        .sum()
}

#[test]
fn adding_a_new_item() {
    let mut cart = Cart::default();

    let outcome = add_item(&mut cart, 1, 1001, 1234, ten(), 2);

    assert!(outcome.is_success());
    assert_eq!(outcome.text(), Some("Item added to cart"));
    assert_eq!(outcome.added_quantity(), None);
}

#[test]
fn adding_the_same_item_again_updates_quantity() {
    let mut cart = Cart::default();
    add_item(&mut cart, 1, 1001, 1234, ten(), 2);

    let outcome = add_item(&mut cart, 1, 1001, 1234, ten(), 3);

    assert!(outcome.is_success());
    assert_eq!(
        outcome.text(),
        Some("Added from the same item, item quantity updated in cart.")
    );
    assert_eq!(cart.item(ItemId(1)).map(LineItem::quantity), Some(5));
    assert_eq!(cart.total_price(), Decimal::from(50));
}

#[test]
fn distinct_item_ceiling_binds_before_quantity_ceiling() {
    let mut cart = Cart::default();
    for item_id in 1..=30 {
        add_item(&mut cart, item_id, 1001, 1234, ten(), 1);
    }

    let outcome = add_item(&mut cart, 31, 1001, 1234, ten(), 1);

    assert!(!outcome.is_success());
    assert_eq!(
        outcome.text(),
        Some(
            "Cart can contain a maximum of 10 unique items(excluding VasItems). ItemId with 31 can't added."
        )
    );
    assert_eq!(cart.unique_items(), 10);
    assert_eq!(cart.total_quantity(), 10);
}

#[test]
fn vas_items_need_a_furniture_or_electronics_parent() {
    let mut cart = Cart::default();
    add_item(&mut cart, 1, 1002, 5678, Decimal::from(20), 1);

    let outcome = add_vas(&mut cart, 1, 10001, Decimal::from(5), 1);

    assert!(!outcome.is_success());
    assert_eq!(
        outcome.text(),
        Some("VasItem can only be added to items in Furniture or Electronics category")
    );
}

#[test]
fn vas_items_need_a_parent_in_the_cart() {
    let mut cart = Cart::default();

    let outcome = add_vas(&mut cart, 1, 10001, Decimal::from(5), 1);

    assert_eq!(outcome.text(), Some("Item not found in cart"));
    assert!(!outcome.is_success());
}

#[test]
fn removing_from_an_empty_cart() {
    let mut cart = Cart::default();

    let outcome = cart.remove_item(ItemId(1));

    assert_eq!(outcome.text(), Some("Item with itemId:1 not found in cart"));
}

#[test]
fn quantity_and_distinct_item_ceilings_hold_for_new_items() {
    let mut cart = Cart::default();

    for item_id in 1..=25 {
        let quantity = u32::try_from(item_id % 7 + 1).unwrap_or(1);
        add_item(&mut cart, item_id, 1001, item_id % 3, ten(), quantity);

        assert!(cart.total_quantity() <= 30);
        assert!(cart.unique_items() <= 10);
    }
}

#[test]
fn running_total_matches_contents_until_a_removal() {
    let mut cart = Cart::default();
    add_item(&mut cart, 1, 1001, 7, Decimal::from(1_000), 2);
    add_item(&mut cart, 2, 3004, 7, Decimal::from(500), 1);
    add_item(&mut cart, 1, 1001, 7, Decimal::from(1_000), 9);
    add_vas(&mut cart, 1, 100, Decimal::from(50), 2);
    add_vas(&mut cart, 1, 100, Decimal::from(50), 20);
    add_vas(&mut cart, 2, 200, Decimal::from(25), 5);

    assert_eq!(cart.total_price(), recomputed_total(&cart));

    let vas_on_two = cart
        .item(ItemId(2))
        .map(LineItem::vas_total)
        .unwrap_or_default();
    cart.remove_item(ItemId(2));

    assert_eq!(cart.total_price(), recomputed_total(&cart) + vas_on_two);
}

#[test]
fn vas_room_caps_a_new_vas_item() {
    let mut cart = Cart::default();
    add_item(&mut cart, 1, 1001, 7, Decimal::from(1_000), 1);

    for _ in 0..6 {
        add_vas(&mut cart, 1, 100, Decimal::from(10), 4);
    }

    let quantity = cart
        .item(ItemId(1))
        .and_then(|item| item.vas_item(VasItemId(100)))
        .map(VasItem::quantity);

    assert_eq!(quantity, Some(3));
}

#[test]
fn existing_vas_item_tops_up_to_the_item_ceiling() -> TestResult {
    let mut cart = Cart::default();
    add_item(&mut cart, 1, 1001, 7, Decimal::from(1_000), 1);
    add_vas(&mut cart, 1, 100, Decimal::from(10), 2);

    let outcome = add_vas(&mut cart, 1, 100, Decimal::from(10), 20);

    assert!(outcome.is_partial());
    assert_eq!(outcome.added_quantity(), Some(8));
    assert_eq!(
        outcome.text(),
        Some("The maximum quantity of 100 in the item is 10. Only 8 items added.")
    );

    let again = add_vas(&mut cart, 1, 100, Decimal::from(10), 20);
    assert_eq!(again.added_quantity(), Some(0));

    let vas_item = cart
        .item(ItemId(1))
        .and_then(|item| item.vas_item(VasItemId(100)))
        .ok_or("VAS item missing")?;

    assert_eq!(vas_item.quantity(), 10);
    assert_eq!(cart.total_price(), Decimal::from(1_100));
    assert_eq!(cart.total_price(), recomputed_total(&cart));

    Ok(())
}

#[test]
fn reset_empties_the_cart_and_discount() {
    let mut cart = Cart::default();
    add_item(&mut cart, 1, 1001, 7, Decimal::from(1_000), 2);
    add_vas(&mut cart, 1, 100, Decimal::from(50), 1);
    cart.display();

    let outcome = cart.reset();

    assert!(outcome.is_success());
    assert_eq!(cart.total_quantity(), 0);
    assert_eq!(cart.total_discount(), Decimal::ZERO);
    assert_eq!(cart.total_price(), Decimal::ZERO);
}

#[test]
fn repeated_displays_share_items_but_accumulate_discount() -> TestResult {
    let mut cart = Cart::default();
    add_item(&mut cart, 1, 1001, 7, Decimal::from(3_000), 2);
    add_item(&mut cart, 2, 3003, 8, Decimal::from(100), 1);

    let first = cart.display();
    let second = cart.display();

    let first = first.snapshot().ok_or("first display has no snapshot")?;
    let second = second.snapshot().ok_or("second display has no snapshot")?;

    assert_eq!(first.items, second.items);
    assert_eq!(first.applied_promotion_id, Some(PromotionId::TotalPrice));
    assert_eq!(first.total_discount, Decimal::from(500));
    assert_eq!(second.total_discount, Decimal::from(1_000));
    assert_eq!(first.total_price, Decimal::from(5_600));

    Ok(())
}

#[test]
fn display_serializes_to_the_wire_shape() -> TestResult {
    let mut cart = Cart::default();
    add_item(&mut cart, 1, 1001, 7, Decimal::from(100), 1);
    add_vas(&mut cart, 1, 100, Decimal::from(10), 1);

    let json = serde_json::to_value(cart.display())?;

    assert_eq!(json["result"], serde_json::json!(true));
    assert_eq!(json["message"]["items"][0]["vasItems"][0]["vasItemId"], serde_json::json!(100));
    assert_eq!(json["message"]["appliedPromotionId"], serde_json::json!(1232));
    assert_eq!(json["message"]["totalPrice"], serde_json::json!(0.0));
    assert_eq!(json["message"]["totalDiscount"], serde_json::json!(110.0));
    assert!(json.get("addedQuantity").is_none());

    Ok(())
}

#[test]
fn custom_limits_are_enforced_and_quoted() -> TestResult {
    let limits = CartLimits::from_yaml_str("max_unique_items: 2\nmax_cart_price: 1000\n")?;
    let mut cart = Cart::with_limits(limits);
    add_item(&mut cart, 1, 1001, 7, Decimal::from(10), 1);
    add_item(&mut cart, 2, 1001, 8, Decimal::from(10), 1);

    let outcome = add_item(&mut cart, 3, 1001, 9, Decimal::from(10), 1);

    assert_eq!(
        outcome.text(),
        Some("Cart can contain a maximum of 2 unique items(excluding VasItems). ItemId with 3 can't added.")
    );

    Ok(())
}
