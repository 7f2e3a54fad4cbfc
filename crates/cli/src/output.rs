//! Plain-text rendering for command results.

#![allow(clippy::print_stdout)]

use deskfront_core::{Product, ProductId};
use deskfront_storefront::cart::CartStore;
use deskfront_storefront::notify::Notification;

fn rating(product: &Product) -> String {
    product
        .rating
        .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"))
}

pub fn products(products: &[&Product]) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }
    println!("{:<4} {:<30} {:>8}  {:<10} {:>6}", "ID", "NAME", "PRICE", "CATEGORY", "RATING");
    for product in products {
        println!(
            "{:<4} {:<30} {:>8}  {:<10} {:>6}",
            product.id,
            product.name,
            product.price.to_string(),
            product.category.as_str(),
            rating(product)
        );
    }
}

pub fn product(product: &Product) {
    println!("{} ({})", product.name, product.id);
    println!("  Price:    {}", product.price);
    println!("  Category: {}", product.category);
    println!("  Rating:   {}", rating(product));
    println!("  Image:    {}", product.image);
}

pub fn wishlist(items: &[Product]) {
    if items.is_empty() {
        println!("Your wishlist is empty.");
        return;
    }
    for item in items {
        println!("{:<4} {:<30} {:>8}", item.id, item.name, item.price.to_string());
    }
}

pub fn membership(id: &ProductId, in_wishlist: bool) {
    if in_wishlist {
        println!("{id} is in your wishlist.");
    } else {
        println!("{id} is not in your wishlist.");
    }
}

pub fn cart(cart: &CartStore) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in cart.items() {
        println!(
            "{:<4} {:<30} {:>3} x {:>8} = {:>8}",
            line.id,
            line.name,
            line.quantity.get(),
            line.price.to_string(),
            line.line_total().to_string()
        );
    }

    let summary = cart.summary();
    println!();
    println!("  Items:    {}", summary.item_count);
    println!("  Subtotal: {}", summary.subtotal);
    if summary.ships_free() {
        println!("  Shipping: Free");
    } else {
        println!("  Shipping: {}", summary.shipping);
    }
    println!("  Total:    {}", summary.total);
}

pub fn notifications(notifications: &[Notification]) {
    for notification in notifications {
        match &notification.title {
            Some(title) => println!("{title}: {}", notification.description),
            None => println!("{}", notification.description),
        }
    }
}
