//! Sibling components sharing a filter through one provider

use std::sync::Arc;
use tincan_mirror::{
    use_shared_state, MemoryPlatform, Platform, ProviderOptions, Scope, SharedStateProvider,
    StoreOptions,
};

fn main() {
    println!("=== Shared Filter Example ===\n");

    // A page already opened with a filter in its address
    let page = Arc::new(MemoryPlatform::with_address("https://shop.test/products?color=red").unwrap());
    let root = Scope::root();
    let provider = SharedStateProvider::mount(&root, page.clone(), ProviderOptions::default());

    // Two siblings rendered under the provider
    let toolbar = use_shared_state(&provider.scope().child()).unwrap();
    let product_list = use_shared_state(&provider.scope().child()).unwrap();

    // The list re-renders whenever the mapping changes
    let _render = product_list.subscribe(|map| {
        let mut filters: Vec<_> = map.iter().collect();
        filters.sort();
        println!("   [ProductList] re-render with {:?}", filters);
    });

    println!("1. Initial color from the address: {:?}", product_list.get_stored("color"));

    println!("\n2. Toolbar picks a size");
    toolbar.store(("size", "m"));
    println!("   address: {}", page.address());
    println!("   list sees size = {:?}", product_list.get_stored("size"));

    println!("\n3. Toolbar remembers a view mode without touching the address");
    toolbar.store_with(("view", "grid"), &StoreOptions::new().suppress_url(true));
    println!("   address: {}", page.address());
    println!("   durable view = {:?}", page.storage_get("view"));

    println!("\n4. Several filters at once, one re-render");
    toolbar.batch(|shared| {
        shared.store(("color", "blue"));
        shared.store(("sort", "price"));
    });

    println!("\n5. Toolbar clears the color");
    toolbar.clear_stored("color");
    println!("   address: {}", page.address());
    println!("   list sees color = {:?}", product_list.get_stored("color"));
    println!("   history entries: {}", page.history_len());
}
