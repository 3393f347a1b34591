//! What a provider leaves behind when it unmounts

use std::sync::Arc;
use tincan_mirror::{use_shared_state, MemoryPlatform, Platform, ProviderOptions, Scope, SharedStateProvider};

fn mount_wizard(page: &Arc<MemoryPlatform>, options: ProviderOptions) -> SharedStateProvider {
    let provider = SharedStateProvider::mount(&Scope::root(), page.clone(), options);
    let step = use_shared_state(&provider.scope().child()).unwrap();
    step.store(("step", "2"));
    step.store(("plan", "team"));
    provider
}

fn report(label: &str, page: &MemoryPlatform) {
    println!("   {label}");
    println!("     address: {}", page.address());
    println!(
        "     durable: step={:?} plan={:?}",
        page.storage_get("step"),
        page.storage_get("plan")
    );
}

fn main() {
    println!("=== Teardown Example ===\n");

    println!("1. Default options keep everything");
    let page = Arc::new(MemoryPlatform::new());
    let wizard = mount_wizard(&page, ProviderOptions::default());
    drop(wizard);
    report("after unmount", &page);

    println!("\n2. Clear the address, keep durable storage for the next visit");
    let page = Arc::new(MemoryPlatform::new());
    let wizard = mount_wizard(&page, ProviderOptions::default().with_clear_url_on_unmount(true));
    wizard.unmount();
    report("after unmount", &page);

    println!("\n3. Clear both");
    let page = Arc::new(MemoryPlatform::new());
    let wizard = mount_wizard(
        &page,
        ProviderOptions::default()
            .with_clear_url_on_unmount(true)
            .with_clear_durable_on_unmount(true),
    );
    let held = wizard.shared().clone();
    drop(wizard);
    report("after unmount", &page);

    println!("\n4. A handle kept past unmount ignores writes");
    held.store(("step", "3"));
    println!("   mounted: {}", held.is_mounted());
    report("after late write", &page);
}
