use leptos::prelude::*;
use staffdesk::ClientConfig;
use staffdesk_frontend::{App, logging};

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();
    logging::init_logging(&ClientConfig::from_build_env().log_level);
    tracing::info!("StaffDesk frontend starting");
    mount_to_body(App);
}
