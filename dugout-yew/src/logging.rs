/// Install `tracing-wasm` as the global subscriber.
/// Call once, before rendering.
pub fn init() {
    tracing_wasm::set_as_global_default();
}
