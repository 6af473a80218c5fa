//! `UniFFI` binding generator entry point.
//!
//! Run against the built `lockkit_core` cdylib to produce the Swift and
//! Kotlin bindings the mobile app embeds.

fn main() {
    uniffi::uniffi_bindgen_main();
}
