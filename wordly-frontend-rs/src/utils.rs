pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, calling this once during
    // initialization turns panics into readable `console.error` messages.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
