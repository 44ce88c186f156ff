#[cfg(feature = "timing")]
use web_sys::console;

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// Routes the `log` macros to the browser console. Safe to call more than once.
pub fn init_logger() {
    let _ = console_log::init_with_level(log::Level::Info);
}

// Times a scope with console.time/timeEnd
#[cfg(feature = "timing")]
pub struct Timer<'a> {
    name: &'a str,
}

#[cfg(feature = "timing")]
impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

#[cfg(feature = "timing")]
impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
