// Console profiling span: starts a `console.time` on creation and ends it on
// drop. Inert unless trace logging is on, so a frame costs nothing extra in
// normal builds and the span never reaches web-sys outside the browser.

use web_sys::console;

pub struct Timer<'a> {
    name: Option<&'a str>,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        if log::log_enabled!(log::Level::Trace) {
            console::time_with_label(name);
            Timer { name: Some(name) }
        } else {
            Timer { name: None }
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        if let Some(name) = self.name {
            console::time_end_with_label(name);
        }
    }
}
