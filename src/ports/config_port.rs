//! Configuration access port trait.
//!
//! Values are addressed by `section` (a top-level key) and `key`.

pub trait ConfigPort {
    /// The value at `section.key` rendered as text. `None` when the key is
    /// absent or null; callers parse and reject malformed values themselves.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}
