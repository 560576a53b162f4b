use std::num::NonZeroU32;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Questions per page on `GET /questions`.
    pub page_size: NonZeroU32,
}

impl Settings {
    pub fn with_page_size(page_size: NonZeroU32) -> Self {
        Settings { page_size }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let page_size = match NonZeroU32::new(DEFAULT_PAGE_SIZE) {
            Some(size) => size,
            None => unreachable!("DEFAULT_PAGE_SIZE is non-zero"),
        };
        Settings { page_size }
    }
}
