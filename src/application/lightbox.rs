//! Image carousel over one album.

/// Carousel state owned by a single widget instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    images: Vec<String>,
    current: usize,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `album`, starting at `selected`. An unknown selection starts at
    /// the first image.
    pub fn open(&mut self, album: Vec<String>, selected: &str) -> Option<&str> {
        self.current = album
            .iter()
            .position(|src| src == selected)
            .unwrap_or(0);
        self.images = album;
        self.current()
    }

    pub fn current(&self) -> Option<&str> {
        self.images.get(self.current).map(String::as_str)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn next(&mut self) -> Option<&str> {
        if self.images.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.images.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<&str> {
        if self.images.is_empty() {
            return None;
        }
        let len = self.images.len();
        self.current = (self.current + len - 1) % len;
        self.current()
    }
}
