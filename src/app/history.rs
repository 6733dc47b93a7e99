//! Session history: an entry stack with a cursor, as a browser keeps it.

/// Ordered navigation entries plus the index of the current one.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    /// Start a history whose only entry is `location`.
    pub fn new(location: &str) -> Self {
        Self {
            entries: vec![location.to_string()],
            cursor: 0,
        }
    }

    /// The current entry.
    pub fn location(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Push a new entry after the current one, dropping any forward entries.
    pub fn push(&mut self, location: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location.to_string());
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry. Returns `false` at the start of the history.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one entry. Returns `false` at the end of the history.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_moves_cursor() {
        let mut h = History::new("/");
        h.push("/login");
        h.push("/dashboard");
        assert_eq!(h.location(), "/dashboard");
        assert_eq!(h.depth(), 3);
    }

    #[test]
    fn test_back_and_forward() {
        let mut h = History::new("/login");
        h.push("/dashboard");
        assert!(h.back());
        assert_eq!(h.location(), "/login");
        assert!(!h.back());
        assert!(h.forward());
        assert_eq!(h.location(), "/dashboard");
        assert!(!h.forward());
    }

    #[test]
    fn test_push_after_back_drops_forward_entries() {
        let mut h = History::new("/login");
        h.push("/dashboard");
        h.back();
        h.push("/other");
        assert_eq!(h.entries(), ["/login", "/other"]);
        assert!(!h.forward());
    }
}
