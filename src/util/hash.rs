//! Fingerprinting for planned builds.

use sha2::{Digest, Sha256};

/// A hasher for building fingerprints from multiple components.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    /// Create a new fingerprint builder.
    pub fn new() -> Self {
        Fingerprint {
            hasher: Sha256::new(),
        }
    }

    /// Add a string component to the fingerprint.
    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0"); // Separator
        self
    }

    /// Add a labelled list of strings.
    ///
    /// The label and length are hashed too, so moving an item from one list
    /// to the next changes the fingerprint.
    pub fn update_section<'a>(
        &mut self,
        label: &str,
        items: impl IntoIterator<Item = &'a str>,
    ) -> &mut Self {
        let items: Vec<&str> = items.into_iter().collect();
        self.update_str(label);
        self.update_str(&items.len().to_string());
        for s in items {
            self.update_str(s);
        }
        self
    }

    /// Finalize and return the fingerprint as a hex string.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }

    /// Finalize and return a short fingerprint (first 16 chars).
    pub fn finish_short(self) -> String {
        self.finish()[..16].to_string()
    }
}
