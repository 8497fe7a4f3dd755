use uuid::Uuid;

/// Sequential id generator for sections and component nodes
///
/// Ids look like `comp-1a2b3c4d5e6f-7`. The seed is random per session so a
/// fresh session never hands out an id that an earlier, persisted session
/// already used.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        let seed = Uuid::new_v4().simple().to_string();
        Self::from_seed(seed[..12].to_string())
    }

    /// Deterministic generator, mostly for tests and fixtures
    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential id with the given prefix
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", prefix, self.seed, self.count)
    }

    pub fn component_id(&mut self) -> String {
        self.next_id("comp")
    }

    pub fn section_id(&mut self) -> String {
        self.next_id("section")
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("abc");

        assert_eq!(gen.component_id(), "comp-abc-1");
        assert_eq!(gen.component_id(), "comp-abc-2");
        assert_eq!(gen.section_id(), "section-abc-3");
    }

    #[test]
    fn test_random_seeds_differ() {
        let a = IdGenerator::new();
        let b = IdGenerator::new();

        assert_eq!(a.seed().len(), 12);
        assert_ne!(a.seed(), b.seed());
    }
}
