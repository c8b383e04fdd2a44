use uuid::Uuid;

/// Generate a fresh project-unique identifier such as `hero-3f2a…`.
pub fn fresh_id(prefix: &str) -> String {
    let prefix = if prefix.is_empty() { "block" } else { prefix };
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fresh_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| fresh_id("hero")).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.starts_with("hero-")));
    }

    #[test]
    fn test_empty_prefix_falls_back() {
        assert!(fresh_id("").starts_with("block-"));
    }
}
