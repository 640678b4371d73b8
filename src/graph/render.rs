//! Canonical text dump of a graph.
//!
//! One line per account in ascending name order:
//! `"<name> suit : <followee>, <followee>"`, or `"<name> suit : aucun"`
//! for an account that follows nobody.

use std::fmt;

use super::engine::SocialGraph;

impl SocialGraph {
    /// Render the graph as text. Identical to its `Display` output.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SocialGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in self.account_indexes() {
            let account = self.account_at(idx);
            let followees = self.followee_indexes(idx);
            write!(f, "{} suit : ", account.name())?;
            if followees.is_empty() {
                f.write_str("aucun")?;
            } else {
                let names: Vec<&str> = followees
                    .iter()
                    .map(|&n| self.account_at(n).name())
                    .collect();
                f.write_str(&names.join(", "))?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let mut graph = SocialGraph::new();
        graph.add_account("Alice", "MotDePasse12345").unwrap();
        graph.add_account("Bob", "SecurePass45678").unwrap();
        graph.add_account("Clara", "TestPass78901").unwrap();
        graph.add_follow("Alice", "Clara").unwrap();
        graph.add_follow("Alice", "Bob").unwrap();

        assert_eq!(
            graph.render(),
            "Alice suit : Bob, Clara\nBob suit : aucun\nClara suit : aucun\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(SocialGraph::new().render(), "");
    }

    #[test]
    fn test_render_order_ignores_case() {
        let mut graph = SocialGraph::new();
        graph.add_account("bob", "Bob1pass").unwrap();
        graph.add_account("Alice", "Alice1pass").unwrap();
        graph.add_follow("bob", "bob").unwrap();
        graph.add_follow("bob", "Alice").unwrap();

        assert_eq!(graph.render(), "Alice suit : aucun\nbob suit : Alice, bob\n");
    }
}
