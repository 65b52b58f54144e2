/// Expansion state: which tokens are showing their detail view
///
/// Membership is keyed by token address so it survives reordering of the
/// derived view. The bulk toggle is deliberately asymmetric: one expanded
/// row anywhere in the filtered set flips the whole operation to
/// collapse-all.
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one token. Returns true when the token is now expanded.
    pub fn toggle(&mut self, address: &str) -> bool {
        if self.expanded.remove(address) {
            false
        } else {
            self.expanded.insert(address.to_string());
            true
        }
    }

    pub fn is_expanded(&self, address: &str) -> bool {
        self.expanded.contains(address)
    }

    /// Whether any of the given addresses is expanded.
    pub fn any_expanded<'a>(&self, addresses: impl IntoIterator<Item = &'a str>) -> bool {
        addresses.into_iter().any(|a| self.expanded.contains(a))
    }

    /// Bulk toggle over the filtered set: any expanded → collapse all,
    /// none expanded → expand every given address.
    ///
    /// Returns true when the operation expanded.
    pub fn toggle_all<'a>(&mut self, addresses: impl IntoIterator<Item = &'a str> + Clone) -> bool {
        if self.any_expanded(addresses.clone()) {
            self.expanded.clear();
            false
        } else {
            for address in addresses {
                self.expanded.insert(address.to_string());
            }
            true
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut state = ExpansionState::new();
        assert!(state.toggle("0xa"));
        assert!(state.is_expanded("0xa"));
        assert!(!state.toggle("0xa"));
        assert!(!state.is_expanded("0xa"));
    }

    #[test]
    fn bulk_toggle_is_asymmetric() {
        let mut state = ExpansionState::new();
        let filtered = ["0xa", "0xb", "0xc"];

        // One of three already expanded → the bulk operation collapses all,
        // it does not expand the remaining two.
        state.toggle("0xb");
        let expanded = state.toggle_all(filtered);
        assert!(!expanded);
        assert!(state.is_empty());

        // None expanded → expands the whole filtered set.
        let expanded = state.toggle_all(filtered);
        assert!(expanded);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn collapse_all_clears_everything() {
        let mut state = ExpansionState::new();
        state.toggle("0xa");
        state.toggle("0xb");
        state.collapse_all();
        assert!(state.is_empty());
    }
}
