/// Position-derived role of a layer within the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    Input,
    Hidden,
    Output,
}

/// Selects a role from a zero-based position and the chain length.
///
/// Position 0 is always `Input`, even for a single-element chain; the last
/// position is `Output`; everything between is `Hidden`.
pub fn role_for_position(index: usize, len: usize) -> LayerRole {
    if index == 0 {
        LayerRole::Input
    } else if index + 1 == len {
        LayerRole::Output
    } else {
        LayerRole::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_by_position() {
        assert_eq!(role_for_position(0, 4), LayerRole::Input);
        assert_eq!(role_for_position(1, 4), LayerRole::Hidden);
        assert_eq!(role_for_position(2, 4), LayerRole::Hidden);
        assert_eq!(role_for_position(3, 4), LayerRole::Output);
    }

    #[test]
    fn input_wins_for_single_element() {
        assert_eq!(role_for_position(0, 1), LayerRole::Input);
    }

    #[test]
    fn two_elements_have_no_hidden() {
        assert_eq!(role_for_position(0, 2), LayerRole::Input);
        assert_eq!(role_for_position(1, 2), LayerRole::Output);
    }
}
