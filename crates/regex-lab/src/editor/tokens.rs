//! Quick-insert tokens offered alongside the pattern input.

/// A palette section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenGroup {
    /// Character classes.
    Classes,
    /// Anchors and boundaries.
    Anchors,
    /// Quantifiers.
    Quantifiers,
    /// Groups and alternation.
    Groups,
}

/// An insertable snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Button label.
    pub label: &'static str,
    /// Text spliced into the pattern.
    pub insert: &'static str,
    /// Tooltip.
    pub description: &'static str,
    /// Palette section.
    pub group: TokenGroup,
}

const fn token(
    group: TokenGroup,
    label: &'static str,
    insert: &'static str,
    description: &'static str,
) -> Token {
    Token {
        label,
        insert,
        description,
        group,
    }
}

/// Every token, in display order.
pub const PALETTE: &[Token] = &[
    token(TokenGroup::Classes, r"\d", r"\d", "Any digit"),
    token(TokenGroup::Classes, r"\D", r"\D", "Any non-digit"),
    token(TokenGroup::Classes, r"\w", r"\w", "Word character"),
    token(TokenGroup::Classes, r"\W", r"\W", "Non-word character"),
    token(TokenGroup::Classes, r"\s", r"\s", "Whitespace"),
    token(TokenGroup::Classes, r"\S", r"\S", "Non-whitespace"),
    token(TokenGroup::Classes, ".", ".", "Any character except newline"),
    token(TokenGroup::Classes, "[abc]", "[]", "Character set"),
    token(TokenGroup::Classes, "[^abc]", "[^]", "Negated character set"),
    token(TokenGroup::Anchors, "^", "^", "Start of line"),
    token(TokenGroup::Anchors, "$", "$", "End of line"),
    token(TokenGroup::Anchors, r"\b", r"\b", "Word boundary"),
    token(TokenGroup::Anchors, r"\B", r"\B", "Not a word boundary"),
    token(TokenGroup::Quantifiers, "*", "*", "Zero or more"),
    token(TokenGroup::Quantifiers, "+", "+", "One or more"),
    token(TokenGroup::Quantifiers, "?", "?", "Zero or one"),
    token(TokenGroup::Quantifiers, "{n}", "{3}", "Exactly n times"),
    token(TokenGroup::Quantifiers, "{n,m}", "{1,3}", "Between n and m times"),
    token(TokenGroup::Quantifiers, "*?", "*?", "Zero or more, lazy"),
    token(TokenGroup::Groups, "(...)", "()", "Capturing group"),
    token(TokenGroup::Groups, "(?:...)", "(?:)", "Non-capturing group"),
    token(TokenGroup::Groups, "(?<name>...)", "(?<name>)", "Named group"),
    token(TokenGroup::Groups, "|", "|", "Alternation"),
];

/// Tokens belonging to `group`, in display order.
pub fn in_group(group: TokenGroup) -> impl Iterator<Item = &'static Token> {
    PALETTE.iter().filter(move |t| t.group == group)
}
