//! Sample org documents.

/// Wrap `toml` in an org source block.
pub fn org_with_block(toml: &str) -> String {
    format!("* Flashcards\nSome prose.\n#+begin_src toml\n{toml}\n#+end_src\n* Other heading\n")
}

/// One basic card with uid `card1`.
pub fn single_card() -> String {
    org_with_block(r#"basic = { "card1" = { front = "Q", back = "A" } }"#)
}

/// Cards of several models spread over two blocks.
pub fn mixed_cards() -> String {
    let first = org_with_block(
        r#"[basic.ownership]
front = "Who frees a value?"
back = "Its owner"
tags = ["rust", "memory"]

[reversed_optional.ferris]
front = "Ferris"
back = "The Rust mascot""#,
    );
    let second = org_with_block(
        r#"[cloze.borrow]
front = "{{c1::One}} mutable borrow at a time"
back = "Aliasing XOR mutability""#,
    );
    format!("{first}\n{second}")
}

pub fn unknown_model() -> String {
    org_with_block(r#"unknown_model = { "x" = { front = "Q", back = "A" } }"#)
}

pub fn no_block() -> String {
    "* Notes\nJust prose, see #+begin_src toml in the manual.\n".to_string()
}
