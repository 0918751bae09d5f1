/// Keys the search field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
}

/// Result of a key press over the suggestion list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Highlight moved; `None` means nothing is highlighted
    Moved(Option<usize>),
    /// Submit the highlighted suggestion
    SubmitSuggestion(usize),
    /// Submit the raw query text
    SubmitQuery,
    Ignored,
}

/// Applies a key to the highlight over `len` visible suggestions.
///
/// `selected` stays within `None ..= Some(len - 1)`; arrows clamp at both
/// ends. With no visible suggestions only Enter does anything.
pub fn navigate(selected: Option<usize>, len: usize, key: Key) -> KeyOutcome {
    if len == 0 {
        return match key {
            Key::Enter => KeyOutcome::SubmitQuery,
            Key::ArrowUp | Key::ArrowDown => KeyOutcome::Ignored,
        };
    }

    match key {
        Key::ArrowDown => match selected {
            None => KeyOutcome::Moved(Some(0)),
            Some(i) => KeyOutcome::Moved(Some((i + 1).min(len - 1))),
        },
        Key::ArrowUp => match selected {
            None | Some(0) => KeyOutcome::Moved(None),
            Some(i) => KeyOutcome::Moved(Some((i - 1).min(len - 1))),
        },
        Key::Enter => match selected {
            Some(i) if i < len => KeyOutcome::SubmitSuggestion(i),
            _ => KeyOutcome::SubmitQuery,
        },
    }
}
