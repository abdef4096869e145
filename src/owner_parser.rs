use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// @module: Positional owner-record parsing over extracted document lines

/// Number of lines searched around an anchor when looking up an associated field
pub const LOOKUP_WINDOW: usize = 30;

/// Marker line that opens a natural-person block in the disclosure form
const SURNAME_MARKER: &str = "ФАМИЛИЯ";

/// Label that precedes a tax identifier, either inline or on its own line
const INN_LABEL: &str = "ИНН";

/// Label line that precedes a nominal share value
const SHARE_LABEL: &str = "Номинальная стоимость доли";

// Relative positions of the name parts inside a person block; the lines in
// between are form boilerplate and skipped.
const SURNAME_OFFSET: usize = 1;
const GIVEN_NAME_OFFSET: usize = 3;
const PATRONYMIC_OFFSET: usize = 5;

/// Lines consumed by one person block, marker included
const PERSON_BLOCK_LEN: usize = 6;

// @const: Legal-form tokens that mark an organization line
static ORG_FORM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(ООО|АО|ПАО)\b").unwrap()
});

// @const: Inline identifier, label and digits on the same line
static INN_INLINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"ИНН.*?(\d{10,12})").unwrap()
});

// @const: Bare identifier digits (used when the label sits on its own line)
static INN_DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{10,12}").unwrap()
});

// @const: Any digit run (share values carry no fixed width)
static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+").unwrap()
});

/// Kind of owner a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerKind {
    #[default]
    /// Natural person; terminal node of an ownership chain
    Person,
    /// Legal entity; intermediate node that the resolver descends into
    Organization,
}

/// One owner found in a disclosure document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRecord {
    /// Record kind; not part of the wire output, callers only ever see persons
    #[serde(skip)]
    pub kind: OwnerKind,

    /// Full name (person: surname, given name, patronymic joined with spaces;
    /// organization: the registered name line as printed)
    pub name: String,

    /// Tax identifier, 10 or 12 digits; persons in this form typically have none
    pub identifier: Option<String>,

    /// Nominal share value as printed in the source, units uninterpreted
    pub share_value: Option<String>,
}

impl OwnerRecord {
    /// Create a person record
    pub fn person(name: String, share_value: Option<String>) -> Self {
        Self {
            kind: OwnerKind::Person,
            name,
            identifier: None,
            share_value,
        }
    }

    /// Create an organization record
    pub fn organization(name: String, identifier: Option<String>) -> Self {
        Self {
            kind: OwnerKind::Organization,
            name,
            identifier,
            share_value: None,
        }
    }
}

/// Scan extracted document lines for owner records.
///
/// Single forward pass with an explicit cursor. A line equal to the surname
/// marker opens a person block (fixed name offsets, cursor jumps past the
/// block); a line carrying a legal-form token is an organization record
/// (cursor advances by one, since registered names vary in length and the
/// identifier can sit before or after the name line).
pub fn parse_owners(lines: &[String]) -> Vec<OwnerRecord> {
    let mut owners = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        // Natural person block
        if line.to_uppercase() == SURNAME_MARKER && i + PATRONYMIC_OFFSET < lines.len() {
            let name = format!(
                "{} {} {}",
                lines[i + SURNAME_OFFSET].trim(),
                lines[i + GIVEN_NAME_OFFSET].trim(),
                lines[i + PATRONYMIC_OFFSET].trim()
            );
            let share = find_share_near(lines, i, LOOKUP_WINDOW);
            owners.push(OwnerRecord::person(name, share));
            i += PERSON_BLOCK_LEN;
            continue;
        }

        // Organization line
        if ORG_FORM_REGEX.is_match(line) {
            let identifier = find_identifier_near(lines, i, LOOKUP_WINDOW);
            owners.push(OwnerRecord::organization(line.to_string(), identifier));
        }

        i += 1;
    }

    owners
}

/// Look for a tax identifier near an anchor line.
///
/// Searches forward from `index` up to `window` lines, then backward from
/// `index - 1`; the forward pass completes before the backward one begins.
/// A line either carries the label and digits inline, or is a bare label
/// line with the digits on the following line.
pub fn find_identifier_near(lines: &[String], index: usize, window: usize) -> Option<String> {
    let found = (index..(index + window).min(lines.len())).find_map(|j| identifier_at(lines, j));
    if found.is_some() {
        return found;
    }

    (index.saturating_sub(window.saturating_sub(1))..index)
        .rev()
        .find_map(|j| identifier_at(lines, j))
}

// One candidate line of the identifier lookup
fn identifier_at(lines: &[String], j: usize) -> Option<String> {
    if let Some(caps) = INN_INLINE_REGEX.captures(&lines[j]) {
        return Some(caps[1].to_string());
    }

    if lines[j].trim().to_uppercase() == INN_LABEL && j + 1 < lines.len() {
        if let Some(m) = INN_DIGITS_REGEX.find(&lines[j + 1]) {
            return Some(m.as_str().to_string());
        }
    }

    None
}

/// Look for a nominal share value near an anchor line.
///
/// Forward-only scan for the share label; the value is the first digit run
/// on the line after the label.
pub fn find_share_near(lines: &[String], index: usize, window: usize) -> Option<String> {
    for j in index..(index + window).min(lines.len()) {
        if lines[j].contains(SHARE_LABEL) && j + 1 < lines.len() {
            if let Some(m) = DIGITS_REGEX.find(&lines[j + 1]) {
                return Some(m.as_str().to_string());
            }
        }
    }
    None
}
