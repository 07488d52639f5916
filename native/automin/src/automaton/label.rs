//! Canonical labels for sets of states.
//!
//! A meta-state or partition block is named by joining its members' labels
//! inside braces. Commas and backslashes inside a member are escaped, so the
//! encoding is injective: `{1,2}` and `{12}` never alias, and neither does a
//! member whose own label contains a comma.

/// Encode an ordered sequence of member labels as a single label.
///
/// Callers pass members in canonical (ascending index) order.
pub fn encode_set<'a, I>(members: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut label = String::from("{");
    for (i, member) in members.into_iter().enumerate() {
        if i > 0 {
            label.push(',');
        }
        for c in member.chars() {
            if c == ',' || c == '\\' {
                label.push('\\');
            }
            label.push(c);
        }
    }
    label.push('}');
    label
}

/// Split a label produced by [`encode_set`] back into its members.
///
/// Returns `None` if `label` is not a well-formed set label.
pub fn decode_set(label: &str) -> Option<Vec<String>> {
    let inner = label.strip_prefix('{')?.strip_suffix('}')?;
    let mut members = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => current.push(chars.next()?),
            ',' => members.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    members.push(current);
    Some(members)
}
