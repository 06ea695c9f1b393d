//! Unique-name negotiation with numeric `.NNN` suffixes.

/// Split `"Name.012"` into `("Name", Some(12))`.
fn split_numeric_suffix(name: &str) -> (&str, Option<u32>) {
    if let Some((base, digits)) = name.rsplit_once('.') {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = digits.parse() {
                return (base, Some(n));
            }
        }
    }
    (name, None)
}

/// Return `name` if nothing else uses it, otherwise the first free
/// `base.001`, `base.002`, ... where `base` is `name` without its suffix.
pub(crate) fn unique_name(name: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(name) {
        return name.to_string();
    }
    let (base, _) = split_numeric_suffix(name);
    (1u32..)
        .map(|n| format!("{base}.{n:03}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_are_renumbered() {
        let taken = ["OBCube", "OBCube.001"];
        let is_taken = |n: &str| taken.contains(&n);
        assert_eq!(unique_name("OBSphere", is_taken), "OBSphere");
        assert_eq!(unique_name("OBCube", is_taken), "OBCube.002");
        assert_eq!(unique_name("OBCube.001", is_taken), "OBCube.002");
    }

    #[test]
    fn dots_without_digits_are_kept() {
        assert_eq!(split_numeric_suffix("OBa.b"), ("OBa.b", None));
        assert_eq!(split_numeric_suffix("OBa.7"), ("OBa", Some(7)));
    }
}
