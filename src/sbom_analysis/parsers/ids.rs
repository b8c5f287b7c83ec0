use std::collections::HashSet;

/// Assigns a document-unique id to every component
///
/// The first occurrence of a non-blank reference keeps it. Missing, blank
/// and repeated references get `<prefix>-<index>`, suffixed with `-N` when
/// that name is already taken or appears as a reference anywhere in the
/// document.
pub fn assign_unique_ids<'a, I>(refs: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let refs: Vec<Option<&str>> = refs
        .into_iter()
        .map(|r| r.filter(|r| !r.trim().is_empty()))
        .collect();
    let explicit: HashSet<&str> = refs.iter().flatten().copied().collect();
    let mut used: HashSet<String> = HashSet::with_capacity(refs.len());

    refs.iter()
        .enumerate()
        .map(|(index, r)| {
            let id = match r {
                Some(r) if !used.contains(*r) => r.to_string(),
                _ => {
                    let base = format!("{}-{}", prefix, index);
                    let mut candidate = base.clone();
                    let mut suffix = 1;
                    while explicit.contains(candidate.as_str()) || used.contains(&candidate) {
                        candidate = format!("{}-{}", base, suffix);
                        suffix += 1;
                    }
                    candidate
                }
            };
            used.insert(id.clone());
            id
        })
        .collect()
}
