//! Selector assembly.

use objj_ir::Ident;

/// Build the runtime selector string from keyword fragments.
///
/// The first fragment (or the empty string when it is absent) is followed
/// by one colon per argument; each further argument contributes its own
/// fragment name and a colon.
pub fn assemble(fragments: &[Option<Ident>], arg_count: usize) -> String {
    let name = |i: usize| {
        fragments
            .get(i)
            .and_then(Option::as_ref)
            .map_or("", |id| id.name.as_str())
    };

    let mut selector = name(0).to_string();
    for i in 0..arg_count {
        if i > 0 {
            selector.push_str(name(i));
        }
        selector.push(':');
    }
    selector
}

/// Selector text made safe for use inside a function name.
pub fn mangle(selector: &str) -> String {
    selector.replace(':', "_")
}

#[cfg(test)]
mod tests;
