/// Strips a Reddit-style kind prefix (`t1_`, `t3_`, ...) from a parent id.
pub fn normalize_parent_id(parent_id: &str) -> &str {
    match parent_id.split_once('_') {
        Some((kind, id))
            if kind.len() == 2 && kind.starts_with('t') && !id.is_empty() =>
        {
            id
        }
        _ => parent_id,
    }
}
